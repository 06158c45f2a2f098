//! Shared test utilities for the stylebook test suite.
//!
//! Provides fixture setup, lookup helpers and menu assertions that work with
//! [`ComponentsResult`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let result = build_fixture_components(tmp.path());
//!
//! let button = find_component(&result, "button");
//! assert_eq!(button.capitalized_name, "Button");
//!
//! assert_menu_names(&result, &["root", "atoms", "molecules", "pages", "widgets"]);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use crate::components::{BuildOptions, Component, ComponentsResult, build_components};
use crate::config;
use crate::data::{self, Data};
use crate::render::TemplateSet;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/components/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/components");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Run the whole library pipeline over a component directory.
pub fn build_fixture_components(dir: &Path) -> ComponentsResult {
    let config = config::load_config(dir).unwrap();
    let set = TemplateSet::load(dir, &config.template_extension).unwrap();
    let shared = data::aggregate_data(&config::data_pattern(&config, dir)).unwrap();
    build_components(&BuildOptions {
        templates: &set.templates,
        data: &shared,
        partials: &set.partials,
        component_dir: dir,
        root_name: &config.root_name,
        taxonomy: &config.taxonomy,
        template_extension: &config.template_extension,
    })
    .unwrap()
}

/// Unwrap a `json!` object literal into a [`Data`] map.
pub fn json_object(value: Value) -> Data {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a component by name. Panics if not found.
pub fn find_component<'a>(result: &'a ComponentsResult, name: &str) -> &'a Component {
    result
        .all
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.as_ref())
        .unwrap_or_else(|| {
            let names = component_names(&result.all);
            panic!("component '{name}' not found. Available: {names:?}")
        })
}

/// Component names in order.
pub fn component_names(components: &[Arc<Component>]) -> Vec<&str> {
    components.iter().map(|c| c.name.as_str()).collect()
}

/// Menu entry names in order.
pub fn menu_names(result: &ComponentsResult) -> Vec<&str> {
    result.menu.iter().map(|m| m.name.as_str()).collect()
}

/// Assert the menu lists exactly these categories, in this order.
pub fn assert_menu_names(result: &ComponentsResult, expected: &[&str]) {
    assert_eq!(menu_names(result), expected.to_vec(), "menu mismatch");
}
