//! Component listing: render every template and classify the results.
//!
//! This is the core of the style guide. Given the templates of a component
//! directory it produces a [`ComponentsResult`]:
//!
//! - `all`: every component, in template order
//! - `menu`: one entry per category that has components, root first, then the
//!   taxonomy order (atoms → pages), then ad-hoc categories
//! - `overview`: components of categories flagged for the overview, plus every
//!   ad-hoc category
//! - `typed`: ad-hoc categories only (taxonomy categories are moved to `menu`)
//!
//! ## Render Data
//!
//! Each template renders with `shared ⊕ companion`: the shared data with the
//! template's companion JSON shallow-merged on top. The merge is computed per
//! component, so one component's companion data never leaks into the next.
//!
//! ## Classification
//!
//! ```text
//! intro.jinja                   → root
//! atoms/button.html.jinja       → atoms     (taxonomy, overview)
//! pages/home.html.jinja         → pages     (taxonomy, not in overview)
//! widgets/carousel.html.jinja   → widgets   (ad-hoc, always in overview)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::data::{self, Data};
use crate::naming;
use crate::render::{Partials, Render, RenderError};
use crate::taxonomy::{self, TaxonomyEntry};

#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to render {path}: {source}")]
    Render { path: String, source: RenderError },
}

/// One rendered template and its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Template path relative to the component directory.
    pub path: String,
    /// Display name: `icon-button` → "Icon Button".
    pub capitalized_name: String,
    /// Raw template source.
    pub template: String,
    /// Rendered HTML.
    pub content: String,
}

/// A category in the menu with its components.
///
/// Ad-hoc categories carry no overview flag and no icon.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_overview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub components: Vec<Arc<Component>>,
}

impl MenuEntry {
    fn from_taxonomy(entry: &TaxonomyEntry, components: Vec<Arc<Component>>) -> Self {
        Self {
            name: entry.name.clone(),
            in_overview: Some(entry.in_overview),
            icon: entry.icon.clone(),
            components,
        }
    }

    fn ad_hoc(name: String, components: Vec<Arc<Component>>) -> Self {
        Self {
            name,
            in_overview: None,
            icon: None,
            components,
        }
    }

    /// Whether this entry came from a category outside the taxonomy.
    pub fn is_ad_hoc(&self) -> bool {
        self.in_overview.is_none()
    }
}

/// Classified listing of every component.
#[derive(Debug, Default, Serialize)]
pub struct ComponentsResult {
    pub all: Vec<Arc<Component>>,
    pub menu: Vec<MenuEntry>,
    pub overview: Vec<Arc<Component>>,
    /// Components of categories outside the taxonomy, by category.
    pub typed: BTreeMap<String, Vec<Arc<Component>>>,
}

/// Inputs of [`build_components`].
pub struct BuildOptions<'a, R> {
    /// Template path (relative to `component_dir`) → renderer.
    pub templates: &'a BTreeMap<String, R>,
    /// Data shared by every template. Never modified.
    pub data: &'a Data,
    pub partials: &'a Partials,
    pub component_dir: &'a Path,
    /// Category for templates outside any `<dir>/<name>.html` path.
    pub root_name: &'a str,
    pub taxonomy: &'a [TaxonomyEntry],
    /// Template file extension without the dot, e.g. `jinja`.
    pub template_extension: &'a str,
}

/// Render every template and classify the components.
///
/// Fails on the first template that cannot be read or rendered. Missing
/// companion data is not an error.
pub fn build_components<R: Render>(
    options: &BuildOptions<'_, R>,
) -> Result<ComponentsResult, ComponentError> {
    let mut result = ComponentsResult::default();
    let mut typed: BTreeMap<String, Vec<Arc<Component>>> = BTreeMap::new();

    for (path, renderer) in options.templates {
        let component = build_component(options, path, renderer)?;
        trace!(path = %path, kind = %component.kind, "built component");

        let component = Arc::new(component);
        result.all.push(Arc::clone(&component));
        typed
            .entry(component.kind.clone())
            .or_default()
            .push(component);
    }

    let categories = taxonomy::with_root(options.taxonomy, options.root_name);
    for entry in &categories {
        let Some(components) = typed.remove(&entry.name) else {
            continue;
        };
        if components.is_empty() {
            continue;
        }
        if entry.in_overview {
            result.overview.extend(components.iter().cloned());
        }
        result.menu.push(MenuEntry::from_taxonomy(entry, components));
    }

    for (name, components) in &typed {
        debug!(category = %name, "ad-hoc category");
        result.overview.extend(components.iter().cloned());
        result
            .menu
            .push(MenuEntry::ad_hoc(name.clone(), components.clone()));
    }
    result.typed = typed;

    debug!(
        components = result.all.len(),
        menu = result.menu.len(),
        overview = result.overview.len(),
        "classified components"
    );
    Ok(result)
}

fn build_component<R: Render>(
    options: &BuildOptions<'_, R>,
    path: &str,
    renderer: &R,
) -> Result<Component, ComponentError> {
    let parsed = naming::classify(path, options.root_name, options.template_extension);
    let file = options.component_dir.join(path);

    let template = fs::read_to_string(&file).map_err(|source| ComponentError::Io {
        path: file.clone(),
        source,
    })?;

    let companion = data::load_companion_data(&file, options.template_extension);
    let effective = data::merge(options.data, &companion);

    let content =
        renderer
            .render(&effective, options.partials)
            .map_err(|source| ComponentError::Render {
                path: path.to_string(),
                source,
            })?;

    Ok(Component {
        capitalized_name: naming::capitalize(&parsed.name),
        kind: parsed.kind,
        name: parsed.name,
        path: path.to_string(),
        template,
        content,
    })
}
