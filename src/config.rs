//! Style-guide configuration.
//!
//! Handles loading, validating, and merging `stylebook.toml`. The file lives
//! in the component directory and is sparse: it overrides only the stock
//! defaults it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Style Guide"         # Heading of the generated pages
//! root_name = "root"            # Category for top-level templates
//! template_extension = "jinja"  # Template files end in .jinja
//! data = "data/**/*.json"       # Shared data files, relative to this file
//! static_base = "/static"       # Prefix for relative asset paths
//! stylesheets = []              # <link> targets, relative or absolute URLs
//! scripts = []                  # <script> targets, relative or absolute URLs
//!
//! # Replaces the whole atomic-design table when present
//! [[taxonomy]]
//! name = "atoms"
//! in_overview = true
//! icon = "dot-single"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::taxonomy::{self, TaxonomyEntry};

/// Name of the config file inside the component directory.
pub const CONFIG_FILE: &str = "stylebook.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Style-guide configuration loaded from `stylebook.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylebookConfig {
    /// Heading and `<title>` of the generated pages.
    pub title: String,
    /// Category for templates that are not under `<dir>/<name>.html`.
    pub root_name: String,
    /// Extension of template files, without the leading dot.
    pub template_extension: String,
    /// Glob pattern of shared JSON data files, relative to the component dir.
    pub data: String,
    /// Base that relative stylesheet and script paths are joined onto.
    pub static_base: String,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    /// Ordered categories of the menu.
    pub taxonomy: Vec<TaxonomyEntry>,
}

impl Default for StylebookConfig {
    fn default() -> Self {
        Self {
            title: "Style Guide".to_string(),
            root_name: "root".to_string(),
            template_extension: "jinja".to_string(),
            data: "data/**/*.json".to_string(),
            static_base: "/static".to_string(),
            stylesheets: Vec::new(),
            scripts: Vec::new(),
            taxonomy: taxonomy::atomic(),
        }
    }
}

impl StylebookConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_name.trim().is_empty() {
            return Err(ConfigError::Validation("root_name must not be empty".into()));
        }
        if self.template_extension.is_empty() {
            return Err(ConfigError::Validation(
                "template_extension must not be empty".into(),
            ));
        }
        if self.template_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "template_extension must not start with a dot".into(),
            ));
        }
        if self.taxonomy.iter().any(|e| e.name.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "taxonomy entries must have a name".into(),
            ));
        }
        Ok(())
    }
}

/// The data pattern resolved against the component directory.
///
/// Absolute patterns are returned unchanged.
pub fn data_pattern(config: &StylebookConfig, component_dir: &Path) -> String {
    if Path::new(&config.data).is_absolute() {
        config.data.clone()
    } else {
        component_dir.join(&config.data).to_string_lossy().to_string()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(StylebookConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `stylebook.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<StylebookConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: StylebookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `stylebook.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<StylebookConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `stylebook.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Stylebook Configuration
# =======================
#
# Place this file in your component directory as stylebook.toml.
# Every key is optional; remove the ones you do not want to override.

# Heading and <title> of the generated style guide.
title = "Style Guide"

# Category for templates that are not inside a <category>/<name>.html path,
# e.g. components/intro.jinja.
root_name = "root"

# Extension of template files, without the leading dot.
# Files starting with an underscore (atoms/_icon.jinja) are partials.
template_extension = "jinja"

# Glob pattern of shared JSON data files, relative to this directory.
# Each file is available under its basename; global.json is merged
# into the top level.
data = "data/**/*.json"

# Relative stylesheet and script paths are joined onto this base.
# Absolute URLs (https://..., //cdn...) are used as is.
static_base = "/static"
stylesheets = []
scripts = []

# ---------------------------------------------------------------------------
# Taxonomy: ordered menu categories. Defining any [[taxonomy]] entry
# replaces the whole table. in_overview puts the category's components on
# the landing page. Categories not listed here still get a menu entry and
# always appear on the overview.
# ---------------------------------------------------------------------------

[[taxonomy]]
name = "atoms"
in_overview = true
icon = "dot-single"

[[taxonomy]]
name = "molecules"
in_overview = true
icon = "flow-line"

[[taxonomy]]
name = "organisms"
in_overview = true
icon = "flow-tree"

[[taxonomy]]
name = "templates"
in_overview = false
icon = "file"

[[taxonomy]]
name = "pages"
in_overview = false
icon = "article"
"##
}
