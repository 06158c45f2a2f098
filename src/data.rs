//! JSON data loading for template render contexts.
//!
//! Two sources feed the data a component is rendered with:
//!
//! ## Companion data
//!
//! A template may carry a JSON file next to it with the same stem: the
//! template suffix is swapped for `.json`, so `atoms/button.html.jinja` reads
//! `atoms/button.html.json`. Companion data is
//! optional. A missing or broken file simply contributes nothing, see
//! [`load_companion_data`].
//!
//! ## Aggregated data
//!
//! Site-wide data lives in JSON files matched by a glob pattern
//! (`data/**/*.json` by default). [`aggregate_data`] merges them into one
//! mapping keyed by file basename:
//!
//! ```text
//! data/global.json  {"title": "Kit"}      →  {
//! data/header.json  {"links": [...]}      →    "title": "Kit",
//!                                         →    "header": {"links": [...]}
//!                                         →  }
//! ```
//!
//! Files named `global.json` are special: their keys are merged into the top
//! level instead of being nested under `"global"`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::pattern::{self, PatternError};

/// A JSON object, the shape of every render context.
pub type Data = Map<String, Value>;

/// Basename that is merged into the top level of aggregated data.
const GLOBAL_KEY: &str = "global";

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Global data file must contain a JSON object: {0}")]
    GlobalNotObject(PathBuf),
}

/// Path of the companion JSON file for a template.
///
/// The trailing `.<template_extension>` is replaced: `button.html.jinja` →
/// `button.html.json`. A path without that suffix has no companion.
pub fn companion_path(template_path: &Path, template_extension: &str) -> Option<PathBuf> {
    let file_name = template_path.file_name()?.to_str()?;
    let stem = file_name.strip_suffix(&format!(".{template_extension}"))?;
    if stem.is_empty() {
        return None;
    }
    Some(template_path.with_file_name(format!("{stem}.json")))
}

/// Load the companion JSON object of a template.
///
/// Never fails: a path without the template suffix, a missing file, an
/// unreadable file, invalid JSON, or a JSON value that is not an object all
/// give an empty map.
pub fn load_companion_data(template_path: &Path, template_extension: &str) -> Data {
    let Some(path) = companion_path(template_path, template_extension) else {
        debug!(template = %template_path.display(), "no template suffix, no companion data");
        return Data::new();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no companion data");
            return Data::new();
        }
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            debug!(path = %path.display(), "companion data is not an object, ignored");
            Data::new()
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "invalid companion data, ignored");
            Data::new()
        }
    }
}

/// Shallow merge: keys of `overlay` replace keys of `base`.
pub fn merge(base: &Data, overlay: &Data) -> Data {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Merge every JSON file matched by `pattern` into one mapping.
///
/// - `global.json` files: keys merged into the top level, later files win
/// - any other file: stored under its basename, a later file with the same
///   basename replaces the earlier one entirely
///
/// No matches is not an error and yields an empty mapping.
pub fn aggregate_data(pattern: &str) -> Result<Data, DataError> {
    let files = pattern::resolve_pattern(pattern)?;
    debug!(pattern, files = files.len(), "aggregating data files");
    aggregate_files(&files)
}

/// Merge the given JSON files in order. See [`aggregate_data`].
pub fn aggregate_files(files: &[PathBuf]) -> Result<Data, DataError> {
    let mut data = Data::new();
    for file in files {
        let key = file_key(file);
        let value = read_json(file)?;
        if key == GLOBAL_KEY {
            match value {
                Value::Object(global) => data.extend(global),
                _ => return Err(DataError::GlobalNotObject(file.clone())),
            }
        } else {
            data.insert(key, value);
        }
    }
    Ok(data)
}

/// Basename of `path` without a `.json` extension.
fn file_key(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match name.strip_suffix(".json") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

fn read_json(path: &Path) -> Result<Value, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn object(value: Value) -> Data {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    // =========================================================================
    // Companion data
    // =========================================================================

    #[test]
    fn companion_path_replaces_template_suffix() {
        assert_eq!(
            companion_path(Path::new("atoms/button.html.jinja"), "jinja"),
            Some(PathBuf::from("atoms/button.html.json"))
        );
        assert_eq!(
            companion_path(Path::new("standalone.jinja"), "jinja"),
            Some(PathBuf::from("standalone.json"))
        );
    }

    #[test]
    fn companion_path_needs_template_suffix() {
        assert_eq!(companion_path(Path::new("atoms/button.html"), "jinja"), None);
        assert_eq!(companion_path(Path::new("atoms/.jinja"), "jinja"), None);
        assert_eq!(companion_path(Path::new("notjinja"), "jinja"), None);
    }

    #[test]
    fn companion_data_ignores_path_without_template_suffix() {
        let tmp = TempDir::new().unwrap();
        let atoms = tmp.path().join("atoms");
        fs::create_dir_all(&atoms).unwrap();
        fs::write(atoms.join("button.json"), r#"{"label": "Stray"}"#).unwrap();

        assert!(load_companion_data(&atoms.join("button.html"), "jinja").is_empty());
    }

    #[test]
    fn companion_data_read_when_present() {
        let tmp = TempDir::new().unwrap();
        let tpl = tmp.path().join("button.html.jinja");
        fs::write(&tpl, "<button>{{ label }}</button>").unwrap();
        fs::write(tmp.path().join("button.html.json"), r#"{"label": "Go"}"#).unwrap();

        assert_eq!(load_companion_data(&tpl, "jinja"), object(json!({"label": "Go"})));
    }

    #[test]
    fn companion_data_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tpl = tmp.path().join("atoms/button.html.jinja");
        assert!(load_companion_data(&tpl, "jinja").is_empty());
    }

    #[test]
    fn companion_data_invalid_json_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tpl = tmp.path().join("card.jinja");
        fs::write(tmp.path().join("card.json"), "{ not json").unwrap();
        assert!(load_companion_data(&tpl, "jinja").is_empty());
    }

    #[test]
    fn companion_data_non_object_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tpl = tmp.path().join("list.jinja");
        fs::write(tmp.path().join("list.json"), "[1, 2, 3]").unwrap();
        assert!(load_companion_data(&tpl, "jinja").is_empty());
    }

    // =========================================================================
    // merge()
    // =========================================================================

    #[test]
    fn merge_overlay_wins_and_base_is_untouched() {
        let base = object(json!({"a": 1, "b": {"x": 1}}));
        let overlay = object(json!({"b": {"y": 2}, "c": 3}));

        let merged = merge(&base, &overlay);
        assert_eq!(merged, object(json!({"a": 1, "b": {"y": 2}, "c": 3})));
        assert_eq!(base, object(json!({"a": 1, "b": {"x": 1}})));
    }

    // =========================================================================
    // aggregate_data()
    // =========================================================================

    #[test]
    fn global_merged_at_top_level() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("global.json"), r#"{"a": 1}"#).unwrap();
        fs::write(tmp.path().join("header.json"), r#"{"b": 2}"#).unwrap();

        let pattern = format!("{}/*.json", tmp.path().display());
        let data = aggregate_data(&pattern).unwrap();
        assert_eq!(data, object(json!({"a": 1, "header": {"b": 2}})));
    }

    #[test]
    fn later_global_wins_on_overlap() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a")).unwrap();
        fs::create_dir_all(tmp.path().join("b")).unwrap();
        fs::write(tmp.path().join("a/global.json"), r#"{"x": 1, "y": 1}"#).unwrap();
        fs::write(tmp.path().join("b/global.json"), r#"{"y": 2, "z": 2}"#).unwrap();

        let pattern = format!("{}/**/*.json", tmp.path().display());
        let data = aggregate_data(&pattern).unwrap();
        assert_eq!(data, object(json!({"x": 1, "y": 2, "z": 2})));
    }

    #[test]
    fn same_basename_replaces_entirely() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("one/nav.json");
        let second = tmp.path().join("two/nav.json");
        fs::create_dir_all(tmp.path().join("one")).unwrap();
        fs::create_dir_all(tmp.path().join("two")).unwrap();
        fs::write(&first, r#"{"x": 1, "y": 1}"#).unwrap();
        fs::write(&second, r#"{"y": 2}"#).unwrap();

        let data = aggregate_files(&[first, second]).unwrap();
        assert_eq!(data, object(json!({"nav": {"y": 2}})));
    }

    #[test]
    fn no_matches_is_empty() {
        let tmp = TempDir::new().unwrap();
        let pattern = format!("{}/*.json", tmp.path().display());
        assert!(aggregate_data(&pattern).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{").unwrap();

        let pattern = format!("{}/*.json", tmp.path().display());
        let result = aggregate_data(&pattern);
        assert!(matches!(result, Err(DataError::Json { .. })));
    }

    #[test]
    fn global_must_be_object() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("global.json"), "[1]").unwrap();

        let pattern = format!("{}/*.json", tmp.path().display());
        let result = aggregate_data(&pattern);
        assert!(matches!(result, Err(DataError::GlobalNotObject(_))));
    }

    #[test]
    fn non_object_values_kept_under_key() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("colors.json"), r#"["red", "blue"]"#).unwrap();

        let pattern = format!("{}/*.json", tmp.path().display());
        let data = aggregate_data(&pattern).unwrap();
        assert_eq!(data, object(json!({"colors": ["red", "blue"]})));
    }

    #[test]
    fn file_key_strips_json_only() {
        assert_eq!(file_key(Path::new("data/header.json")), "header");
        assert_eq!(file_key(Path::new("data/site.config.json")), "site.config");
        assert_eq!(file_key(Path::new("data/README")), "README");
    }
}
