//! Template rendering and discovery.
//!
//! The component builder does not know about any template engine. It sees
//! each template as something implementing [`Render`]: given the effective
//! data and the partials, produce HTML. Closures implement the trait, which
//! is what the unit tests use; [`JinjaTemplate`] implements it on top of
//! MiniJinja for the CLI. Every expression is HTML-escaped; use `|safe` to
//! insert markup from data.
//!
//! ## Discovery
//!
//! [`TemplateSet::load`] walks a component directory for files ending in the
//! configured template extension:
//!
//! ```text
//! components/
//! ├── stylebook.toml
//! ├── intro.jinja                # template, root category
//! ├── atoms/
//! │   ├── _icon.jinja            # partial (leading underscore)
//! │   ├── button.html.jinja      # template
//! │   └── button.html.json       # companion data
//! └── data/
//!     └── global.json
//! ```
//!
//! Partials are registered under their relative path, so a template pulls one
//! in with `{% include "atoms/_icon.jinja" %}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::data::Data;

/// Partial name → template source.
pub type Partials = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk {0}: {1}")]
    Walk(PathBuf, walkdir::Error),
}

/// Something that turns render data into HTML.
pub trait Render {
    fn render(&self, data: &Data, partials: &Partials) -> Result<String, RenderError>;
}

impl<F> Render for F
where
    F: Fn(&Data, &Partials) -> Result<String, RenderError>,
{
    fn render(&self, data: &Data, partials: &Partials) -> Result<String, RenderError> {
        self(data, partials)
    }
}

/// A MiniJinja template held as source text.
#[derive(Debug, Clone)]
pub struct JinjaTemplate {
    pub name: String,
    pub source: String,
}

impl Render for JinjaTemplate {
    fn render(&self, data: &Data, partials: &Partials) -> Result<String, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        for (name, source) in partials {
            env.add_template(name, source)?;
        }
        env.add_template(&self.name, &self.source)?;
        let html = env.get_template(&self.name)?.render(data)?;
        Ok(html)
    }
}

/// Templates and partials discovered in a component directory.
#[derive(Debug, Default)]
pub struct TemplateSet {
    pub templates: BTreeMap<String, JinjaTemplate>,
    pub partials: Partials,
}

impl TemplateSet {
    /// Walk `dir` for `*.<extension>` files, splitting them into templates and
    /// `_`-prefixed partials. Keys are `/`-separated paths relative to `dir`.
    pub fn load(dir: &Path, extension: &str) -> Result<TemplateSet, DiscoverError> {
        let suffix = format!(".{extension}");
        let mut set = TemplateSet::default();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| DiscoverError::Walk(dir.to_path_buf(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if file_name.starts_with('.') || !file_name.ends_with(&suffix) {
                continue;
            }

            let path = entry.path();
            let key = relative_key(path, dir);
            let source = fs::read_to_string(path).map_err(|source| DiscoverError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            if file_name.starts_with('_') {
                debug!(partial = %key, "discovered partial");
                set.partials.insert(key, source);
            } else {
                debug!(template = %key, "discovered template");
                set.templates.insert(
                    key.clone(),
                    JinjaTemplate {
                        name: key,
                        source,
                    },
                );
            }
        }
        Ok(set)
    }
}

/// `/`-separated path of `path` relative to `root`.
fn relative_key(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn data(value: serde_json::Value) -> Data {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn closure_renders() {
        let tpl = |d: &Data, _: &Partials| -> Result<String, RenderError> {
            Ok(format!("<b>{}</b>", d["label"].as_str().unwrap_or_default()))
        };
        let html = tpl.render(&data(json!({"label": "Hi"})), &Partials::new()).unwrap();
        assert_eq!(html, "<b>Hi</b>");
    }

    #[test]
    fn jinja_renders_data() {
        let tpl = JinjaTemplate {
            name: "atoms/button.html.jinja".into(),
            source: "<button>{{ label }}</button>".into(),
        };
        let html = tpl.render(&data(json!({"label": "Go"})), &Partials::new()).unwrap();
        assert_eq!(html, "<button>Go</button>");
    }

    #[test]
    fn jinja_includes_partials() {
        let mut partials = Partials::new();
        partials.insert("atoms/_icon.jinja".into(), "<i class=\"{{ icon }}\"></i>".into());
        let tpl = JinjaTemplate {
            name: "atoms/link.html.jinja".into(),
            source: "<a>{% include \"atoms/_icon.jinja\" %}</a>".into(),
        };
        let html = tpl.render(&data(json!({"icon": "star"})), &partials).unwrap();
        assert_eq!(html, "<a><i class=\"star\"></i></a>");
    }

    #[test]
    fn jinja_escapes_data() {
        let tpl = JinjaTemplate {
            name: "atoms/text.html.jinja".into(),
            source: "<p>{{ t }}</p>".into(),
        };
        let html = tpl
            .render(&data(json!({"t": "<script>x</script>"})), &Partials::new())
            .unwrap();
        assert!(html.starts_with("<p>&lt;script&gt;x"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn jinja_safe_filter_skips_escaping() {
        let tpl = JinjaTemplate {
            name: "atoms/raw.html.jinja".into(),
            source: "<div>{{ body|safe }}</div>".into(),
        };
        let html = tpl
            .render(&data(json!({"body": "<em>hi</em>"})), &Partials::new())
            .unwrap();
        assert_eq!(html, "<div><em>hi</em></div>");
    }

    #[test]
    fn jinja_loops_over_lists() {
        let tpl = JinjaTemplate {
            name: "molecules/list.html.jinja".into(),
            source: "<ul>{% for item in items %}<li>{{ item }}</li>{% endfor %}</ul>".into(),
        };
        let html = tpl
            .render(&data(json!({"items": ["a", "b"]})), &Partials::new())
            .unwrap();
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn jinja_syntax_error_is_error() {
        let tpl = JinjaTemplate {
            name: "broken.jinja".into(),
            source: "{% if %}".into(),
        };
        let result = tpl.render(&Data::new(), &Partials::new());
        assert!(matches!(result, Err(RenderError::Template(_))));
    }

    #[test]
    fn load_splits_templates_and_partials() {
        let tmp = TempDir::new().unwrap();
        let atoms = tmp.path().join("atoms");
        fs::create_dir_all(&atoms).unwrap();
        fs::write(atoms.join("button.html.jinja"), "<button></button>").unwrap();
        fs::write(atoms.join("button.html.json"), "{}").unwrap();
        fs::write(atoms.join("_icon.jinja"), "<i></i>").unwrap();
        fs::write(tmp.path().join("intro.jinja"), "<p></p>").unwrap();
        fs::write(tmp.path().join(".hidden.jinja"), "").unwrap();

        let set = TemplateSet::load(tmp.path(), "jinja").unwrap();
        let names: Vec<&str> = set.templates.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["atoms/button.html.jinja", "intro.jinja"]);
        assert_eq!(
            set.partials.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["atoms/_icon.jinja"]
        );
        assert_eq!(set.templates["intro.jinja"].source, "<p></p>");
    }

    #[test]
    fn load_missing_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = TemplateSet::load(&tmp.path().join("missing"), "jinja");
        assert!(matches!(result, Err(DiscoverError::Walk(..))));
    }
}
