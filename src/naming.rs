//! Template path classification and display names.
//!
//! A template's place in the taxonomy comes entirely from its path:
//!
//! - `atoms/button.html.hbs` → type `atoms`, name `button`
//! - `molecules/media-card.html` → type `molecules`, name `media-card`
//! - `standalone.hbs` → type `<root>`, name `standalone`
//!
//! Paths containing `<dir>/<name>.html` are filed under the directory. Anything
//! else belongs to the root category, named after the path with its template
//! extension removed.
//!
//! ## Display Names
//!
//! Dash-separated names are turned into capitalized words for menus and
//! headings: `icon-button` → "Icon Button".

use std::sync::LazyLock;

use regex::Regex;

static CATEGORIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^/]+)/([^.]+)(\.html)").expect("valid regex"));

/// Result of classifying a template path.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentName {
    /// Category the component is filed under.
    pub kind: String,
    pub name: String,
}

/// Classify a template path into its category and component name.
///
/// `template_extension` is given without the leading dot (`"hbs"`).
pub fn classify(path: &str, root_name: &str, template_extension: &str) -> ComponentName {
    if let Some(caps) = CATEGORIZED.captures(path) {
        return ComponentName {
            kind: caps[1].to_string(),
            name: caps[2].to_string(),
        };
    }
    ComponentName {
        kind: root_name.to_string(),
        name: strip_template_extension(path, template_extension).to_string(),
    }
}

/// Remove a trailing `.<extension>` from `path`, if present.
pub fn strip_template_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    path.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(path)
}

/// Capitalize each dash-separated word and join them with spaces.
///
/// Only the first character of each word changes; the rest is kept as is.
pub fn capitalize(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
