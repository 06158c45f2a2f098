//! Asset path normalization.
//!
//! Stylesheets and scripts listed in the config are either absolute URLs
//! (served from a CDN) or paths relative to the static root. Relative paths
//! are joined onto the static base; URLs are left alone:
//!
//! ```text
//! static_base = "/static"
//! css/app.css                    → /static/css/app.css
//! /css/app.css                   → /static/css/app.css
//! https://cdn.example.com/a.js   → https://cdn.example.com/a.js
//! //cdn.example.com/a.js         → //cdn.example.com/a.js
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.\-]*:)?//").expect("valid regex"));

/// Whether `path` is an absolute URL (`scheme://...`) or protocol-relative (`//...`).
pub fn is_absolute_url(path: &str) -> bool {
    URL_SCHEME.is_match(path)
}

/// Join every non-URL path onto `static_base`. Returns a new list in input order.
pub fn normalize_asset_paths<S: AsRef<str>>(static_base: &str, paths: &[S]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            if is_absolute_url(p) {
                p.to_string()
            } else {
                join(static_base, p)
            }
        })
        .collect()
}

/// Join `path` onto `base`, folding `.` and `..` segments lexically.
///
/// A leading `/` on `path` does not discard `base`.
fn join(base: &str, path: &str) -> String {
    let joined = Path::new(base).join(path.trim_start_matches(['/', '\\']));
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if at_root {
                    if !out.has_root() {
                        out.push("..");
                    }
                } else if out.ends_with("..") {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        return ".".to_string();
    }
    out.to_string_lossy().to_string()
}
