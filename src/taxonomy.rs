//! The atomic-design taxonomy that orders the style-guide menu.
//!
//! The taxonomy is a fixed, ordered list of component categories. Each entry
//! says whether its components are surfaced on the overview page and which
//! icon the menu shows for it:
//!
//! ```text
//! atoms      overview   dot-single
//! molecules  overview   flow-line
//! organisms  overview   flow-tree
//! templates  -          file
//! pages      -          article
//! ```
//!
//! Top-level templates that live outside any category directory are grouped
//! under a caller-chosen root name. That root category is prepended to a
//! per-build copy of the table by [`with_root`], so the configured table
//! itself never changes between builds.

use serde::{Deserialize, Serialize};

/// One category of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxonomyEntry {
    pub name: String,
    /// Whether components of this category appear on the overview page.
    #[serde(default)]
    pub in_overview: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl TaxonomyEntry {
    pub fn new(name: &str, in_overview: bool, icon: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            in_overview,
            icon: icon.map(String::from),
        }
    }
}

/// The stock atomic-design table: atoms, molecules, organisms, templates, pages.
pub fn atomic() -> Vec<TaxonomyEntry> {
    vec![
        TaxonomyEntry::new("atoms", true, Some("dot-single")),
        TaxonomyEntry::new("molecules", true, Some("flow-line")),
        TaxonomyEntry::new("organisms", true, Some("flow-tree")),
        TaxonomyEntry::new("templates", false, Some("file")),
        TaxonomyEntry::new("pages", false, Some("article")),
    ]
}

/// Return a copy of `taxonomy` with a root category prepended.
///
/// The root category is always part of the overview and has no icon.
pub fn with_root(taxonomy: &[TaxonomyEntry], root_name: &str) -> Vec<TaxonomyEntry> {
    let mut entries = Vec::with_capacity(taxonomy.len() + 1);
    entries.push(TaxonomyEntry::new(root_name, true, None));
    entries.extend(taxonomy.iter().cloned());
    entries
}
