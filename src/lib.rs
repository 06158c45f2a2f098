//! # Stylebook
//!
//! A static style-guide generator for component libraries organized by
//! atomic design. Your component directory is the data source: directories
//! become categories, templates become components, and JSON files next to
//! them become their example data.
//!
//! # Pipeline
//!
//! ```text
//! 1. Discover   components/  →  templates + partials       (render::TemplateSet)
//! 2. Aggregate  data/**.json →  shared render data         (data::aggregate_data)
//! 3. Build      templates    →  ComponentsResult           (components::build_components)
//! 4. Generate   result       →  dist/*.html, components.json (generate::generate)
//! ```
//!
//! Only step 3 is required to use the library. It works with any template
//! engine through the [`render::Render`] trait; steps 1 and 4 are what the
//! `stylebook` binary plugs around it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`components`] | Renders templates and classifies them into menu, overview and per-type listings |
//! | [`taxonomy`] | The atomic-design category table and root-category handling |
//! | [`naming`] | Template path → category and name; display-name capitalization |
//! | [`data`] | Companion JSON lookup and glob-driven data aggregation |
//! | [`pattern`] | Glob pattern resolution over the file system |
//! | [`assets`] | Joins asset paths onto the static base, passing URLs through |
//! | [`render`] | The `Render` seam, a MiniJinja renderer and template discovery |
//! | [`config`] | `stylebook.toml` loading, merging and validation |
//! | [`generate`] | Writes the HTML style guide using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Naming Conventions Over Configuration
//!
//! A template at `atoms/button.html.jinja` is the atom "Button". Nothing else
//! has to be declared. Templates outside a `<category>/<name>.html` path fall
//! into the root category, and directories that are not in the taxonomy still
//! get their own menu entry.
//!
//! ## Builds Are Independent
//!
//! The taxonomy is configuration, not state: every build prepends the root
//! category to its own copy. Likewise, each component renders with its own
//! merge of shared and companion data. Building twice, or in a different
//! order, yields the same result.
//!
//! ## Companion Data Is Optional
//!
//! A component without a JSON file, or with a broken one, renders with the
//! shared data only. Every other failure (unreadable template, render error,
//! bad data file) stops the build.

pub mod assets;
pub mod components;
pub mod config;
pub mod data;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pattern;
pub mod render;
pub mod taxonomy;

#[cfg(test)]
pub(crate) mod test_helpers;
