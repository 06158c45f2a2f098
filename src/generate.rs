//! Static style-guide generation.
//!
//! Takes a [`ComponentsResult`] and writes the browsable style guide.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): the overview, every overview component
//!   rendered in menu order
//! - **Category pages** (`/category-{slug}.html`): every component of one
//!   menu entry, each with its rendered preview and escaped template source.
//!   The prefix keeps a category named `index` off the overview page; two
//!   categories with the same slug are an error
//! - **Component listing** (`/components.json`): the full result, for tools
//!   that want to build their own pages
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── category-root.html
//! ├── category-atoms.html
//! ├── category-molecules.html
//! ├── category-widgets.html
//! └── components.json
//! ```
//!
//! ## Assets
//!
//! The style guide's own CSS (`static/stylebook.css`) is embedded at compile
//! time and inlined. Stylesheets and scripts from the config are linked after
//! it, so component previews pick up the project's styles. Relative asset
//! paths are joined onto `static_base`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Component previews are inserted unescaped; everything else is escaped.

use crate::assets;
use crate::components::{Component, ComponentsResult, MenuEntry};
use crate::config::StylebookConfig;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Categories {first:?} and {second:?} both map to {file}")]
    PageCollision {
        file: String,
        first: String,
        second: String,
    },
}

/// A page written by [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// File name relative to the output directory.
    pub file: String,
    pub components: usize,
}

const CSS: &str = include_str!("../static/stylebook.css");

/// Asset references resolved against the static base.
struct PageAssets {
    stylesheets: Vec<String>,
    scripts: Vec<String>,
}

/// Write the style guide into `output_dir`.
///
/// Returns the pages written, index first.
pub fn generate(
    result: &ComponentsResult,
    config: &StylebookConfig,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let files = page_files(&result.menu)?;
    fs::create_dir_all(output_dir)?;

    let assets = PageAssets {
        stylesheets: assets::normalize_asset_paths(&config.static_base, &config.stylesheets),
        scripts: assets::normalize_asset_paths(&config.static_base, &config.scripts),
    };

    let mut pages = Vec::with_capacity(result.menu.len() + 1);

    let index = render_index(result, config, &assets);
    fs::write(output_dir.join("index.html"), index.into_string())?;
    pages.push(GeneratedPage {
        title: "Overview".to_string(),
        file: "index.html".to_string(),
        components: result.overview.len(),
    });

    for (entry, file) in result.menu.iter().zip(files) {
        let page = render_category_page(entry, result, config, &assets);
        debug!(category = %entry.name, file = %file, "writing category page");
        fs::write(output_dir.join(&file), page.into_string())?;
        pages.push(GeneratedPage {
            title: crate::naming::capitalize(&entry.name),
            file,
            components: entry.components.len(),
        });
    }

    let json = serde_json::to_string_pretty(result)?;
    fs::write(output_dir.join("components.json"), json)?;

    Ok(pages)
}

/// File name of a category page: `atoms` → `category-atoms.html`.
pub fn page_file(category: &str) -> String {
    format!("category-{}.html", slug(category))
}

/// Page file of every menu entry, in menu order.
///
/// Fails when two categories slug to the same file.
fn page_files(menu: &[MenuEntry]) -> Result<Vec<String>, GenerateError> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut files = Vec::with_capacity(menu.len());
    for entry in menu {
        let file = page_file(&entry.name);
        if let Some(first) = seen.insert(file.clone(), &entry.name) {
            return Err(GenerateError::PageCollision {
                file,
                first: first.to_string(),
                second: entry.name.clone(),
            });
        }
        files.push(file);
    }
    Ok(files)
}

/// Anchor id of a component on its category page.
pub fn anchor(component: &Component) -> String {
    slug(&format!("{}-{}", component.kind, component.name))
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, assets: &PageAssets, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(CSS)) }
                @for href in &assets.stylesheets {
                    link rel="stylesheet" href=(href);
                }
            }
            body.stylebook {
                (content)
                @for src in &assets.scripts {
                    script src=(src) {}
                }
            }
        }
    }
}

/// Side menu: one link per category, with its components listed under it.
pub fn render_menu(title: &str, menu: &[MenuEntry], current: Option<&str>) -> Markup {
    html! {
        nav.sb-menu {
            h1 { a href="index.html" { (title) } }
            ul {
                @for entry in menu {
                    @let file = page_file(&entry.name);
                    @let is_current = current == Some(entry.name.as_str());
                    li data-icon=[entry.icon.as_deref()] {
                        a.current[is_current] href=(file) { (crate::naming::capitalize(&entry.name)) }
                        ul.sb-components {
                            @for component in &entry.components {
                                li {
                                    a href={ (file) "#" (anchor(component)) } {
                                        (component.capitalized_name)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_component(component: &Component, show_source: bool) -> Markup {
    html! {
        section.sb-component id=(anchor(component)) {
            header {
                (component.capitalized_name)
                " · "
                code { (component.path) }
            }
            div.sb-preview { (PreEscaped(&component.content)) }
            @if show_source {
                pre.sb-source { code { (component.template) } }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(result: &ComponentsResult, config: &StylebookConfig, assets: &PageAssets) -> Markup {
    let content = html! {
        (render_menu(&config.title, &result.menu, None))
        main.sb-main {
            h1 { (config.title) }
            @for component in &result.overview {
                (render_component(component, false))
            }
        }
    };
    base_document(&config.title, assets, content)
}

fn render_category_page(
    entry: &MenuEntry,
    result: &ComponentsResult,
    config: &StylebookConfig,
    assets: &PageAssets,
) -> Markup {
    let heading = crate::naming::capitalize(&entry.name);
    let content = html! {
        (render_menu(&config.title, &result.menu, Some(&entry.name)))
        main.sb-main {
            h1 { (heading) }
            @for component in &entry.components {
                (render_component(component, true))
            }
        }
    };
    base_document(&format!("{} · {}", heading, config.title), assets, content)
}
