//! CLI output formatting.
//!
//! Output follows the menu: one header per category with its components
//! listed under it, each with its source path as an indented context line.
//!
//! ## Check
//!
//! ```text
//! Components
//! 001 Root (1)
//!     001 Intro
//!         Source: intro.jinja
//! 002 Atoms (2)
//!     001 Button
//!         Source: atoms/button.html.jinja
//!     002 Icon Button
//!         Source: atoms/icon-button.html.jinja
//! 003 Widgets (1) [ad-hoc]
//!     001 Carousel
//!         Source: widgets/carousel.html.jinja
//!
//! Overview: 4 components
//! ```
//!
//! ## Build
//!
//! ```text
//! Overview → index.html (4 components)
//! Root → category-root.html (1 component)
//! Atoms → category-atoms.html (2 components)
//!
//! Generated 3 pages, 6 components
//! ```
//!
//! Each stage has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::components::ComponentsResult;
use crate::generate::GeneratedPage;
use crate::naming;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the classified component listing.
pub fn format_check_output(result: &ComponentsResult) -> Vec<String> {
    let mut lines = vec!["Components".to_string()];

    for (i, entry) in result.menu.iter().enumerate() {
        let mut header = format!(
            "{} {} ({})",
            format_index(i + 1),
            naming::capitalize(&entry.name),
            entry.components.len()
        );
        if entry.is_ad_hoc() {
            header.push_str(" [ad-hoc]");
        }
        lines.push(header);

        for (j, component) in entry.components.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                component.capitalized_name
            ));
            lines.push(format!("{}Source: {}", indent(2), component.path));
        }
    }

    lines.push(String::new());
    lines.push(format!("Overview: {}", plural(result.overview.len(), "component")));
    lines
}

pub fn print_check_output(result: &ComponentsResult) {
    for line in format_check_output(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the list of generated pages.
pub fn format_build_output(pages: &[GeneratedPage], result: &ComponentsResult) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|p| {
            format!(
                "{} → {} ({})",
                p.title,
                p.file,
                plural(p.components, "component")
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(pages.len(), "page"),
        plural(result.all.len(), "component")
    ));
    lines
}

pub fn print_build_output(pages: &[GeneratedPage], result: &ComponentsResult) {
    for line in format_build_output(pages, result) {
        println!("{}", line);
    }
}
