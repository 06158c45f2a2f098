//! Glob pattern resolution.
//!
//! Turns a shell-style pattern such as `data/**/*.json` into the list of
//! matching files. The literal directory prefix of the pattern (`data/`) is
//! walked with `walkdir`, following symlinks; every file below it is tested
//! against a `globset` matcher built from the whole pattern.
//!
//! Supported syntax:
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `*` | any run of characters except `/` |
//! | `?` | one character except `/` |
//! | `**/` | zero or more directories |
//! | `**` | anything, including `/` |
//! | `[abc]`, `[!abc]` | character class, negated with `!` |
//! | `{a,b}` | either alternative |

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;
use tracing::{trace, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern {pattern}: {source}")]
    Invalid {
        pattern: String,
        source: globset::Error,
    },
}

/// Resolve `pattern` to the files it matches.
///
/// Files are returned in walk order, sorted by name within each directory.
/// Symlinked files and directories are followed. A pattern whose base
/// directory does not exist matches nothing.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>, PatternError> {
    let pattern = pattern.replace('\\', "/");
    let matcher = compile(&pattern)?;
    let base = literal_base(&pattern);

    let walk_root = if base.is_empty() { "." } else { base.as_str() };
    if !Path::new(walk_root).exists() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(walk_root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let candidate = if base.is_empty() {
            path.strip_prefix(".").unwrap_or(path)
        } else {
            path
        };
        if matcher.is_match(candidate) {
            trace!(path = %candidate.display(), "pattern match");
            matches.push(path.to_path_buf());
        }
    }
    Ok(matches)
}

/// Compile a glob pattern. `*` and `?` never match `/`.
pub fn compile(pattern: &str) -> Result<GlobMatcher, PatternError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        })
}

/// The leading directories of `pattern` that contain no glob syntax.
///
/// `data/**/*.json` → `data`, `/srv/site/*.json` → `/srv/site`, `*.json` → ``.
fn literal_base(pattern: &str) -> String {
    let segments: Vec<&str> = pattern.split('/').collect();
    let literal: Vec<&str> = segments[..segments.len() - 1]
        .iter()
        .take_while(|s| !s.contains(['*', '?', '[', '{']))
        .copied()
        .collect();

    match literal.as_slice() {
        [] => String::new(),
        [""] => "/".to_string(),
        parts => parts.join("/"),
    }
}
