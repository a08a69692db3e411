//! Page discovery backend
//!
//! Uses the ignore crate so `.gitignore` rules and hidden files are honoured.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::paths::{display_path, is_page};

/// A markdown page found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    /// Path on disk
    pub path: PathBuf,

    /// Path relative to root, '/'-separated
    pub relative: String,
}

/// Find markdown pages under root (or scope), sorted by relative path
///
/// Anything under `exclude` is skipped, so a build output directory inside
/// the source tree is never read back as input.
pub fn scan_pages(root: &Path, scope: Option<&Path>, exclude: Option<&Path>) -> Result<Vec<PageFile>> {
    let scan_path = match scope {
        Some(scope) if scope.is_absolute() => scope.to_path_buf(),
        Some(scope) => root.join(scope),
        None => root.to_path_buf(),
    };
    anyhow::ensure!(
        scan_path.exists(),
        "Scan path does not exist: {}",
        scan_path.display()
    );

    let mut builder = WalkBuilder::new(&scan_path);
    builder.hidden(true).git_ignore(true).git_global(true).git_exclude(true);

    if let Some(exclude) = exclude {
        let exclude = exclude.to_path_buf();
        builder.filter_entry(move |entry| !entry.path().starts_with(&exclude));
    }

    let mut pages = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_page(path) {
            continue;
        }

        pages.push(PageFile {
            path: path.to_path_buf(),
            relative: display_path(path, root),
        });
    }

    pages.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(pages)
}
