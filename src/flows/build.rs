//! Build flow
//!
//! Runs every markdown page of a docs tree through the page pipeline and
//! writes the results to an output directory with the same layout.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::backends::scan::{scan_pages, PageFile};
use crate::core::file_reader::read_file_safe;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::join_normalized;
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::page::render_page;
use crate::page::QuizPlugin;

/// Options for a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Subdirectory of root to build (defaults to root)
    pub scope: Option<PathBuf>,

    /// Output directory
    pub out: PathBuf,

    /// Run the content stage (append stylesheet/script)
    pub with_assets: bool,
}

/// Build statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub pages: usize,
    pub disabled: usize,
    pub skipped: usize,
    pub quizzes: usize,
    pub failures: usize,
}

impl BuildStats {
    fn record(&mut self, page: &PageResult) {
        match page {
            PageResult::Built {
                rendered,
                failures,
                disabled,
                ..
            } => {
                self.pages += 1;
                self.quizzes += rendered;
                self.failures += failures;
                if *disabled {
                    self.disabled += 1;
                }
            }
            PageResult::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// Outcome of building one page
#[derive(Debug)]
enum PageResult {
    Built {
        items: Vec<ResultItem>,
        rendered: usize,
        failures: usize,
        disabled: bool,
    },
    Skipped {
        items: Vec<ResultItem>,
    },
}

impl PageResult {
    fn into_items(self) -> Vec<ResultItem> {
        match self {
            PageResult::Built { items, .. } | PageResult::Skipped { items } => items,
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn build_page(plugin: &QuizPlugin<'_>, file: &PageFile, out: &Path, with_assets: bool) -> Result<PageResult> {
    let read = read_file_safe(&file.path);
    let mut items: Vec<_> = read
        .warnings
        .iter()
        .map(|w| w.to_result_item(&file.relative))
        .collect();

    let Some(text) = read.content else {
        log::warn!(
            "Skipping {}: {}",
            file.relative,
            read.skipped_reason().unwrap_or("unreadable")
        );
        return Ok(PageResult::Skipped { items });
    };

    let page = render_page(plugin, &file.relative, &text, with_assets);

    let target = join_normalized(out, &file.relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, &page.text)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    let rendered = page.rendered();
    let failures = page.failures();
    let disabled = page.disabled();
    items.extend(page.items);

    Ok(PageResult::Built {
        items,
        rendered,
        failures,
        disabled,
    })
}

/// Build every page under root (or scope) into `options.out`
pub fn build_site(root: &Path, plugin: &QuizPlugin<'_>, options: &BuildOptions) -> Result<(ResultSet, BuildStats)> {
    let source = resolve(root, options.scope.as_deref().unwrap_or(Path::new("")));
    let out = resolve(root, &options.out);

    let same_dir = match (source.canonicalize(), out.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    anyhow::ensure!(
        !same_dir,
        "Output directory {} would overwrite the source pages",
        out.display()
    );

    let pages = scan_pages(root, options.scope.as_deref(), Some(&out))?;
    log::debug!("Building {} pages into {}", pages.len(), out.display());

    #[cfg(feature = "parallel")]
    let results: Vec<PageResult> = pages
        .par_iter()
        .map(|file| build_page(plugin, file, &out, options.with_assets))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let results: Vec<PageResult> = pages
        .iter()
        .map(|file| build_page(plugin, file, &out, options.with_assets))
        .collect::<Result<_>>()?;

    let mut stats = BuildStats::default();
    let mut result_set = ResultSet::new();
    for page in results {
        stats.record(&page);
        result_set.extend(page.into_items());
    }

    result_set.sort();
    Ok((result_set, stats))
}

fn print_stats(stats: &BuildStats) {
    eprintln!("{}", "Build Statistics:".bold());
    eprintln!("   Pages: {}", stats.pages);
    eprintln!("   Quizzes: {}", stats.quizzes.to_string().green());
    if stats.disabled > 0 {
        eprintln!("   Disabled: {}", stats.disabled);
    }
    if stats.skipped > 0 {
        eprintln!("   Skipped: {}", stats.skipped.to_string().yellow());
    }
    if stats.failures > 0 {
        eprintln!("   Failed quizzes: {}", stats.failures.to_string().red());
    }
    eprintln!();
}

/// Run the build command
pub fn run_build(
    root: &Path,
    plugin: &QuizPlugin<'_>,
    options: BuildOptions,
    show_stats: bool,
    config: RenderConfig,
) -> Result<()> {
    let (result_set, stats) = build_site(root, plugin, &options)?;

    if show_stats {
        print_stats(&stats);
    }

    Renderer::with_config(config).print(&result_set);
    Ok(())
}
