//! Single page flow
//!
//! Runs one page through both stages and reports what happened.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::file_reader::read_file_safe;
use crate::core::model::{LineRange, Meta, QuizError, ResultItem, ResultSet, Severity};
use crate::core::paths::display_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::hash_bytes;
use crate::page::{Page, QuizPlugin};

/// Final page text plus report items (page item first)
#[derive(Debug, Clone)]
pub struct PageOutput {
    pub text: String,
    pub items: Vec<ResultItem>,
}

impl PageOutput {
    /// Number of quiz blocks that failed to render
    pub fn failures(&self) -> usize {
        self.items.iter().filter(|i| i.is_error()).count()
    }

    pub fn rendered(&self) -> usize {
        self.items
            .first()
            .and_then(|page| page.meta.quizzes)
            .unwrap_or(0)
    }

    pub fn disabled(&self) -> bool {
        self.items.first().is_some_and(|page| page.meta.disabled)
    }
}

/// Run the markdown stage, then (optionally) the content stage
pub fn render_page(plugin: &QuizPlugin<'_>, path: &str, text: &str, with_assets: bool) -> PageOutput {
    let page = Page::parse(path, text);
    let processed = plugin.on_page_markdown(&page);

    let mut output = String::with_capacity(page.front_matter.len() + processed.text.len());
    output.push_str(page.front_matter);
    output.push_str(&processed.text);
    if with_assets {
        output = plugin.on_page_content(output, &page);
    }

    let offset = page.line_offset();
    let mut items = vec![ResultItem::page(path).with_meta(Meta {
        size: Some(output.len() as u64),
        hash: Some(hash_bytes(output.as_bytes())),
        quizzes: Some(processed.rendered()),
        disabled: page.quizzes_disabled(),
        ..Default::default()
    })];
    items.extend(processed.failures().map(|(outcome, err)| {
        ResultItem::error(
            Severity::Error,
            QuizError::new(
                err.code(),
                format!("quiz {} skipped: {}", outcome.sequence, err),
            ),
        )
        .with_path(path)
        .with_range(LineRange::new(
            outcome.start_line + offset,
            outcome.end_line + offset,
        ))
    }));

    PageOutput {
        text: output,
        items,
    }
}

/// Run the render command
pub fn run_render(
    root: &Path,
    file: &Path,
    output: Option<&Path>,
    with_assets: bool,
    plugin: &QuizPlugin<'_>,
    config: RenderConfig,
) -> Result<()> {
    let full_path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };
    let relative = display_path(&full_path, root);

    let read = read_file_safe(&full_path);
    for warning in &read.warnings {
        log::warn!("{}: {}", relative, warning.message);
    }
    let text = match read.content {
        Some(text) => text,
        None => anyhow::bail!(
            "Cannot render {}: {}",
            relative,
            read.skipped_reason().unwrap_or("unreadable")
        ),
    };

    let page = render_page(plugin, &relative, &text, with_assets);

    match output {
        Some(output) => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(output, &page.text)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            let result_set: ResultSet = page.items.into_iter().collect();
            Renderer::with_config(config).print(&result_set);
        }
        None => print!("{}", page.text),
    }

    Ok(())
}
