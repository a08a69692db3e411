//! Quiz API - list quizzes across the docs tree

use anyhow::Result;
use serde_json::json;
use std::path::Path;

use crate::backends::scan::scan_pages;
use crate::core::file_reader::read_file_safe;
use crate::core::model::{LineRange, Meta, QuizError, ResultItem, ResultSet, Severity};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{hash_bytes, truncate_string};
use crate::page::Page;
use crate::quiz::extract::extract_blocks;
use crate::quiz::parse::parse_quiz;

/// Longest question excerpt emitted, in bytes
const MAX_EXCERPT_BYTES: usize = 200;

/// One item per quiz block in a page; malformed blocks become error items
pub fn list_page(page: &Page<'_>) -> Vec<ResultItem> {
    let offset = page.line_offset();
    let mut next_id = 0;

    extract_blocks(page.markdown)
        .into_iter()
        .enumerate()
        .map(|(sequence, block)| {
            let range = LineRange::new(block.start_line + offset, block.end_line + offset);
            match parse_quiz(block.body) {
                Ok(quiz) => {
                    let (excerpt, truncated) = truncate_string(quiz.question, MAX_EXCERPT_BYTES);
                    let item = ResultItem::quiz(page.path.as_str(), range, excerpt)
                        .with_data(json!({
                            "index": next_id,
                            "sequence": sequence,
                            "answers": quiz.answers.len(),
                            "correct": quiz.correct_count(),
                            "multi_select": quiz.is_multi_select(),
                        }))
                        .with_meta(Meta {
                            hash: Some(hash_bytes(block.body.as_bytes())),
                            truncated,
                            ..Default::default()
                        });
                    next_id += 1;
                    item
                }
                Err(err) => ResultItem::error(
                    Severity::Error,
                    QuizError::new(err.code(), err.to_string()),
                )
                .with_path(page.path.as_str())
                .with_range(range),
            }
        })
        .collect()
}

/// List all quizzes under root (or scope)
pub fn list_quizzes(root: &Path, scope: Option<&Path>) -> Result<ResultSet> {
    let mut result_set = ResultSet::new();

    for file in scan_pages(root, scope, None)? {
        let read = read_file_safe(&file.path);
        result_set.extend(
            read.warnings
                .iter()
                .map(|w| w.to_result_item(&file.relative)),
        );
        let Some(text) = read.content else {
            continue;
        };

        let page = Page::parse(file.relative.as_str(), &text);
        if page.quizzes_disabled() {
            continue;
        }
        result_set.extend(list_page(&page));
    }

    result_set.sort();
    Ok(result_set)
}

/// Run the list command
pub fn run_list(root: &Path, scope: Option<&Path>, config: RenderConfig) -> Result<()> {
    let result_set = list_quizzes(root, scope)?;
    log::debug!("Listed {} items", result_set.len());
    Renderer::with_config(config).print(&result_set);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use std::fs;
    use tempfile::tempdir;

    const PAGE: &str = "---
title: T
---
# Quizzes

<?quiz?>
question: First?
answer-correct: a
answer-correct: b
answer: c
content:
<?/quiz?>

<?quiz?>
broken
<?/quiz?>

<?quiz?>
question: Third?
answer: x
content:
<?/quiz?>
";

    #[test]
    fn test_list_page() {
        let page = Page::parse("doc.md", PAGE);
        let items = list_page(&page);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].kind, Kind::Quiz);
        assert_eq!(items[0].excerpt.as_deref(), Some("First?"));
        assert_eq!(items[0].range, Some(LineRange::new(6, 12)));
        let data = items[0].data.as_ref().unwrap();
        assert_eq!(data["answers"], 3);
        assert_eq!(data["correct"], 2);
        assert_eq!(data["multi_select"], true);
        assert_eq!(items[0].meta.hash.as_ref().map(String::len), Some(16));

        assert_eq!(items[1].kind, Kind::Error);
        assert_eq!(items[1].errors[0].code, "MISSING_QUESTION");

        // ids only advance over rendered quizzes
        assert_eq!(items[2].data.as_ref().unwrap()["index"], 1);
        assert_eq!(items[2].data.as_ref().unwrap()["sequence"], 2);
    }

    #[test]
    fn test_list_quizzes_skips_disabled_pages() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("on.md"), PAGE).unwrap();
        fs::write(
            temp.path().join("off.md"),
            PAGE.replace("title: T", "quiz: disable"),
        )
        .unwrap();

        let result = list_quizzes(temp.path(), None).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result
            .items
            .iter()
            .all(|i| i.path.as_deref() == Some("on.md")));
    }
}
