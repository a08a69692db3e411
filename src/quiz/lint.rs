//! Quiz linting module
//!
//! Checks for:
//! - start/end marker pairing
//! - start markers inside an open block
//! - blocks that fail to parse (empty, missing question, missing content marker)

use anyhow::Result;
use std::path::Path;

use crate::backends::scan::scan_pages;
use crate::core::file_reader::read_file_safe;
use crate::core::model::{LineRange, QuizError, ResultItem, ResultSet, Severity};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::line_at;
use crate::page::Page;
use crate::quiz::extract::{extract_blocks, QUIZ_END_TAG, QUIZ_START_TAG};
use crate::quiz::parse::parse_quiz;

/// A lint issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub path: String,
    pub line: u32,
}

impl LintIssue {
    pub fn error(code: &str, message: impl Into<String>, path: &str, line: u32) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.into(),
            path: path.to_string(),
            line,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, path: &str, line: u32) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.into(),
            path: path.to_string(),
            line,
        }
    }

    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::error(self.severity, QuizError::new(&self.code, &self.message))
            .with_path(&self.path)
            .with_range(LineRange::new(self.line, self.line))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

/// Marker positions in document order
fn markers(text: &str) -> Vec<(usize, Marker)> {
    let mut found: Vec<_> = text
        .match_indices(QUIZ_START_TAG)
        .map(|(pos, _)| (pos, Marker::Start))
        .chain(
            text.match_indices(QUIZ_END_TAG)
                .map(|(pos, _)| (pos, Marker::End)),
        )
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found
}

/// Check for unpaired start/end markers
///
/// Pairing follows the extractor: a start marker is closed by the next end
/// marker, and a start seen while a block is open does not open a new one.
fn check_pairing(text: &str, path: &str, line_offset: u32) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut open: Option<u32> = None;

    for (pos, marker) in markers(text) {
        let line = line_at(text, pos) + line_offset;
        match (marker, open) {
            (Marker::Start, None) => open = Some(line),
            (Marker::Start, Some(outer)) => issues.push(LintIssue::warning(
                "NESTED_QUIZ_START",
                format!("Quiz start marker inside the quiz opened on line {}", outer),
                path,
                line,
            )),
            (Marker::End, Some(_)) => open = None,
            (Marker::End, None) => issues.push(LintIssue::error(
                "UNMATCHED_END_TAG",
                "Quiz end marker has no matching start marker",
                path,
                line,
            )),
        }
    }

    if let Some(line) = open {
        issues.push(LintIssue::error(
            "UNTERMINATED_QUIZ",
            "Quiz start marker has no matching end marker",
            path,
            line,
        ));
    }

    issues
}

/// Lint the quiz blocks of one page
pub fn lint_page(page: &Page<'_>) -> Vec<LintIssue> {
    if page.quizzes_disabled() {
        return Vec::new();
    }

    let offset = page.line_offset();
    let mut issues = check_pairing(page.markdown, &page.path, offset);

    for block in extract_blocks(page.markdown) {
        if let Err(err) = parse_quiz(block.body) {
            issues.push(LintIssue::error(
                err.code(),
                err.to_string(),
                &page.path,
                block.start_line + offset,
            ));
        }
    }

    issues.sort_by_key(|issue| issue.line);
    issues
}

/// Lint all pages under root (or scope)
pub fn lint_pages(root: &Path, scope: Option<&Path>) -> Result<ResultSet> {
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
        result_set.extend(lint_page(&page).iter().map(LintIssue::to_result_item));
    }

    result_set.sort();
    Ok(result_set)
}

/// Run the lint command
///
/// Returns whether the lint is clean of error-severity issues.
pub fn run_lint(root: &Path, scope: Option<&Path>, config: RenderConfig) -> Result<bool> {
    let result_set = lint_pages(root, scope)?;
    if result_set.is_empty() {
        log::info!("No quiz issues found");
    }
    Renderer::with_config(config).print(&result_set);
    Ok(result_set.error_count() == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn lint(text: &str) -> Vec<LintIssue> {
        lint_page(&Page::parse("doc.md", text))
    }

    fn codes(issues: &[LintIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.code.as_str()).collect()
    }

    #[test]
    fn test_valid_quiz_is_clean() {
        let text = "<?quiz?>\nquestion: Q\nanswer-correct: A\ncontent:\n<?/quiz?>\n";
        assert!(lint(text).is_empty());
    }

    #[test]
    fn test_unterminated_quiz() {
        let issues = lint("intro\n<?quiz?>\nquestion: Q\n");
        assert_eq!(codes(&issues), vec!["UNTERMINATED_QUIZ"]);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_unmatched_end_tag() {
        let issues = lint("text\n\n<?/quiz?>\n");
        assert_eq!(codes(&issues), vec!["UNMATCHED_END_TAG"]);
        assert_eq!(issues[0].line, 3);
    }

    #[test]
    fn test_nested_start_is_a_warning() {
        let text = "<?quiz?>\n<?quiz?>\nquestion: Q\ncontent:\n<?/quiz?>\n<?/quiz?>\n";
        let issues = lint(text);
        assert_eq!(
            codes(&issues),
            vec!["MISSING_QUESTION", "NESTED_QUIZ_START", "UNMATCHED_END_TAG"]
        );
        assert_eq!(issues[1].severity, Severity::Warning);
    }

    #[test]
    fn test_parse_errors_are_reported_with_lines() {
        let text = "<?quiz?>\n\n<?/quiz?>\n\n<?quiz?>\nquestion: Q\n<?/quiz?>\n";
        let issues = lint(text);
        assert_eq!(codes(&issues), vec!["EMPTY_QUIZ", "MISSING_CONTENT_MARKER"]);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[1].line, 5);
    }

    #[test]
    fn test_lines_account_for_front_matter() {
        let text = "---\ntitle: T\n---\n<?quiz?>\nquestion: Q\n<?/quiz?>\n";
        let issues = lint(text);
        assert_eq!(issues[0].line, 4);
    }

    #[test]
    fn test_disabled_page_is_skipped() {
        let text = "---\nquiz: disable\n---\n<?quiz?>\n";
        assert!(lint(text).is_empty());
    }

    #[test]
    fn test_lint_pages_walks_markdown_only() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("bad.md"), "<?quiz?>\nnope\n<?/quiz?>\n").unwrap();
        fs::write(temp.path().join("bad.txt"), "<?quiz?>\nnope\n<?/quiz?>\n").unwrap();

        let result = lint_pages(temp.path(), None).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].path.as_deref(), Some("bad.md"));
        assert_eq!(result.error_count(), 1);
    }
}
