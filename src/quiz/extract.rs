//! Quiz block extraction
//!
//! Locates quiz blocks in page text:
//! <?quiz?>
//! ...body...
//! <?/quiz?>

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::core::util::line_at;

/// Literal start marker
pub const QUIZ_START_TAG: &str = "<?quiz?>";

/// Literal end marker
pub const QUIZ_END_TAG: &str = "<?/quiz?>";

/// Shortest match from a start marker to the next end marker, across newlines
pub static QUIZ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<\?quiz\?>(.*?)<\?/quiz\?>").expect("Invalid QUIZ_RE regex"));

/// One matched tag pair in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBlock<'a> {
    /// Exact matched text including both markers
    pub raw: &'a str,

    /// Text between the markers, unparsed
    pub body: &'a str,

    /// Byte span of `raw` within the document
    pub span: Range<usize>,

    /// 1-indexed line of the start marker
    pub start_line: u32,

    /// 1-indexed line of the end marker
    pub end_line: u32,
}

/// Find every non-overlapping quiz block, left to right
pub fn extract_blocks(document: &str) -> Vec<QuizBlock<'_>> {
    QUIZ_RE
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some(QuizBlock {
                raw: whole.as_str(),
                body: body.as_str(),
                span: whole.range(),
                start_line: line_at(document, whole.start()),
                end_line: line_at(document, whole.end().saturating_sub(1)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_blocks() {
        assert!(extract_blocks("# Just a page\n\nNothing here.").is_empty());
    }

    #[test]
    fn test_single_block_spans_lines() {
        let doc = "intro\n<?quiz?>\nquestion: Q\ncontent:\n<?/quiz?>\noutro";
        let blocks = extract_blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "\nquestion: Q\ncontent:\n");
        assert_eq!(&doc[blocks[0].span.clone()], blocks[0].raw);
        assert!(blocks[0].raw.starts_with(QUIZ_START_TAG));
        assert!(blocks[0].raw.ends_with(QUIZ_END_TAG));
        assert_eq!(blocks[0].start_line, 2);
        assert_eq!(blocks[0].end_line, 5);
    }

    #[test]
    fn test_two_blocks_are_not_merged() {
        let doc = "<?quiz?>a<?/quiz?>\nbetween\n<?quiz?>b<?/quiz?>";
        let blocks = extract_blocks(doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].body, "a");
        assert_eq!(blocks[1].body, "b");
        assert!(blocks[0].span.end < blocks[1].span.start);
    }

    #[test]
    fn test_unterminated_start_is_ignored() {
        let doc = "<?quiz?>\nquestion: dangling\n";
        assert!(extract_blocks(doc).is_empty());
    }

    #[test]
    fn test_stray_end_is_ignored() {
        let doc = "text <?/quiz?> more\n<?quiz?>x<?/quiz?>";
        let blocks = extract_blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "x");
    }

    #[test]
    fn test_nested_start_matches_to_first_end() {
        let doc = "<?quiz?>outer<?quiz?>inner<?/quiz?>tail<?/quiz?>";
        let blocks = extract_blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "outer<?quiz?>inner");
    }

    #[test]
    fn test_identical_blocks_have_distinct_spans() {
        let doc = "<?quiz?>same<?/quiz?>\n<?quiz?>same<?/quiz?>";
        let blocks = extract_blocks(doc);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].raw, blocks[1].raw);
        assert_ne!(blocks[0].span, blocks[1].span);
    }
}
