//! Document transform
//!
//! Replaces every well-formed quiz block with its HTML fragment. Blocks are
//! replaced by byte span, so two byte-identical blocks are still handled
//! independently. A malformed block stays in the text verbatim.

use crate::quiz::extract::{extract_blocks, QuizBlock};
use crate::quiz::html::render;
use crate::quiz::parse::{parse_quiz, FormatError};

/// What happened to one matched block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// Zero-based position among all matched blocks in the document
    pub sequence: usize,

    /// 1-indexed lines of the start and end markers
    pub start_line: u32,
    pub end_line: u32,

    /// Assigned quiz id on success
    pub result: Result<usize, FormatError>,
}

/// Transformed text plus one outcome per matched block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub text: String,
    pub outcomes: Vec<BlockOutcome>,
}

impl ProcessedDocument {
    /// Number of quizzes rendered
    pub fn rendered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Blocks that failed to parse
    pub fn failures(&self) -> impl Iterator<Item = (&BlockOutcome, FormatError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.err().map(|err| (o, err)))
    }
}

/// Rendered fragment for a block, or the reason it was skipped
fn process_block(block: &QuizBlock<'_>, quiz_id: usize) -> Result<String, FormatError> {
    parse_quiz(block.body).map(|quiz| render(&quiz, quiz_id))
}

/// Transform every quiz block in `document`
///
/// Quiz ids start at zero for each document and advance only when a block
/// renders, so ids are dense over rendered quizzes.
pub fn process_document(document: &str) -> ProcessedDocument {
    let blocks = extract_blocks(document);
    let mut text = String::with_capacity(document.len());
    let mut outcomes = Vec::with_capacity(blocks.len());
    let mut cursor = 0;
    let mut next_id = 0;

    for (sequence, block) in blocks.iter().enumerate() {
        text.push_str(&document[cursor..block.span.start]);
        cursor = block.span.end;

        let result = match process_block(block, next_id) {
            Ok(fragment) => {
                text.push_str(&fragment);
                next_id += 1;
                Ok(next_id - 1)
            }
            Err(err) => {
                text.push_str(block.raw);
                Err(err)
            }
        };

        outcomes.push(BlockOutcome {
            sequence,
            start_line: block.start_line,
            end_line: block.end_line,
            result,
        });
    }
    text.push_str(&document[cursor..]);

    ProcessedDocument { text, outcomes }
}
