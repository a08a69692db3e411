//! Quiz body parsing
//!
//! A quiz body is line oriented:
//! question: <text>
//! answer-correct: <text>
//! answer: <text>
//! content:
//! <raw html lines>

use thiserror::Error;

const QUESTION_PREFIX: &str = "question: ";
const CORRECT_PREFIX: &str = "answer-correct: ";
const ANSWER_PREFIX: &str = "answer: ";
const CONTENT_MARKER: &str = "content:";

/// Structural failure of a quiz body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("quiz content is empty")]
    Empty,
    #[error("quiz must start with 'question: '")]
    MissingQuestion,
    #[error("quiz must include 'content:' section")]
    MissingContentMarker,
}

impl FormatError {
    /// Stable code used in reports
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::Empty => "EMPTY_QUIZ",
            FormatError::MissingQuestion => "MISSING_QUESTION",
            FormatError::MissingContentMarker => "MISSING_CONTENT_MARKER",
        }
    }
}

/// One answer line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer<'a> {
    pub text: &'a str,
    pub is_correct: bool,
}

/// A structurally valid quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuiz<'a> {
    pub question: &'a str,
    pub answers: Vec<Answer<'a>>,
    pub content_lines: Vec<&'a str>,
}

impl<'a> ParsedQuiz<'a> {
    /// Checkbox rendering when more than one answer is correct
    pub fn is_multi_select(&self) -> bool {
        self.correct_count() > 1
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    /// Content lines joined with newlines, embedded as raw HTML
    pub fn content(&self) -> String {
        self.content_lines.join("\n")
    }
}

/// Only empty lines count as blank edges; whitespace-only lines are kept
fn is_blank(line: &str) -> bool {
    line.is_empty()
}

/// Parse the text between the quiz markers
pub fn parse_quiz(body: &str) -> Result<ParsedQuiz<'_>, FormatError> {
    let mut lines: Vec<&str> = body.lines().collect();

    let leading = lines.iter().take_while(|l| is_blank(l)).count();
    lines.drain(..leading);
    while lines.last().is_some_and(|l| is_blank(l)) {
        lines.pop();
    }

    let (first, rest) = lines.split_first().ok_or(FormatError::Empty)?;
    let question = first
        .strip_prefix(QUESTION_PREFIX)
        .ok_or(FormatError::MissingQuestion)?;

    let marker = rest
        .iter()
        .position(|l| *l == CONTENT_MARKER)
        .ok_or(FormatError::MissingContentMarker)?;

    let answers = rest[..marker]
        .iter()
        .filter_map(|line| {
            if let Some(text) = line.strip_prefix(CORRECT_PREFIX) {
                Some(Answer {
                    text,
                    is_correct: true,
                })
            } else {
                line.strip_prefix(ANSWER_PREFIX).map(|text| Answer {
                    text,
                    is_correct: false,
                })
            }
        })
        .collect();

    Ok(ParsedQuiz {
        question,
        answers,
        content_lines: rest[marker + 1..].to_vec(),
    })
}
