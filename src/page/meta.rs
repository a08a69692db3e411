//! Page metadata from front matter
//!
//! ---
//! title: Intro
//! quiz: disable
//! ---

use serde_yaml::Value;
use std::collections::BTreeMap;

/// Metadata key that controls quiz processing for a page
pub const QUIZ_KEY: &str = "quiz";

/// Value of `QUIZ_KEY` that turns quiz processing off
pub const QUIZ_DISABLE: &str = "disable";

/// Top-level front matter mapping of a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    entries: BTreeMap<String, Value>,
}

impl PageMeta {
    /// String value of a top-level key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// True when the page opts out with `quiz: disable`
    pub fn quizzes_disabled(&self) -> bool {
        self.get(QUIZ_KEY) == Some(QUIZ_DISABLE)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

fn is_closing(line: &str) -> bool {
    let line = line.trim_end();
    line == "---" || line == "..."
}

/// Split text into (front matter with delimiters, body)
///
/// Front matter is only recognized when the very first line is `---`. An
/// unclosed block is treated as body text.
pub fn split_front_matter(text: &str) -> (&str, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return ("", text);
    };
    if !is_delimiter(first) {
        return ("", text);
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if is_closing(line) {
            return text.split_at(offset);
        }
    }

    ("", text)
}

/// YAML text between the opening and closing delimiter lines
fn yaml_body(front_matter: &str) -> &str {
    let Some((_, rest)) = front_matter.split_once('\n') else {
        return "";
    };
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    match rest.rfind('\n') {
        Some(pos) => &rest[..=pos],
        None => "",
    }
}

/// Parse a front matter block (delimiters included) as YAML
///
/// An empty block, or one whose top level is not a mapping, yields empty
/// metadata. Non-string keys are skipped.
pub fn parse_meta(front_matter: &str) -> Result<PageMeta, serde_yaml::Error> {
    let body = yaml_body(front_matter);
    if body.trim().is_empty() {
        return Ok(PageMeta::default());
    }

    let entries = match serde_yaml::from_str::<Value>(body)? {
        Value::Mapping(mapping) => mapping
            .into_iter()
            .filter_map(|(key, value)| key.as_str().map(|key| (key.to_string(), value)))
            .collect(),
        _ => BTreeMap::new(),
    };

    Ok(PageMeta { entries })
}
