//! Renderer module
//!
//! Renders a ResultSet as jsonl, json, md or raw.

use crate::core::model::{Kind, ResultItem, ResultSet, Severity};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            pretty,
            ..Self::new(format)
        }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render and print to stdout
    pub fn print(&self, result_set: &ResultSet) {
        let output = self.render(result_set);
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    fn render_json(&self, result_set: &ResultSet) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items)
        } else {
            serde_json::to_string(&result_set.items)
        };
        rendered.unwrap_or_else(|_| "[]".to_string())
    }

    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut pages = Vec::new();
        let mut quizzes = Vec::new();
        let mut errors = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Page => pages.push(item),
                Kind::Quiz => quizzes.push(item),
                Kind::Error => errors.push(item),
            }
        }

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                let marker = match item.severity {
                    Some(Severity::Warning) => "warning",
                    _ => "error",
                };
                for error in &item.errors {
                    output.push_str(&format!("- **{}** ({}): {}", error.code, marker, error.message));
                    if let Some(path) = &item.path {
                        output.push_str(&format!(" `{}`", path));
                        if let Some(range) = &item.range {
                            output.push_str(&format!(":{}", range.start));
                        }
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !pages.is_empty() {
            output.push_str("## Pages\n\n");
            for item in pages {
                if let Some(path) = &item.path {
                    output.push_str(&format!("- `{}`", path));
                    if item.meta.disabled {
                        output.push_str(" (quizzes disabled)");
                    } else if let Some(count) = item.meta.quizzes {
                        output.push_str(&format!(" ({} quizzes)", count));
                    }
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        if !quizzes.is_empty() {
            output.push_str("## Quizzes\n\n");
            for item in quizzes {
                self.render_item_md(&mut output, item);
            }
            output.push('\n');
        }

        output
    }

    fn render_item_md(&self, output: &mut String, item: &ResultItem) {
        if let Some(path) = &item.path {
            output.push_str(&format!("### `{}`", path));
            if let Some(range) = &item.range {
                output.push_str(&format!(" (lines {}-{})", range.start, range.end));
            }
            output.push('\n');
        }

        if let Some(excerpt) = &item.excerpt {
            output.push_str(&format!("\n> {}\n", excerpt));
        }

        if item.meta.truncated {
            output.push_str("\n> (question truncated)\n");
        }

        output.push('\n');
    }

    /// Raw mode: excerpts only
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.excerpt.clone())
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LineRange, QuizError};

    fn renderer(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::new(format))
    }

    #[test]
    fn test_render_jsonl() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::page("docs/a.md"));
        result_set.push(ResultItem::page("docs/b.md"));

        let output = renderer(OutputFormat::Jsonl).render(&result_set);

        assert!(output.contains("docs/a.md"));
        assert!(output.contains("docs/b.md"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_render_json() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::page("a.md"));

        let output = renderer(OutputFormat::Json).render(&result_set);

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("MARKDOWN".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("raw".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "yaml".parse::<OutputFormat>();
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_json_pretty() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::page("a.md"));

        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render(&result_set);

        assert!(output.contains("  "));
    }

    #[test]
    fn test_render_markdown_empty() {
        let output = renderer(OutputFormat::Markdown).render(&ResultSet::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_markdown_pages() {
        let mut result_set = ResultSet::new();
        let mut page = ResultItem::page("index.md");
        page.meta.quizzes = Some(3);
        result_set.push(page);
        let mut disabled = ResultItem::page("off.md");
        disabled.meta.disabled = true;
        result_set.push(disabled);

        let output = renderer(OutputFormat::Markdown).render(&result_set);

        assert!(output.contains("## Pages"));
        assert!(output.contains("`index.md` (3 quizzes)"));
        assert!(output.contains("`off.md` (quizzes disabled)"));
    }

    #[test]
    fn test_render_markdown_quizzes() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::quiz(
            "index.md",
            LineRange::new(4, 10),
            "Are you ready?",
        ));

        let output = renderer(OutputFormat::Markdown).render(&result_set);

        assert!(output.contains("## Quizzes"));
        assert!(output.contains("lines 4-10"));
        assert!(output.contains("> Are you ready?"));
    }

    #[test]
    fn test_render_markdown_errors() {
        let mut result_set = ResultSet::new();
        result_set.push(
            ResultItem::error(
                Severity::Error,
                QuizError::new("MISSING_CONTENT_MARKER", "quiz must include 'content:' section"),
            )
            .with_path("a.md")
            .with_range(LineRange::new(7, 12)),
        );

        let output = renderer(OutputFormat::Markdown).render(&result_set);

        assert!(output.contains("## Errors"));
        assert!(output.contains("**MISSING_CONTENT_MARKER** (error)"));
        assert!(output.contains("`a.md`:7"));
    }

    #[test]
    fn test_render_raw() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::quiz("a.md", LineRange::new(1, 5), "first"));
        result_set.push(ResultItem::quiz("b.md", LineRange::new(1, 5), "second"));

        let output = renderer(OutputFormat::Raw).render(&result_set);

        assert_eq!(output, "first\n---\nsecond");
    }

    #[test]
    fn test_render_raw_no_excerpt() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::page("a.md"));
        assert!(renderer(OutputFormat::Raw).render(&result_set).is_empty());
    }
}
