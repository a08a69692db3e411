//! Page pipeline
//!
//! A page goes through two stages, in order:
//! - markdown stage: quiz blocks in the page body become HTML fragments
//! - content stage: the shared stylesheet and script are appended
//!
//! A page whose metadata says `quiz: disable` passes both stages untouched.

pub mod meta;

use crate::assets::Assets;
use crate::quiz::document::{process_document, ProcessedDocument};

pub use meta::PageMeta;

/// One page of the documentation tree
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// Path used in logs and reports
    pub path: String,

    pub meta: PageMeta,

    /// Front matter block including delimiters, empty when absent
    pub front_matter: &'a str,

    /// Page text after the front matter
    pub markdown: &'a str,
}

impl<'a> Page<'a> {
    /// Split off the front matter and read it as YAML
    ///
    /// Malformed front matter is logged and treated as empty metadata; it still
    /// passes through to the output untouched.
    pub fn parse(path: impl Into<String>, text: &'a str) -> Self {
        let path = path.into();
        let (front_matter, markdown) = meta::split_front_matter(text);
        let meta = meta::parse_meta(front_matter).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed front matter in {}: {}", path, err);
            PageMeta::default()
        });
        Self {
            path,
            meta,
            front_matter,
            markdown,
        }
    }

    /// Lines occupied by front matter, to map body lines back to file lines
    pub fn line_offset(&self) -> u32 {
        self.front_matter.matches('\n').count() as u32
    }

    pub fn quizzes_disabled(&self) -> bool {
        self.meta.quizzes_disabled()
    }
}

/// Quiz handling for the two page stages
#[derive(Debug, Clone, Copy)]
pub struct QuizPlugin<'a> {
    assets: &'a Assets,
}

impl<'a> QuizPlugin<'a> {
    pub fn new(assets: &'a Assets) -> Self {
        Self { assets }
    }

    /// Markdown stage: replace quiz blocks in the page body
    ///
    /// Failed blocks are logged and left in place. The returned text does not
    /// include the front matter.
    pub fn on_page_markdown(&self, page: &Page<'_>) -> ProcessedDocument {
        if page.quizzes_disabled() {
            log::info!("Quizzes disabled for {}", page.path);
            return ProcessedDocument {
                text: page.markdown.to_string(),
                outcomes: Vec::new(),
            };
        }

        let processed = process_document(page.markdown);
        for (outcome, err) in processed.failures() {
            log::error!(
                "Failed to process quiz {} in {} (line {}): {}",
                outcome.sequence,
                page.path,
                outcome.start_line + page.line_offset(),
                err
            );
        }
        log::debug!(
            "{}: rendered {} of {} quizzes",
            page.path,
            processed.rendered(),
            processed.outcomes.len()
        );
        processed
    }

    /// Content stage: append the stylesheet and script
    pub fn on_page_content(&self, mut html: String, page: &Page<'_>) -> String {
        if page.quizzes_disabled() {
            return html;
        }
        html.push_str(self.assets.style());
        html.push_str(self.assets.script());
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = "<?quiz?>\nquestion: Q\nanswer-correct: A\ncontent:\n<?/quiz?>\n";

    fn assets() -> Assets {
        Assets::from_text("p{}", "let x;")
    }

    #[test]
    fn test_page_parse_splits_front_matter() {
        let text = "---\ntitle: T\n---\n# Body\n";
        let page = Page::parse("a.md", text);
        assert_eq!(page.front_matter, "---\ntitle: T\n---\n");
        assert_eq!(page.markdown, "# Body\n");
        assert_eq!(page.line_offset(), 3);
        assert_eq!(page.meta.get("title"), Some("T"));
    }

    #[test]
    fn test_malformed_front_matter_keeps_quizzes_enabled() {
        let assets = assets();
        let plugin = QuizPlugin::new(&assets);
        let text = format!("---\nquiz: [disable\n---\n{}", QUIZ);
        let page = Page::parse("a.md", &text);

        assert_eq!(page.meta, PageMeta::default());
        assert_eq!(page.front_matter, "---\nquiz: [disable\n---\n");
        assert!(!page.quizzes_disabled());
        assert_eq!(plugin.on_page_markdown(&page).rendered(), 1);
    }

    #[test]
    fn test_commented_disable_flag_is_honoured() {
        let assets = assets();
        let plugin = QuizPlugin::new(&assets);
        let text = format!("---\nquiz: disable  # raw syntax page\n---\n{}", QUIZ);
        let page = Page::parse("a.md", &text);

        assert!(page.quizzes_disabled());
        assert_eq!(plugin.on_page_markdown(&page).text, QUIZ);
    }

    #[test]
    fn test_markdown_stage_renders_quizzes() {
        let assets = assets();
        let plugin = QuizPlugin::new(&assets);
        let page = Page::parse("a.md", QUIZ);
        let out = plugin.on_page_markdown(&page);
        assert_eq!(out.rendered(), 1);
        assert!(out.text.starts_with(r#"<div class="quiz">"#));
    }

    #[test]
    fn test_disabled_page_is_untouched_by_both_stages() {
        let assets = assets();
        let plugin = QuizPlugin::new(&assets);
        let text = format!("---\nquiz: disable\n---\n{}", QUIZ);
        let page = Page::parse("a.md", &text);

        let out = plugin.on_page_markdown(&page);
        assert_eq!(out.text, QUIZ);
        assert!(out.outcomes.is_empty());

        let html = plugin.on_page_content("<p>page</p>".to_string(), &page);
        assert_eq!(html, "<p>page</p>");
    }

    #[test]
    fn test_content_stage_appends_assets() {
        let assets = assets();
        let plugin = QuizPlugin::new(&assets);
        let page = Page::parse("a.md", "text");
        let html = plugin.on_page_content("<p>page</p>".to_string(), &page);
        assert_eq!(
            html,
            r#"<p>page</p><style type="text/css">p{}</style><script type="text/javascript" defer>let x;</script>"#
        );
    }

    #[test]
    fn test_content_stage_with_empty_assets() {
        let assets = Assets::empty();
        let plugin = QuizPlugin::new(&assets);
        let page = Page::parse("a.md", "text");
        assert_eq!(plugin.on_page_content("x".to_string(), &page), "x");
    }
}
