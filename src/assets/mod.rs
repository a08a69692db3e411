//! Stylesheet and script shared by every quiz page
//!
//! Assets are loaded once per process. The bundled copies are compiled into
//! the binary; `--assets-dir` replaces them with `quiz.css` and `quiz.js` read
//! from disk. If that read fails, the error is logged once and every page gets
//! empty assets instead of failing the build.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;

const BUNDLED_CSS: &str = include_str!("../../assets/quiz.css");
const BUNDLED_JS: &str = include_str!("../../assets/quiz.js");

pub const CSS_FILE: &str = "quiz.css";
pub const JS_FILE: &str = "quiz.js";

static ASSETS: OnceCell<Assets> = OnceCell::new();

/// Wrapped `<style>` and `<script>` text ready to append to a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    style: String,
    script: String,
}

impl Assets {
    pub fn from_text(css: &str, js: &str) -> Self {
        Self {
            style: format!(r#"<style type="text/css">{}</style>"#, css),
            script: format!(r#"<script type="text/javascript" defer>{}</script>"#, js),
        }
    }

    pub fn bundled() -> Self {
        Self::from_text(BUNDLED_CSS, BUNDLED_JS)
    }

    /// Degraded assets: nothing is appended to pages
    pub fn empty() -> Self {
        Self {
            style: String::new(),
            script: String::new(),
        }
    }

    /// Read `quiz.css` and `quiz.js` from a directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let css_path = dir.join(CSS_FILE);
        let js_path = dir.join(JS_FILE);
        let css = fs::read_to_string(&css_path)
            .with_context(|| format!("Failed to read {}", css_path.display()))?;
        let js = fs::read_to_string(&js_path)
            .with_context(|| format!("Failed to read {}", js_path.display()))?;
        Ok(Self::from_text(&css, &js))
    }

    /// Bundled assets, or the ones in `dir`, or empty assets if `dir` fails
    pub fn load(dir: Option<&Path>) -> Self {
        match dir {
            None => Self::bundled(),
            Some(dir) => Self::from_dir(dir).unwrap_or_else(|err| {
                log::error!("Failed to load CSS/JS resources: {:#}", err);
                Self::empty()
            }),
        }
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn is_empty(&self) -> bool {
        self.style.is_empty() && self.script.is_empty()
    }

    /// Style followed by script, as appended to a page
    pub fn snippet(&self) -> String {
        format!("{}{}", self.style, self.script)
    }
}

/// Initialize the process-wide assets. Only the first call loads anything.
pub fn init(dir: Option<&Path>) -> &'static Assets {
    if ASSETS.get().is_some() {
        log::debug!("Assets already initialized, ignoring reload");
    }
    ASSETS.get_or_init(|| Assets::load(dir))
}
