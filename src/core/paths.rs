//! Path normalization utilities
//!
//! All reported paths use '/' as separator and are relative to root.

use std::path::{Path, PathBuf};

/// File extensions treated as markdown pages
pub const PAGE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Normalize a path to use '/' as separator
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Relative path when under root, otherwise the normalized path as given
pub fn display_path(path: &Path, root: &Path) -> String {
    make_relative(path, root)
        .filter(|rel| !rel.is_empty())
        .unwrap_or_else(|| normalize_path(path))
}

/// Join a '/'-separated relative path onto a base directory
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// Check whether a path looks like a markdown page
pub fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_nested() {
        assert_eq!(normalize_path(Path::new("docs/guide/intro.md")), "docs/guide/intro.md");
    }

    #[test]
    fn test_make_relative() {
        let root = Path::new("/project");
        let path = Path::new("/project/docs/index.md");
        assert_eq!(make_relative(path, root), Some("docs/index.md".to_string()));
    }

    #[test]
    fn test_make_relative_not_under_root() {
        let root = Path::new("/project");
        assert_eq!(make_relative(Path::new("/other/index.md"), root), None);
    }

    #[test]
    fn test_display_path_falls_back() {
        let root = Path::new("/project");
        assert_eq!(display_path(Path::new("/other/a.md"), root), "/other/a.md");
        assert_eq!(display_path(Path::new("/project/a.md"), root), "a.md");
    }

    #[test]
    fn test_join_normalized() {
        let joined = join_normalized(Path::new("/site"), "guide/intro.md");
        assert_eq!(joined, Path::new("/site").join("guide").join("intro.md"));
    }

    #[test]
    fn test_is_page() {
        assert!(is_page(Path::new("index.md")));
        assert!(is_page(Path::new("notes/README.MD")));
        assert!(is_page(Path::new("a.markdown")));
        assert!(!is_page(Path::new("style.css")));
        assert!(!is_page(Path::new("Makefile")));
    }
}
