//! Page file reading
//!
//! Provides consistent handling for:
//! - Oversized pages
//! - Binary files
//! - Non-UTF-8 pages
//!
//! Page text is never truncated: a truncated page would be written back to
//! the output tree with its tail missing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::model::{QuizError, ResultItem, Severity};

/// Default maximum page size in bytes (16 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Number of leading bytes inspected for NUL when detecting binary files
const BINARY_SNIFF_LEN: usize = 8192;

/// Strategy for handling non-UTF-8 content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Skip non-UTF-8 pages entirely
    Skip,
    /// Replace invalid sequences with U+FFFD
    #[default]
    Lossy,
}

/// Configuration for page reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReadConfig {
    /// Maximum page size to process (bytes)
    pub max_file_size: u64,

    /// How to handle non-UTF-8 content
    pub encoding_strategy: EncodingStrategy,
}

impl Default for FileReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoding_strategy: EncodingStrategy::Lossy,
        }
    }
}

/// Warning codes for file operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningCode {
    FileSkippedSize,
    FileSkippedEncoding,
    FileUnreadable,
    LossyConversion,
    BinaryFile,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::FileSkippedSize => "FILE_SKIPPED_SIZE",
            WarningCode::FileSkippedEncoding => "FILE_SKIPPED_ENCODING",
            WarningCode::FileUnreadable => "FILE_UNREADABLE",
            WarningCode::LossyConversion => "LOSSY_CONVERSION",
            WarningCode::BinaryFile => "BINARY_FILE",
        }
    }
}

/// A structured warning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWarning {
    pub code: WarningCode,
    pub message: String,
}

impl FileWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Convert to a warning ResultItem attached to `path`
    pub fn to_result_item(&self, path: &str) -> ResultItem {
        ResultItem::error(
            Severity::Warning,
            QuizError::new(self.code.as_str(), &self.message),
        )
        .with_path(path)
    }
}

/// Result of reading a page
#[derive(Debug, Clone)]
pub struct FileReadResult {
    /// The page text (if successfully read)
    pub content: Option<String>,

    /// Size on disk in bytes
    pub size: Option<u64>,

    /// Whether lossy conversion was used
    pub lossy_conversion: bool,

    /// Warnings generated during reading
    pub warnings: Vec<FileWarning>,
}

impl FileReadResult {
    fn success(content: String, size: u64) -> Self {
        Self {
            content: Some(content),
            size: Some(size),
            lossy_conversion: false,
            warnings: Vec::new(),
        }
    }

    fn skipped(warning: FileWarning) -> Self {
        Self {
            content: None,
            size: None,
            lossy_conversion: false,
            warnings: vec![warning],
        }
    }

    pub fn skipped_reason(&self) -> Option<&str> {
        if self.content.is_some() {
            return None;
        }
        self.warnings.first().map(|w| w.message.as_str())
    }
}

/// Read a page with the given configuration
pub fn read_file_with_config(path: &Path, config: &FileReadConfig) -> FileReadResult {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            return FileReadResult::skipped(FileWarning::new(
                WarningCode::FileUnreadable,
                format!("Cannot read metadata: {}", e),
            ));
        }
    };

    let file_size = metadata.len();
    if file_size > config.max_file_size {
        return FileReadResult::skipped(FileWarning::new(
            WarningCode::FileSkippedSize,
            format!(
                "File exceeds size limit ({} > {} bytes)",
                file_size, config.max_file_size
            ),
        ));
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            return FileReadResult::skipped(FileWarning::new(
                WarningCode::FileUnreadable,
                format!("Cannot read file: {}", e),
            ));
        }
    };

    let check_len = std::cmp::min(BINARY_SNIFF_LEN, bytes.len());
    if bytes[..check_len].contains(&0) {
        return FileReadResult::skipped(FileWarning::new(
            WarningCode::BinaryFile,
            "File appears to be binary (contains null bytes)",
        ));
    }

    match String::from_utf8(bytes) {
        Ok(content) => FileReadResult::success(content, file_size),
        Err(err) => match config.encoding_strategy {
            EncodingStrategy::Skip => FileReadResult::skipped(FileWarning::new(
                WarningCode::FileSkippedEncoding,
                "File contains invalid UTF-8 sequences",
            )),
            EncodingStrategy::Lossy => {
                let content = String::from_utf8_lossy(err.as_bytes()).into_owned();
                let mut result = FileReadResult::success(content, file_size);
                result.lossy_conversion = true;
                result.warnings.push(FileWarning::new(
                    WarningCode::LossyConversion,
                    "Lossy UTF-8 conversion applied (some characters replaced)",
                ));
                result
            }
        },
    }
}

/// Convenience function with default config
pub fn read_file_safe(path: &Path) -> FileReadResult {
    read_file_with_config(path, &FileReadConfig::default())
}
