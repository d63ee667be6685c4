//! Sanitization rule sets and the strict-mode error.

use thiserror::Error;

use super::{INVALID_CHARACTERS, INVALID_FILENAME_CHARACTERS, MAX_NAME_LENGTH};

/// Rules for sanitizing a single file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameRules {
    /// Text substituted for each illegal character.
    pub replacement: String,
    /// Characters that are replaced.
    pub illegal_chars: String,
}

impl Default for FilenameRules {
    fn default() -> Self {
        Self {
            replacement: "_".to_string(),
            illegal_chars: INVALID_FILENAME_CHARACTERS.to_string(),
        }
    }
}

/// Rules for sanitizing a folder path.
///
/// `illegal_chars` must not contain `/` or `\`: those are structural
/// separators and are normalized before segments are sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRules {
    pub replacement: String,
    pub illegal_chars: String,
    /// Separator used in the returned path.
    pub separator: char,
    /// Maximum length of the whole path, in characters.
    pub max_length: usize,
}

impl Default for FolderRules {
    fn default() -> Self {
        Self {
            replacement: "_".to_string(),
            illegal_chars: INVALID_CHARACTERS.to_string(),
            separator: std::path::MAIN_SEPARATOR,
            max_length: MAX_NAME_LENGTH,
        }
    }
}

impl FolderRules {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// Returned by strict-mode sanitization instead of truncating.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("folder path `{path}` is {length} characters, exceeding the limit of {max_length}")]
    PathTooLong {
        path: String,
        length: usize,
        max_length: usize,
    },
}
