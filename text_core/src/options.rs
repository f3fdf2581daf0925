//! Transformation options

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::count::CountUnit;

/// Short function words kept lowercase by title case (unless first)
pub const DEFAULT_MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "if", "in", "nor", "of", "on", "or", "so",
    "the", "to", "up", "yet",
];

/// File name offered when the buffer is downloaded
pub const DEFAULT_EXPORT_FILE_NAME: &str = "transformed-text.txt";

/// MIME type of exported text
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Options shared by every operation of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Lowercase minor words for title case
    pub minor_words: Vec<String>,
    /// Unit used for the character count
    pub count_unit: CountUnit,
    /// File name used for downloads
    pub export_file_name: String,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self {
            minor_words: DEFAULT_MINOR_WORDS.iter().map(|w| w.to_string()).collect(),
            count_unit: CountUnit::default(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Replace the minor word list; entries are stored lowercased and trimmed
    pub fn with_minor_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.minor_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    pub fn with_count_unit(mut self, unit: CountUnit) -> Self {
        self.count_unit = unit;
        self
    }

    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Case-insensitive minor word lookup
    pub fn is_minor_word(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        self.minor_words.iter().any(|w| *w == lowered)
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self::new()
    }
}
