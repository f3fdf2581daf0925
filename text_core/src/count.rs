//! Word and character counting

use core::fmt;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// What a "character" means in the character count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CountUnit {
    /// Unicode scalar values
    #[default]
    Chars,
    /// UTF-16 code units (what a browser reports as string length)
    Utf16,
    /// Extended grapheme clusters
    Graphemes,
}

impl CountUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountUnit::Chars => "chars",
            CountUnit::Utf16 => "utf16",
            CountUnit::Graphemes => "graphemes",
        }
    }

    /// Parse a unit name as used in settings and on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chars" | "char" | "scalars" => Some(CountUnit::Chars),
            "utf16" | "utf-16" | "code-units" => Some(CountUnit::Utf16),
            "graphemes" | "grapheme" | "clusters" => Some(CountUnit::Graphemes),
            _ => None,
        }
    }

    /// Length of `text` in this unit
    pub fn measure(&self, text: &str) -> usize {
        match self {
            CountUnit::Chars => text.chars().count(),
            CountUnit::Utf16 => text.encode_utf16().count(),
            CountUnit::Graphemes => text.graphemes(true).count(),
        }
    }
}

/// Result of counting a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordCount {
    pub words: usize,
    pub characters: usize,
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Words: {} | Characters: {}", self.words, self.characters)
    }
}

/// Count words in the trimmed text and characters in the untrimmed text
pub fn count_words(text: &str, unit: CountUnit) -> WordCount {
    let trimmed = text.trim();
    let words = if trimmed.is_empty() {
        0
    } else {
        trimmed.split_whitespace().count()
    };

    WordCount {
        words,
        characters: unit.measure(text),
    }
}
