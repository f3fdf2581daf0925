//! Case conversions
//!
//! Every conversion is a total function. Guarded conversions return `None`
//! when there is nothing to convert, and the caller keeps its buffer as is.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::options::TransformOptions;

pub use crate::sentence::to_sentence_case;

/// A case conversion the engine can apply to a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseConversion {
    Upper,
    Lower,
    Sentence,
    Capitalized,
    Title,
    Alternating,
    Inverse,
}

impl CaseConversion {
    pub const ALL: [CaseConversion; 7] = [
        CaseConversion::Sentence,
        CaseConversion::Lower,
        CaseConversion::Upper,
        CaseConversion::Capitalized,
        CaseConversion::Alternating,
        CaseConversion::Title,
        CaseConversion::Inverse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CaseConversion::Upper => "upper",
            CaseConversion::Lower => "lower",
            CaseConversion::Sentence => "sentence",
            CaseConversion::Capitalized => "capitalized",
            CaseConversion::Title => "title",
            CaseConversion::Alternating => "alternating",
            CaseConversion::Inverse => "inverse",
        }
    }

    /// Parse a conversion name, accepting a few common aliases
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let bare = lowered
            .strip_suffix("-case")
            .or_else(|| lowered.strip_suffix("_case"))
            .unwrap_or(lowered.as_str());

        match bare {
            "upper" | "uppercase" => Some(CaseConversion::Upper),
            "lower" | "lowercase" => Some(CaseConversion::Lower),
            "sentence" => Some(CaseConversion::Sentence),
            "capitalized" | "capitalize" | "capital" => Some(CaseConversion::Capitalized),
            "title" => Some(CaseConversion::Title),
            "alternating" | "alternate" => Some(CaseConversion::Alternating),
            "inverse" | "invert" => Some(CaseConversion::Inverse),
            _ => None,
        }
    }

    /// Whether the conversion is skipped on an empty buffer
    pub fn is_guarded(&self) -> bool {
        !matches!(self, CaseConversion::Upper | CaseConversion::Lower)
    }

    /// Apply the conversion. `None` means the buffer stays unchanged.
    pub fn apply(&self, text: &str, options: &TransformOptions) -> Option<String> {
        match self {
            CaseConversion::Upper => Some(to_upper_case(text)),
            CaseConversion::Lower => Some(to_lower_case(text)),
            CaseConversion::Sentence => to_sentence_case(text),
            CaseConversion::Capitalized => to_capitalized_case(text),
            CaseConversion::Title => to_title_case(text, options),
            CaseConversion::Alternating => to_alternating_case(text),
            CaseConversion::Inverse => to_inverse_case(text),
        }
    }
}

impl fmt::Display for CaseConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First character uppercased, the rest lowercased
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

pub fn to_upper_case(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lower_case(text: &str) -> String {
    text.to_lowercase()
}

/// Capitalize every space-separated word.
///
/// Only `' '` separates words; runs of spaces survive because empty words
/// are rejoined in place.
pub fn to_capitalized_case(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let words: Vec<String> = text.split(' ').map(capitalize).collect();
    Some(words.join(" "))
}

/// Title case: lowercase everything, then capitalize each word except minor
/// words. The first word is always capitalized.
pub fn to_title_case(text: &str, options: &TransformOptions) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let lowered = text.to_lowercase();
    let words: Vec<String> = lowered
        .split(' ')
        .enumerate()
        .map(|(index, word)| {
            if index == 0 || !options.is_minor_word(word) {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect();

    Some(words.join(" "))
}

/// Lowercase characters at even positions, uppercase at odd positions.
///
/// Positions count UTF-16 code units. A character outside the BMP takes
/// two positions and keeps its case, as each half is a lone surrogate.
pub fn to_alternating_case(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut position = 0;
    for c in text.chars() {
        if c.len_utf16() > 1 {
            out.push(c);
        } else if position % 2 == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        position += c.len_utf16();
    }
    Some(out)
}

/// Swap the case of every character.
///
/// A character equal to its own uppercase form maps to its lowercase form,
/// which leaves caseless characters untouched.
pub fn to_inverse_case(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.to_uppercase().eq(core::iter::once(c)) {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
    Some(out)
}
