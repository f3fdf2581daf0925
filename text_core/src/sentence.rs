//! Sentence segmentation and sentence case

use alloc::string::String;
use alloc::vec::Vec;

use crate::case::capitalize;

/// Characters that end a sentence
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

fn is_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

/// Iterator over the terminated sentences of a text.
///
/// A sentence is a run of non-terminator characters followed by its whole
/// run of terminators, so `"Wait?! Ok."` yields `"Wait?!"` and `" Ok."`.
/// Terminators with no text before them are skipped, and text after the
/// last terminator is not a sentence.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Sentences<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let body = self.rest.trim_start_matches(is_terminator);
        let Some(body_len) = body.find(is_terminator) else {
            self.rest = "";
            return None;
        };

        let run = body[body_len..]
            .find(|c: char| !is_terminator(c))
            .unwrap_or(body.len() - body_len);
        let (sentence, rest) = body.split_at(body_len + run);
        self.rest = rest;
        Some(sentence)
    }
}

/// Split `text` into terminated sentences
pub fn sentences(text: &str) -> Sentences<'_> {
    Sentences::new(text)
}

/// Trim each sentence, capitalize its first character, lowercase the rest,
/// and join the sentences with a single space.
///
/// A text without any terminated sentence is treated as one sentence.
/// Returns `None` for empty or whitespace-only text.
pub fn to_sentence_case(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let mut parts: Vec<String> = sentences(text).map(|s| capitalize(s.trim())).collect();
    if parts.is_empty() {
        parts.push(capitalize(text.trim()));
    }

    Some(parts.join(" "))
}
