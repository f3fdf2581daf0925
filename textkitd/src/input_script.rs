//! # Session Script Parser
//!
//! A simple line-based script format for deterministic sessions and demos.
//!
//! ## Format
//!
//! Each line is one step:
//! - Quoted text: `"Hello World"` replaces the buffer (an edit).
//!   Escapes `\n`, `\t`, `\"` and `\\` are recognised.
//! - Action names: `upper`, `title`, `count`, `copy`, `download`, `clear`, ...
//! - `show`: write the current display to the output
//! - Comments: `# This is a comment`, also after an action name or after
//!   the closing quote of a text line
//!
//! ## Example
//!
//! ```text
//! # Title-case a heading and save it
//! "the lord of the rings"
//! title      # capitalise major words
//! show
//! download
//! ```

use std::collections::VecDeque;

use text_core::{parse_action, Action};
use thiserror::Error;

/// Script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Unterminated text at line {0}")]
    UnterminatedText(usize),

    #[error("Invalid escape '\\{escape}' at line {line}")]
    InvalidEscape { line: usize, escape: char },

    #[error("Empty script")]
    EmptyScript,
}

/// A single scripted step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Apply an action to the session
    Apply(Action),
    /// Write the current display
    Show,
}

/// Session script
#[derive(Debug, Clone, Default)]
pub struct SessionScript {
    steps: VecDeque<ScriptStep>,
}

impl SessionScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, ScriptError> {
        let mut steps = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            steps.push_back(Self::parse_line(line, line_num + 1)?);
        }

        if steps.is_empty() {
            return Err(ScriptError::EmptyScript);
        }

        Ok(Self { steps })
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptStep, ScriptError> {
        if let Some(quoted) = line.strip_prefix('"') {
            let (text, rest) = Self::unquote(quoted, line_num)?;
            let rest = rest.trim_start();
            if !rest.is_empty() && !rest.starts_with('#') {
                return Err(ScriptError::ParseError {
                    line: line_num,
                    message: format!("Unexpected text after closing quote: {}", rest),
                });
            }
            return Ok(ScriptStep::Apply(Action::Edit(text)));
        }

        // Trailing comment after a name
        let name = match line.split_once('#') {
            Some((name, _)) => name.trim(),
            None => line,
        };

        if name.eq_ignore_ascii_case("show") {
            return Ok(ScriptStep::Show);
        }

        parse_action(name)
            .map(ScriptStep::Apply)
            .map_err(|e| ScriptError::ParseError {
                line: line_num,
                message: e.to_string(),
            })
    }

    /// Reads quoted text up to its closing quote, returning the text and
    /// whatever follows the quote
    fn unquote(body: &str, line_num: usize) -> Result<(String, &str), ScriptError> {
        let mut text = String::with_capacity(body.len());
        let mut chars = body.char_indices();

        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => return Ok((text, &body[idx + 1..])),
                '\\' => match chars.next().map(|(_, escaped)| escaped) {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(ScriptError::InvalidEscape {
                            line: line_num,
                            escape: other,
                        })
                    }
                    None => break,
                },
                _ => text.push(c),
            }
        }

        Err(ScriptError::UnterminatedText(line_num))
    }

    /// Returns the next step, if any
    pub fn next_step(&mut self) -> Option<ScriptStep> {
        self.steps.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}
