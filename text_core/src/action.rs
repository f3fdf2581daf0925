//! Session actions and action-name parsing

use alloc::string::{String, ToString};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::case::CaseConversion;

/// Something a host asks the session to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Replace the buffer with a case conversion of itself
    Convert(CaseConversion),
    /// Compute the word/character summary and show it
    CountWords,
    /// The user edited the buffer
    Edit(String),
    /// Empty buffer and summary
    Clear,
    /// Copy the buffer to the system clipboard
    CopyToClipboard,
    /// Offer the buffer as a downloadable file
    Download,
}

impl Action {
    /// Short name used in scripts and logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Convert(conversion) => conversion.name(),
            Action::CountWords => "count",
            Action::Edit(_) => "edit",
            Action::Clear => "clear",
            Action::CopyToClipboard => "copy",
            Action::Download => "download",
        }
    }
}

/// Action parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    Empty,
    Unknown(String),
}

impl fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionParseError::Empty => write!(f, "Empty action"),
            ActionParseError::Unknown(name) => write!(f, "Unknown action: {}", name),
        }
    }
}

/// Parse an action name. Edits carry text and are never parsed from a name.
pub fn parse_action(name: &str) -> Result<Action, ActionParseError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ActionParseError::Empty);
    }

    if let Some(conversion) = CaseConversion::from_name(trimmed) {
        return Ok(Action::Convert(conversion));
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "count" | "count-words" | "words" | "wc" => Ok(Action::CountWords),
        "clear" | "reset" => Ok(Action::Clear),
        "copy" | "clipboard" => Ok(Action::CopyToClipboard),
        "download" | "export" | "save" => Ok(Action::Download),
        _ => Err(ActionParseError::Unknown(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversions() {
        assert_eq!(
            parse_action("title"),
            Ok(Action::Convert(CaseConversion::Title))
        );
        assert_eq!(
            parse_action(" Upper "),
            Ok(Action::Convert(CaseConversion::Upper))
        );
        assert_eq!(
            parse_action("sentence-case"),
            Ok(Action::Convert(CaseConversion::Sentence))
        );
    }

    #[test]
    fn test_parse_outputs() {
        assert_eq!(parse_action("count"), Ok(Action::CountWords));
        assert_eq!(parse_action("wc"), Ok(Action::CountWords));
        assert_eq!(parse_action("clear"), Ok(Action::Clear));
        assert_eq!(parse_action("copy"), Ok(Action::CopyToClipboard));
        assert_eq!(parse_action("download"), Ok(Action::Download));
        assert_eq!(parse_action("export"), Ok(Action::Download));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_action("  "), Err(ActionParseError::Empty));
        match parse_action("shout") {
            Err(ActionParseError::Unknown(name)) => assert_eq!(name, "shout"),
            other => panic!("Expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_names_parse_back() {
        for action in [
            Action::CountWords,
            Action::Clear,
            Action::CopyToClipboard,
            Action::Download,
            Action::Convert(CaseConversion::Inverse),
        ] {
            assert_eq!(parse_action(action.name()), Ok(action));
        }
    }
}
