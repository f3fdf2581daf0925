//! Display modes

use serde::{Deserialize, Serialize};

/// What the host should display for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Show the editable buffer
    #[default]
    Input,
    /// Show the word/character summary
    Count,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Input => "INPUT",
            DisplayMode::Count => "COUNT",
        }
    }
}
