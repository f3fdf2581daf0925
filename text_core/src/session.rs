//! TextSession state machine
//!
//! Holds the buffer, display mode and summary of one session. Hosts feed
//! actions in and act on the returned outcome; clipboard and export are
//! returned as IO requests for the host to fulfil.

use alloc::string::{String, ToString};

use crate::{
    action::Action,
    case::CaseConversion,
    count::{count_words, WordCount},
    mode::DisplayMode,
    options::{TransformOptions, EXPORT_MIME_TYPE},
    snapshot::SessionSnapshot,
};

/// Outcome from applying an action to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Nothing changed (guarded no-op)
    Unchanged,
    /// Buffer or mode changed
    Changed,
    /// Summary was recomputed and is displayed
    Summary(String),
    /// Request IO operation from host
    RequestIo(SessionIoRequest),
}

/// IO request from the session to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIoRequest {
    /// Write the buffer to the system clipboard
    CopyToClipboard,
    /// Offer the buffer as a file
    Export(ExportRequest),
}

/// Descriptor of a one-shot file export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub file_name: String,
    pub mime_type: String,
}

/// Session state machine
#[derive(Debug, Clone)]
pub struct TextSession {
    buffer: String,
    mode: DisplayMode,
    summary: String,
    options: TransformOptions,
}

impl TextSession {
    /// Create an empty session in Input mode
    pub fn new() -> Self {
        Self::with_options(TransformOptions::default())
    }

    pub fn with_options(options: TransformOptions) -> Self {
        Self {
            buffer: String::new(),
            mode: DisplayMode::Input,
            summary: String::new(),
            options,
        }
    }

    /// Apply an action and return the outcome
    pub fn apply(&mut self, action: Action) -> SessionOutcome {
        match action {
            Action::Convert(conversion) => self.convert(conversion),
            Action::CountWords => {
                self.mode = DisplayMode::Count;
                self.refresh_summary();
                SessionOutcome::Summary(self.summary.clone())
            }
            Action::Edit(text) => self.edit(text),
            Action::Clear => self.clear(),
            Action::CopyToClipboard => {
                if self.buffer.is_empty() {
                    SessionOutcome::Unchanged
                } else {
                    SessionOutcome::RequestIo(SessionIoRequest::CopyToClipboard)
                }
            }
            Action::Download => {
                if self.buffer.is_empty() {
                    SessionOutcome::Unchanged
                } else {
                    SessionOutcome::RequestIo(SessionIoRequest::Export(self.export_request()))
                }
            }
        }
    }

    /// Get a complete snapshot of session state (for replay testing)
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            buffer: self.buffer.clone(),
            summary: self.summary.clone(),
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Last computed summary; empty until the first count
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Replace the options. A displayed summary is recomputed with them.
    pub fn set_options(&mut self, options: TransformOptions) {
        self.options = options;
        if self.mode == DisplayMode::Count {
            self.refresh_summary();
        }
    }

    /// What the host should show: the buffer or the summary
    pub fn display(&self) -> &str {
        match self.mode {
            DisplayMode::Input => &self.buffer,
            DisplayMode::Count => &self.summary,
        }
    }

    /// Count the current buffer without touching session state
    pub fn word_count(&self) -> WordCount {
        count_words(&self.buffer, self.options.count_unit)
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            file_name: self.options.export_file_name.clone(),
            mime_type: EXPORT_MIME_TYPE.to_string(),
        }
    }

    fn convert(&mut self, conversion: CaseConversion) -> SessionOutcome {
        let mode_changed = self.mode != DisplayMode::Input;
        self.mode = DisplayMode::Input;

        match conversion.apply(&self.buffer, &self.options) {
            Some(converted) if converted != self.buffer => {
                self.buffer = converted;
                SessionOutcome::Changed
            }
            _ if mode_changed => SessionOutcome::Changed,
            _ => SessionOutcome::Unchanged,
        }
    }

    fn edit(&mut self, text: String) -> SessionOutcome {
        let changed = text != self.buffer;
        self.buffer = text;

        match self.mode {
            DisplayMode::Count => {
                self.refresh_summary();
                SessionOutcome::Summary(self.summary.clone())
            }
            DisplayMode::Input if changed => SessionOutcome::Changed,
            DisplayMode::Input => SessionOutcome::Unchanged,
        }
    }

    fn clear(&mut self) -> SessionOutcome {
        let was_clear =
            self.buffer.is_empty() && self.summary.is_empty() && self.mode == DisplayMode::Input;

        self.buffer.clear();
        self.summary.clear();
        self.mode = DisplayMode::Input;

        if was_clear {
            SessionOutcome::Unchanged
        } else {
            SessionOutcome::Changed
        }
    }

    fn refresh_summary(&mut self) {
        self.summary = self.word_count().to_string();
    }
}

impl Default for TextSession {
    fn default() -> Self {
        Self::new()
    }
}
