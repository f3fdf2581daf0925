//! Text tool host service

use log::{debug, info, warn};
use text_core::{
    Action, DisplayMode, ExportRequest, SessionIoRequest, SessionOutcome, TextSession,
};

use crate::io::{Clipboard, ExportReceipt, Exporter, IoError, MemoryClipboard, MemoryExporter};
use crate::notify::{Notification, NotificationCenter};
use crate::settings::ToolSettings;

/// Result of applying an action through the tool
#[derive(Debug)]
pub enum ToolAction {
    /// Nothing to do (guarded no-op)
    Unchanged,
    /// Buffer or mode changed
    Updated,
    /// Summary recomputed and displayed
    Summary(String),
    /// Buffer copied to the clipboard
    Copied,
    /// Buffer exported
    Exported(ExportReceipt),
    /// A collaborator failed; session state is untouched
    IoFailed(IoError),
}

impl ToolAction {
    /// The notification describing a collaborator outcome, if any
    pub fn notification(&self) -> Option<Notification> {
        match self {
            ToolAction::Copied => Some(Notification::success("Text copied to clipboard")),
            ToolAction::Exported(receipt) => {
                let name = receipt
                    .location
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| receipt.location.display().to_string());
                Some(Notification::success(format!("Downloaded {}", name)))
            }
            ToolAction::IoFailed(err) if err.is_clipboard() => {
                Some(Notification::error(format!("Failed to copy text: {}", err)))
            }
            ToolAction::IoFailed(err) => {
                Some(Notification::error(format!("Failed to download text: {}", err)))
            }
            ToolAction::Unchanged | ToolAction::Updated | ToolAction::Summary(_) => None,
        }
    }
}

/// A text session wired to its host collaborators
pub struct TextTool {
    session: TextSession,
    clipboard: Box<dyn Clipboard>,
    exporter: Box<dyn Exporter>,
    notifications: NotificationCenter,
    settings: ToolSettings,
}

impl TextTool {
    /// Create a tool with in-memory collaborators and default settings
    pub fn new() -> Self {
        Self::with_io(
            ToolSettings::default(),
            Box::new(MemoryClipboard::new()),
            Box::new(MemoryExporter::new()),
        )
    }

    pub fn with_io(
        settings: ToolSettings,
        clipboard: Box<dyn Clipboard>,
        exporter: Box<dyn Exporter>,
    ) -> Self {
        let notifications = if settings.notifications_enabled {
            NotificationCenter::new()
        } else {
            NotificationCenter::disabled()
        };

        Self {
            session: TextSession::with_options(settings.transform_options()),
            clipboard,
            exporter,
            notifications,
            settings,
        }
    }

    pub fn session(&self) -> &TextSession {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Swap settings; the session keeps its buffer and mode
    pub fn apply_settings(&mut self, settings: ToolSettings) {
        self.session.set_options(settings.transform_options());
        self.settings = settings;
    }

    /// What the host should show right now
    pub fn display(&self) -> &str {
        self.session.display()
    }

    /// Apply an action and fulfil any IO it requests
    pub fn apply(&mut self, action: Action) -> ToolAction {
        self.notifications.tick();
        let name = action.name();
        debug!("applying action {}", name);

        let result = match self.session.apply(action) {
            SessionOutcome::Unchanged => ToolAction::Unchanged,
            SessionOutcome::Changed => ToolAction::Updated,
            SessionOutcome::Summary(summary) => ToolAction::Summary(summary),
            SessionOutcome::RequestIo(request) => self.fulfil(name, request),
        };

        self.update_status();
        result
    }

    fn fulfil(&mut self, source: &str, request: SessionIoRequest) -> ToolAction {
        match request {
            SessionIoRequest::CopyToClipboard => self.copy(source),
            SessionIoRequest::Export(export) => self.export(source, &export),
        }
    }

    fn copy(&mut self, source: &str) -> ToolAction {
        let result = match self.clipboard.write_text(self.session.buffer()) {
            Ok(()) => {
                info!("copied {} bytes to clipboard", self.session.buffer().len());
                ToolAction::Copied
            }
            Err(err) => {
                warn!("failed to copy text: {}", err);
                ToolAction::IoFailed(err)
            }
        };
        self.report(source, &result);
        result
    }

    fn export(&mut self, source: &str, request: &ExportRequest) -> ToolAction {
        let result = match self.exporter.export(request, self.session.buffer()) {
            Ok(receipt) => {
                info!(
                    "exported {} bytes to {}",
                    receipt.bytes_written,
                    receipt.location.display()
                );
                ToolAction::Exported(receipt)
            }
            Err(err) => {
                warn!("failed to export {}: {}", request.file_name, err);
                ToolAction::IoFailed(err)
            }
        };
        self.report(source, &result);
        result
    }

    fn report(&mut self, source: &str, result: &ToolAction) {
        if let Some(notification) = result.notification() {
            self.notifications.notify(notification.with_source(source));
        }
    }

    fn update_status(&mut self) {
        let mode = self.session.mode();
        let status = match mode {
            DisplayMode::Input => format!("{} | {}", mode.as_str(), self.session.word_count()),
            DisplayMode::Count => format!("{} | {}", mode.as_str(), self.session.summary()),
        };
        self.notifications.set_status(status);
    }
}

impl Default for TextTool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::UnavailableClipboard;
    use crate::notify::NotificationLevel;
    use text_core::CaseConversion;

    fn tool_with(text: &str) -> TextTool {
        let mut tool = TextTool::new();
        tool.apply(Action::Edit(text.into()));
        tool
    }

    #[test]
    fn test_conversion_updates_display() {
        let mut tool = tool_with("the lord of the rings");
        let result = tool.apply(Action::Convert(CaseConversion::Title));
        assert!(matches!(result, ToolAction::Updated));
        assert_eq!(tool.display(), "The Lord of the Rings");
    }

    #[test]
    fn test_count_shows_summary() {
        let mut tool = tool_with("hello world");
        match tool.apply(Action::CountWords) {
            ToolAction::Summary(summary) => assert_eq!(summary, "Words: 2 | Characters: 11"),
            other => panic!("Expected summary, got {:?}", other),
        }
        assert_eq!(tool.display(), "Words: 2 | Characters: 11");
        assert_eq!(tool.notifications().status(), "COUNT | Words: 2 | Characters: 11");
    }

    #[test]
    fn test_copy_success_notifies() {
        let mut tool = tool_with("copy me");
        assert!(matches!(tool.apply(Action::CopyToClipboard), ToolAction::Copied));

        let latest = tool.notifications().latest().unwrap();
        assert_eq!(latest.level, NotificationLevel::Success);
        assert_eq!(latest.message, "Text copied to clipboard");
        assert_eq!(latest.source.as_deref(), Some("copy"));
    }

    #[test]
    fn test_copy_failure_keeps_state() {
        let mut tool = TextTool::with_io(
            ToolSettings::default(),
            Box::new(UnavailableClipboard::default()),
            Box::new(MemoryExporter::new()),
        );
        tool.apply(Action::Edit("keep me".into()));
        tool.apply(Action::CountWords);
        let before = tool.session().snapshot();

        let result = tool.apply(Action::CopyToClipboard);
        assert!(matches!(
            result,
            ToolAction::IoFailed(IoError::ClipboardUnavailable(_))
        ));
        assert_eq!(tool.session().snapshot(), before);

        let latest = tool.notifications().latest().unwrap();
        assert_eq!(latest.level, NotificationLevel::Error);
        assert!(latest.message.starts_with("Failed to copy text"));
    }

    #[test]
    fn test_download_uses_settings_file_name() {
        let settings = ToolSettings {
            export_file_name: "notes.txt".into(),
            ..ToolSettings::default()
        };
        let mut tool = TextTool::with_io(
            settings,
            Box::new(MemoryClipboard::new()),
            Box::new(MemoryExporter::new()),
        );
        tool.apply(Action::Edit("body".into()));

        match tool.apply(Action::Download) {
            ToolAction::Exported(receipt) => {
                assert_eq!(receipt.location.to_str(), Some("notes.txt"));
                assert_eq!(receipt.mime_type, "text/plain");
            }
            other => panic!("Expected export, got {:?}", other),
        }
        assert_eq!(tool.notifications().latest().unwrap().message, "Downloaded notes.txt");
    }

    #[test]
    fn test_empty_buffer_skips_io() {
        let mut tool = TextTool::new();
        assert!(matches!(tool.apply(Action::CopyToClipboard), ToolAction::Unchanged));
        assert!(matches!(tool.apply(Action::Download), ToolAction::Unchanged));
        assert!(tool.notifications().is_empty());
    }

    #[test]
    fn test_outcome_notifications_without_center() {
        let copied = ToolAction::Copied.notification().unwrap();
        assert_eq!(copied.to_string(), "[SUCCESS] Text copied to clipboard");

        let failed = ToolAction::IoFailed(IoError::ClipboardUnavailable("headless".into()))
            .notification()
            .unwrap();
        assert_eq!(
            failed.to_string(),
            "[ERROR] Failed to copy text: Clipboard unavailable: headless"
        );

        let rejected = ToolAction::IoFailed(IoError::InvalidFileName("../x".into()))
            .notification()
            .unwrap();
        assert!(rejected.message.starts_with("Failed to download text"));

        assert!(ToolAction::Updated.notification().is_none());
    }

    #[test]
    fn test_disabled_notifications() {
        let settings = ToolSettings {
            notifications_enabled: false,
            ..ToolSettings::default()
        };
        let mut tool = TextTool::with_io(
            settings,
            Box::new(MemoryClipboard::new()),
            Box::new(MemoryExporter::new()),
        );
        tool.apply(Action::Edit("x".into()));
        assert!(matches!(tool.apply(Action::CopyToClipboard), ToolAction::Copied));
        assert!(tool.notifications().is_empty());
    }

    #[test]
    fn test_apply_settings_recounts() {
        let mut tool = tool_with("\u{1F600}");
        tool.apply(Action::CountWords);
        assert_eq!(tool.display(), "Words: 1 | Characters: 1");

        let settings = ToolSettings {
            count_unit: text_core::CountUnit::Utf16,
            ..ToolSettings::default()
        };
        tool.apply_settings(settings);
        assert_eq!(tool.display(), "Words: 1 | Characters: 2");
    }
}
