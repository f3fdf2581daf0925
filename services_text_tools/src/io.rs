//! Clipboard and export collaborators
//!
//! The session only asks for a copy or an export; these traits are how a
//! host fulfils the request. Failures are reported back, never retried.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use text_core::ExportRequest;
use thiserror::Error;

/// Collaborator I/O error
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    #[error("Failed to write {path}: {source}")]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid export file name: {0}")]
    InvalidFileName(String),
}

impl IoError {
    /// Whether the failure came from the clipboard rather than an export
    pub fn is_clipboard(&self) -> bool {
        matches!(
            self,
            IoError::ClipboardUnavailable(_) | IoError::ClipboardWrite(_)
        )
    }
}

/// Receipt for a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Where the file went (for in-memory exports, just the file name)
    pub location: PathBuf,
    pub mime_type: String,
    pub bytes_written: usize,
}

/// System clipboard abstraction
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), IoError>;
}

/// File export abstraction
pub trait Exporter {
    fn export(&mut self, request: &ExportRequest, text: &str) -> Result<ExportReceipt, IoError>;
}

/// Clipboard that keeps the last copied text in memory.
///
/// Clones share the same contents, so a host can keep a handle after
/// boxing one into a tool.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    inner: Rc<RefCell<ClipboardLog>>,
}

#[derive(Debug, Default)]
struct ClipboardLog {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.borrow().contents.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), IoError> {
        let mut log = self.inner.borrow_mut();
        log.contents = Some(text.to_string());
        log.writes += 1;
        Ok(())
    }
}

/// Clipboard for hosts without one; every write fails
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableClipboard {
    fn default() -> Self {
        Self::new("no clipboard attached")
    }
}

impl Clipboard for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), IoError> {
        Err(IoError::ClipboardUnavailable(self.reason.clone()))
    }
}

/// Desktop clipboard backed by `arboard`
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, IoError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| IoError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), IoError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| IoError::ClipboardWrite(e.to_string()))
    }
}

/// Rejects names that would escape the export directory
fn checked_file_name(name: &str) -> Result<&str, IoError> {
    let trimmed = name.trim();
    let is_plain = !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !trimmed.contains(['/', '\\']);

    if is_plain {
        Ok(trimmed)
    } else {
        Err(IoError::InvalidFileName(name.to_string()))
    }
}

/// Exporter that writes files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirectoryExporter {
    fn export(&mut self, request: &ExportRequest, text: &str) -> Result<ExportReceipt, IoError> {
        let name = checked_file_name(&request.file_name)?;
        let path = self.dir.join(name);

        fs::write(&path, text).map_err(|source| IoError::ExportWrite {
            path: path.clone(),
            source,
        })?;

        Ok(ExportReceipt {
            location: path,
            mime_type: request.mime_type.clone(),
            bytes_written: text.len(),
        })
    }
}

/// Exporter that keeps exported files in memory. Clones share the files.
#[derive(Debug, Default, Clone)]
pub struct MemoryExporter {
    files: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exported `(file name, contents)` pairs, oldest first
    pub fn files(&self) -> Vec<(String, String)> {
        self.files.borrow().clone()
    }
}

impl Exporter for MemoryExporter {
    fn export(&mut self, request: &ExportRequest, text: &str) -> Result<ExportReceipt, IoError> {
        let name = checked_file_name(&request.file_name)?;
        self.files
            .borrow_mut()
            .push((name.to_string(), text.to_string()));

        Ok(ExportReceipt {
            location: PathBuf::from(name),
            mime_type: request.mime_type.clone(),
            bytes_written: text.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> ExportRequest {
        ExportRequest {
            file_name: name.to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    #[test]
    fn test_memory_clipboard_records_text() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("second"));
        assert_eq!(clipboard.write_count(), 2);
    }

    #[test]
    fn test_memory_clipboard_clones_share_contents() {
        let handle = MemoryClipboard::new();
        let mut boxed: Box<dyn Clipboard> = Box::new(handle.clone());
        boxed.write_text("shared").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("shared"));
    }

    #[test]
    fn test_unavailable_clipboard_fails() {
        let mut clipboard = UnavailableClipboard::new("headless");
        let err = clipboard.write_text("text").unwrap_err();
        assert_eq!(err.to_string(), "Clipboard unavailable: headless");
    }

    #[test]
    fn test_directory_exporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = DirectoryExporter::new(dir.path());

        let receipt = exporter
            .export(&request("transformed-text.txt"), "Hello World")
            .unwrap();

        assert_eq!(receipt.location, dir.path().join("transformed-text.txt"));
        assert_eq!(receipt.mime_type, "text/plain");
        assert_eq!(receipt.bytes_written, 11);
        assert_eq!(fs::read_to_string(&receipt.location).unwrap(), "Hello World");
    }

    #[test]
    fn test_directory_exporter_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = DirectoryExporter::new(dir.path());
        exporter.export(&request("out.txt"), "one").unwrap();
        let receipt = exporter.export(&request("out.txt"), "two").unwrap();
        assert_eq!(fs::read_to_string(receipt.location).unwrap(), "two");
    }

    #[test]
    fn test_directory_exporter_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = DirectoryExporter::new(dir.path().join("missing"));
        let err = exporter.export(&request("out.txt"), "text").unwrap_err();
        assert!(matches!(err, IoError::ExportWrite { .. }));
    }

    #[test]
    fn test_path_like_names_rejected() {
        let mut exporter = MemoryExporter::new();
        for name in ["", "..", "../x.txt", "a/b.txt", "a\\b.txt"] {
            assert!(matches!(
                exporter.export(&request(name), "text"),
                Err(IoError::InvalidFileName(_))
            ));
        }
        assert!(exporter.files().is_empty());
    }

    #[test]
    fn test_memory_exporter_records_files() {
        let mut exporter = MemoryExporter::new();
        let receipt = exporter.export(&request("notes.txt"), "body").unwrap();
        assert_eq!(receipt.location, PathBuf::from("notes.txt"));
        assert_eq!(
            exporter.files(),
            vec![("notes.txt".to_string(), "body".to_string())]
        );
    }
}
