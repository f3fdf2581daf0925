//! # Text Tools Service
//!
//! Host-side service around the text transformation engine.
//!
//! ## Philosophy
//!
//! - **Engine stays pure**: All text logic lives in `text_core`
//! - **Collaborators are explicit**: Clipboard and export are traits handed
//!   to the tool, never reached through globals
//! - **Failures are non-fatal**: A failed copy or export becomes a
//!   notification and a log line; the session is never touched
//! - **Testable**: In-memory collaborators for every external service
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A UI (layout and styling belong to whatever shell drives the tool)
//! - A document store (buffers are not persisted)
//!
//! ## Design
//!
//! - `TextTool` owns a `TextSession` and applies actions to it
//! - IO requests from the session go to `Clipboard` / `Exporter`
//! - Outcomes are surfaced through a `NotificationCenter`
//! - Behaviour is tuned by layered `settings`, persisted as JSON

pub mod io;
pub mod notify;
pub mod persistence;
pub mod settings;
pub mod tool;

pub use io::{
    Clipboard, DirectoryExporter, ExportReceipt, Exporter, IoError, MemoryClipboard,
    MemoryExporter, UnavailableClipboard,
};
#[cfg(feature = "system-clipboard")]
pub use io::SystemClipboard;
pub use notify::{Notification, NotificationCenter, NotificationId, NotificationLevel};
pub use persistence::{
    load_registry, load_registry_from_path, save_registry_to_path, PersistenceError,
};
pub use settings::{
    create_default_registry, keys, SettingKey, SettingValue, SettingsError, SettingsRegistry,
    ToolSettings,
};
pub use tool::{TextTool, ToolAction};
