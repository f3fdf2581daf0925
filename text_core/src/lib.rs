#![no_std]

//! # Text Core
//!
//! Text transformation engine shared by every TextKit host.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Pure transformations**: Every conversion is a total function over `&str`
//! - **Explicit session state**: Buffer, display mode and summary live in a
//!   `TextSession` value, never in globals
//! - **No ambient authority**: Clipboard and export are requests returned to
//!   the host, never performed here
//!
//! ## Design
//!
//! The core provides:
//! - Case conversions and word counting (`case`, `sentence`, `count`)
//! - TextSession: State machine over buffer, display mode and summary
//! - SessionOutcome: Structured results from applying an action
//! - SessionSnapshot: Deterministic state for replay testing

extern crate alloc;

pub mod action;
pub mod case;
pub mod count;
pub mod mode;
pub mod options;
pub mod sentence;
pub mod session;
pub mod snapshot;

pub use action::{parse_action, Action, ActionParseError};
pub use case::CaseConversion;
pub use count::{count_words, CountUnit, WordCount};
pub use mode::DisplayMode;
pub use options::{TransformOptions, DEFAULT_EXPORT_FILE_NAME, DEFAULT_MINOR_WORDS, EXPORT_MIME_TYPE};
pub use session::{ExportRequest, SessionIoRequest, SessionOutcome, TextSession};
pub use snapshot::SessionSnapshot;
