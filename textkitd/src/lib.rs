//! # TextKit Host Runtime
//!
//! This crate provides the command-line host for the text tool.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The session never prints or touches files
//! - **Output is the display**: What the page would show, one line per `show`
//! - **Input is explicit actions**: Button presses and edits, not keystrokes
//! - **Deterministic mode is first-class**: Scripts replay the same way every time
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Loads settings overrides from a JSON file
//! - Applies a single action to stdin or a file (one-shot mode)
//! - Replays a session script (script mode)
//! - Wires the clipboard and export collaborators
//! - Reports collaborator outcomes on the diagnostics stream
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Render a page or handle layout
//! - Persist the buffer between runs
//! - Retry failed clipboard writes or exports

pub mod input_script;
pub mod runtime;

pub use input_script::{ScriptError, ScriptStep, SessionScript};
pub use runtime::{HostMode, HostRuntime, HostRuntimeConfig, HostRuntimeError, InputSource};
