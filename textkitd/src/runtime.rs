//! # Host Runtime
//!
//! Wires a `TextTool` to the process: settings from disk, input from stdin
//! or a file, displays to stdout and collaborator reports to stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use log::{debug, info, warn};
use services_text_tools::{
    create_default_registry, keys, load_registry_from_path, Clipboard, DirectoryExporter,
    Exporter, MemoryExporter, PersistenceError, SettingValue, SettingsError, TextTool, ToolAction,
    UnavailableClipboard,
};
use text_core::{Action, CountUnit};
use thiserror::Error;

use crate::input_script::{ScriptError, ScriptStep, SessionScript};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] PersistenceError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] SettingsError),

    #[error("Failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Where one-shot input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    /// Literal text (used by tests and embedding hosts)
    Text(String),
}

/// Host mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMode {
    /// Apply one action to the input and write the resulting display
    OneShot { action: Action, input: InputSource },
    /// Replay a session script (the script text, not its path)
    Script(String),
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostRuntimeConfig {
    pub mode: HostMode,
    /// Settings overrides file
    pub settings_path: Option<PathBuf>,
    /// Directory that receives downloads; in-memory when absent
    pub export_dir: Option<PathBuf>,
    /// Counting unit, taking precedence over the settings file
    pub count_unit: Option<CountUnit>,
}

impl HostRuntimeConfig {
    pub fn new(mode: HostMode) -> Self {
        Self {
            mode,
            settings_path: None,
            export_dir: None,
            count_unit: None,
        }
    }
}

/// Host runtime
pub struct HostRuntime {
    mode: HostMode,
    tool: TextTool,
    /// Parsed script (script mode only)
    script: Option<SessionScript>,
    /// Handle on in-memory downloads when no export directory is set
    memory_exports: Option<MemoryExporter>,
    steps: usize,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let mut registry = match &config.settings_path {
            Some(path) => {
                debug!("loading settings from {}", path.display());
                load_registry_from_path(path)?
            }
            None => create_default_registry(),
        };

        if let Some(unit) = config.count_unit {
            registry.set_override(keys::COUNT_UNIT, SettingValue::String(unit.as_str().into()))?;
        }

        // Parse the script up front so a bad script fails before any output
        let script = match &config.mode {
            HostMode::Script(text) => Some(SessionScript::from_text(text)?),
            HostMode::OneShot { .. } => None,
        };

        let (exporter, memory_exports): (Box<dyn Exporter>, Option<MemoryExporter>) =
            match &config.export_dir {
                Some(dir) => (Box::new(DirectoryExporter::new(dir)), None),
                None => {
                    let exports = MemoryExporter::new();
                    (Box::new(exports.clone()), Some(exports))
                }
            };

        let tool = TextTool::with_io(registry.tool_settings(), open_clipboard(), exporter);

        Ok(Self {
            mode: config.mode,
            tool,
            script,
            memory_exports,
            steps: 0,
        })
    }

    /// Runs until the one-shot action or the script is done.
    ///
    /// Displays go to `out`; clipboard and download reports go to `diag`.
    pub fn run(&mut self, out: &mut dyn Write, diag: &mut dyn Write) -> Result<(), HostRuntimeError> {
        match self.mode.clone() {
            HostMode::OneShot { action, input } => {
                let text = read_input(&input)?;
                self.step(Action::Edit(text), diag)?;
                self.step(action, diag)?;
                show(self.tool.display(), out)
            }
            HostMode::Script(_) => {
                while let Some(step) = self.script.as_mut().and_then(SessionScript::next_step) {
                    match step {
                        ScriptStep::Apply(action) => self.step(action, diag)?,
                        ScriptStep::Show => show(self.tool.display(), out)?,
                    }
                }
                Ok(())
            }
        }
    }

    /// Applies one action and reports any collaborator outcome
    pub fn step(&mut self, action: Action, diag: &mut dyn Write) -> Result<(), HostRuntimeError> {
        let result = self.tool.apply(action);
        self.steps += 1;

        if let ToolAction::Exported(receipt) = &result {
            if self.memory_exports.is_some() {
                info!(
                    "download of {} kept in memory (no export directory)",
                    receipt.location.display()
                );
            }
        }

        // Reported from the outcome so disabled toasts still reach stderr
        if let Some(notification) = result.notification() {
            writeln!(diag, "{}", notification).map_err(HostRuntimeError::Output)?;
        }
        Ok(())
    }

    pub fn tool(&self) -> &TextTool {
        &self.tool
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Downloads kept in memory, as `(file name, contents)` pairs
    pub fn memory_exports(&self) -> Vec<(String, String)> {
        self.memory_exports
            .as_ref()
            .map(MemoryExporter::files)
            .unwrap_or_default()
    }
}

#[cfg(feature = "system-clipboard")]
fn open_clipboard() -> Box<dyn Clipboard> {
    match services_text_tools::SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            warn!("system clipboard unavailable: {}", err);
            Box::new(UnavailableClipboard::new(err.to_string()))
        }
    }
}

#[cfg(not(feature = "system-clipboard"))]
fn open_clipboard() -> Box<dyn Clipboard> {
    warn!("built without system clipboard support; copy will fail");
    Box::new(UnavailableClipboard::new("built without system clipboard support"))
}

/// Reads one-shot input, dropping the single trailing newline a shell adds
fn read_input(source: &InputSource) -> Result<String, HostRuntimeError> {
    let mut text = match source {
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(HostRuntimeError::Input)?;
            text
        }
        InputSource::File(path) => fs::read_to_string(path).map_err(HostRuntimeError::Input)?,
        InputSource::Text(text) => return Ok(text.clone()),
    };

    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn show(display: &str, out: &mut dyn Write) -> Result<(), HostRuntimeError> {
    writeln!(out, "{}", display).map_err(HostRuntimeError::Output)
}
