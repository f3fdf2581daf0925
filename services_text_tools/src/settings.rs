//! # Tool Settings
//!
//! Typed, layered settings for the text tool.
//!
//! ## Philosophy
//!
//! - **Typed settings**: Every key has a registered default that fixes its type
//! - **Layered**: Read-only defaults + overrides loaded from a settings file
//! - **Validated**: Overrides with an unknown key, a wrong type or an invalid
//!   value are rejected instead of silently ignored
//!
//! ## Example
//!
//! ```ignore
//! use services_text_tools::settings::{create_default_registry, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::COUNT_UNIT, SettingValue::String("utf16".into()))?;
//! let settings = registry.tool_settings();
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use text_core::{CountUnit, TransformOptions, DEFAULT_EXPORT_FILE_NAME, DEFAULT_MINOR_WORDS};
use thiserror::Error;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
///
/// Serialized untagged so settings files read naturally:
/// `"count.unit": "utf16"`, `"title.minor_words": ["a", "the"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    /// No key defaults to a number; this keeps numbers in a settings file
    /// readable so they fail as a type mismatch rather than a parse error
    Integer(i64),
    String(String),
    StringList(Vec<String>),
}

impl SettingValue {
    /// Name of the value's type, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::String(_) => "string",
            SettingValue::StringList(_) => "string list",
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            SettingValue::StringList(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
            SettingValue::StringList(v) => write!(f, "{:?}", v),
        }
    }
}

/// Settings error
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Setting {key} expects a {expected}, got a {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Common setting keys
pub mod keys {
    pub const EXPORT_FILE_NAME: &str = "export.file_name";
    pub const TITLE_MINOR_WORDS: &str = "title.minor_words";
    pub const COUNT_UNIT: &str = "count.unit";
    pub const NOTIFICATIONS_ENABLED: &str = "notifications.enabled";
}

/// Resolved settings used by the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub export_file_name: String,
    pub minor_words: Vec<String>,
    pub count_unit: CountUnit,
    pub notifications_enabled: bool,
}

impl ToolSettings {
    /// Transformation options for a session using these settings
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::new()
            .with_minor_words(&self.minor_words)
            .with_count_unit(self.count_unit)
            .with_export_file_name(self.export_file_name.clone())
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        create_default_registry().tool_settings()
    }
}

/// Settings registry
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Overrides on top of the defaults
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override after checking it against the registered default
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;

        if std::mem::discriminant(default) != std::mem::discriminant(&value) {
            return Err(SettingsError::TypeMismatch {
                key: key.to_string(),
                expected: default.kind(),
                found: value.kind(),
            });
        }

        validate(&key, &value)?;
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Removes an override, returning whether one existed
    pub fn remove_override(&mut self, key: &SettingKey) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Gets the effective setting value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    /// Returns all overridden keys
    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Exports all overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Applies overrides, validating each one. Stops at the first invalid entry.
    pub fn import_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Result<(), SettingsError> {
        for (key, value) in overrides {
            self.set_override(key, value)?;
        }
        Ok(())
    }

    /// Resolve the effective settings
    pub fn tool_settings(&self) -> ToolSettings {
        let string = |key: &str, fallback: &str| {
            self.get(&SettingKey::from(key))
                .and_then(SettingValue::as_string)
                .unwrap_or(fallback)
                .to_string()
        };

        let count_unit = CountUnit::from_name(&string(keys::COUNT_UNIT, "chars")).unwrap_or_default();

        let minor_words = self
            .get(&SettingKey::from(keys::TITLE_MINOR_WORDS))
            .and_then(SettingValue::as_string_list)
            .map(|words| words.to_vec())
            .unwrap_or_else(default_minor_words);

        let notifications_enabled = self
            .get(&SettingKey::from(keys::NOTIFICATIONS_ENABLED))
            .and_then(SettingValue::as_boolean)
            .unwrap_or(true);

        ToolSettings {
            export_file_name: string(keys::EXPORT_FILE_NAME, DEFAULT_EXPORT_FILE_NAME),
            minor_words,
            count_unit,
            notifications_enabled,
        }
    }
}

fn default_minor_words() -> Vec<String> {
    DEFAULT_MINOR_WORDS.iter().map(|w| w.to_string()).collect()
}

fn validate(key: &SettingKey, value: &SettingValue) -> Result<(), SettingsError> {
    let invalid = |reason: &str| SettingsError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    match (key.as_str(), value) {
        (keys::COUNT_UNIT, SettingValue::String(name)) => {
            if CountUnit::from_name(name).is_none() {
                return Err(invalid("expected chars, utf16 or graphemes"));
            }
        }
        (keys::EXPORT_FILE_NAME, SettingValue::String(name)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(invalid("file name is empty"));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(invalid("file name must not contain a path"));
            }
        }
        _ => {}
    }

    Ok(())
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();

    registry.register_default(
        keys::EXPORT_FILE_NAME,
        SettingValue::String(DEFAULT_EXPORT_FILE_NAME.to_string()),
    );
    registry.register_default(
        keys::TITLE_MINOR_WORDS,
        SettingValue::StringList(default_minor_words()),
    );
    registry.register_default(
        keys::COUNT_UNIT,
        SettingValue::String(CountUnit::default().as_str().to_string()),
    );
    registry.register_default(keys::NOTIFICATIONS_ENABLED, SettingValue::Boolean(true));

    registry
}
