//! Settings persistence layer
//!
//! Loads and saves settings overrides as versioned JSON. Defaults are never
//! written; a settings file only carries what differs from them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{create_default_registry, SettingKey, SettingValue, SettingsError, SettingsRegistry};

/// Serializable container for settings overrides
/// Uses BTreeMap for stable ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverridesData {
    /// Version of the settings format (for future migrations)
    pub version: u32,
    #[serde(default)]
    pub overrides: BTreeMap<String, SettingValue>,
}

impl SettingsOverridesData {
    /// Current version of the settings format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            overrides: BTreeMap::new(),
        }
    }

    /// Captures the overrides of a registry
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let mut data = Self::new();
        for (key, value) in registry.export_overrides() {
            data.overrides.insert(key.as_str().to_string(), value);
        }
        data
    }

    /// Converts settings data to registry overrides
    pub fn to_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides
            .iter()
            .map(|(key, value)| (SettingKey::new(key.as_str()), value.clone()))
            .collect()
    }
}

impl Default for SettingsOverridesData {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize settings: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize settings: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] SettingsError),

    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes settings overrides to JSON bytes
pub fn serialize_overrides(data: &SettingsOverridesData) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec_pretty(data).map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
}

/// Deserializes settings overrides from JSON bytes
pub fn deserialize_overrides(bytes: &[u8]) -> PersistenceResult<SettingsOverridesData> {
    let data: SettingsOverridesData = serde_json::from_slice(bytes)
        .map_err(|e| PersistenceError::DeserializationFailed(e.to_string()))?;

    // Check version compatibility
    if data.version != SettingsOverridesData::CURRENT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(data.version));
    }

    Ok(data)
}

/// Builds the default registry and applies the overrides in `bytes`
pub fn load_registry(bytes: &[u8]) -> PersistenceResult<SettingsRegistry> {
    let data = deserialize_overrides(bytes)?;
    let mut registry = create_default_registry();
    registry.import_overrides(data.to_overrides())?;
    Ok(registry)
}

/// Reads a settings file into a registry
pub fn load_registry_from_path(path: &Path) -> PersistenceResult<SettingsRegistry> {
    let bytes = fs::read(path)?;
    load_registry(&bytes)
}

/// Writes the overrides of `registry` to a settings file
pub fn save_registry_to_path(registry: &SettingsRegistry, path: &Path) -> PersistenceResult<()> {
    let bytes = serialize_overrides(&SettingsOverridesData::from_registry(registry))?;
    fs::write(path, bytes)?;
    Ok(())
}
