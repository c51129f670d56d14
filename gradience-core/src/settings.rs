//! File-backed settings store
//!
//! Stands in for the desktop settings backend: a flat key-value table
//! persisted as TOML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gradience_plugin_api::{SettingsStore, SettingsValue};

use crate::error::SettingsError;

/// Settings persisted as a TOML table
#[derive(Debug, Default)]
pub struct FileSettings {
    path: Option<PathBuf>,
    values: BTreeMap<String, SettingsValue>,
    dirty: bool,
}

impl FileSettings {
    /// Load settings from a TOML file
    ///
    /// Returns an empty store if the file doesn't exist. The path is kept so
    /// that [`save`](Self::save) writes back to the same place.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
            dirty: false,
        })
    }

    /// Save settings back to the file they were loaded from
    ///
    /// A store created with `default()` has no path and saving is a no-op.
    pub fn save(&mut self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = toml::to_string_pretty(&self.values)
            .map_err(|e| SettingsError::Serialize(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        self.dirty = false;
        Ok(())
    }

    /// Path this store persists to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if the settings have changed since loading/saving
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Iterate over all stored keys and values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingsValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl SettingsStore for FileSettings {
    fn get_value(&self, key: &str) -> Option<SettingsValue> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: SettingsValue) {
        if self.values.get(key) == Some(&value) {
            return;
        }
        self.values.insert(key.to_string(), value);
        self.dirty = true;
    }
}
