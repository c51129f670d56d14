//! Plugin registry - remembers which plugins the user switched off

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::error::PluginHostError;

/// Registry of disabled plugins
///
/// Stored as TOML in `~/.config/gradience/plugins/registry.toml`. Plugins are
/// enabled unless listed here, so a freshly installed plugin is active
/// without any extra step.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRegistry {
    /// Set of disabled plugin identifiers
    #[serde(default)]
    pub disabled: BTreeSet<String>,
}

impl PluginRegistry {
    /// Load registry from a TOML file
    ///
    /// Returns an empty registry if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, PluginHostError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let registry: Self =
            toml::from_str(&content).map_err(|e| PluginHostError::Registry(e.to_string()))?;
        Ok(registry)
    }

    /// Save registry to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), PluginHostError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PluginHostError::Registry(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check if a plugin is enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.contains(id)
    }

    /// Enable a plugin
    pub fn enable(&mut self, id: &str) {
        self.disabled.remove(id);
    }

    /// Disable a plugin
    pub fn disable(&mut self, id: &str) {
        self.disabled.insert(id.to_string());
    }
}
