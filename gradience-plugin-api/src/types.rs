//! Plugin metadata structures

use serde::{Deserialize, Serialize};

/// Plugin manifest containing metadata about the plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Human-readable title shown in the plugin list
    pub title: String,
    /// Short description of what the plugin does
    #[serde(default)]
    pub description: String,
    /// Plugin version (semver)
    pub version: String,
    /// Plugin author
    #[serde(default)]
    pub author: String,
    /// API version this plugin was built against
    pub api_version: u32,
}

impl PluginManifest {
    /// Create a manifest with the given title and defaults for everything else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Default for PluginManifest {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: "0.0.1".to_string(),
            author: String::new(),
            api_version: crate::API_VERSION,
        }
    }
}
