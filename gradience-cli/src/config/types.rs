use gradience_core::plugins::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawGradienceConfig {
    #[serde(default)]
    pub plugins: RawPluginsConfig,

    #[serde(default)]
    pub settings: RawSettingsConfig,
}

/// Plugin config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPluginsConfig {
    /// Directories scanned for plugin libraries
    pub dirs: Option<Vec<PathBuf>>,

    /// Module name prefix that marks a library as a plugin
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSettingsConfig {
    /// Settings file shared with plugins
    pub path: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GradienceConfig {
    #[serde(default)]
    pub plugins: PluginsConfig,

    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// Directories scanned for plugin libraries
    pub dirs: Vec<PathBuf>,

    /// Module name prefix that marks a library as a plugin
    pub prefix: String,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            dirs: vec![gradience_paths::plugin_dir()],
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Settings file shared with plugins
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: gradience_paths::settings_path(),
        }
    }
}
