use super::types::{
    GradienceConfig, PluginsConfig, RawGradienceConfig, RawPluginsConfig, RawSettingsConfig,
    SettingsConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<GradienceConfig> {
        Self::load_layers(
            Self::user_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load the user layer, then the project layer on top of it
    fn load_layers(user_path: Option<&Path>, project_path: &Path) -> Result<GradienceConfig> {
        let mut raw = RawGradienceConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawGradienceConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gradience").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with GRADIENCE_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("GRADIENCE_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".gradience/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawGradienceConfig, overlay: RawGradienceConfig) -> RawGradienceConfig {
        RawGradienceConfig {
            plugins: RawPluginsConfig {
                dirs: overlay.plugins.dirs.or(base.plugins.dirs),
                prefix: overlay.plugins.prefix.or(base.plugins.prefix),
            },
            settings: RawSettingsConfig {
                path: overlay.settings.path.or(base.settings.path),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawGradienceConfig) -> GradienceConfig {
        let plugins = PluginsConfig::default();
        GradienceConfig {
            plugins: PluginsConfig {
                dirs: raw.plugins.dirs.unwrap_or(plugins.dirs),
                prefix: raw.plugins.prefix.unwrap_or(plugins.prefix),
            },
            settings: SettingsConfig {
                path: raw
                    .settings
                    .path
                    .unwrap_or_else(|| SettingsConfig::default().path),
            },
        }
    }
}
