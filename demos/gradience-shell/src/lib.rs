//! Shell Plugin - A simple example plugin for gradience
//!
//! This plugin demonstrates:
//! - Basic plugin structure with the `export_plugin!` macro
//! - Implementing only the hooks a plugin needs
//! - Reading application settings (`load_custom_settings`)
//! - Rejecting presets (`validate`) and contributing settings (`settings`)
//!
//! ## Building
//!
//! ```bash
//! cargo build --release
//! ```
//!
//! ## Installing
//!
//! ```bash
//! mkdir -p ~/.local/share/gradience/plugins
//! cp target/release/libgradience_shell.so ~/.local/share/gradience/plugins/
//! gradience plugins list
//! ```

use gradience_plugin_api::{Plugin, PluginError, PluginManifest, Preset, SettingsStore, export_plugin};
use serde_json::json;

/// Settings key holding the enabled theme engines
const THEME_ENGINES_KEY: &str = "enabled-theme-engines";

/// Themes GNOME Shell from the preset's accent colours.
#[derive(Default)]
pub struct ShellPlugin {
    /// Whether the shell engine is switched on in the preferences
    engine_enabled: bool,
    /// Name of the last preset applied in this session
    last_applied: Option<String>,
}

impl Plugin for ShellPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest {
            title: "GNOME Shell".to_string(),
            version: "0.1.0".to_string(),
            description: "Themes GNOME Shell with the preset colours".to_string(),
            author: "gradience-team".to_string(),
            ..Default::default()
        }
    }

    fn load_custom_settings(&mut self, settings: &mut dyn SettingsStore) -> Result<(), PluginError> {
        self.engine_enabled = settings
            .get_value(THEME_ENGINES_KEY)
            .and_then(|value| {
                value
                    .as_string_array()
                    .map(|engines| engines.iter().any(|e| e == "shell"))
            })
            .unwrap_or(false);
        Ok(())
    }

    fn validate(&mut self, preset: &Preset) -> Result<(), PluginError> {
        if preset.variable("accent_bg_color").is_none() {
            return Err(PluginError::validation(
                "GNOME Shell theming needs accent_bg_color",
            ));
        }
        Ok(())
    }

    fn apply(&mut self, preset: &Preset) -> Result<(), PluginError> {
        if !self.engine_enabled {
            return Ok(());
        }
        self.last_applied = Some(preset.name.clone());
        Ok(())
    }

    fn check(&mut self) -> Result<(), PluginError> {
        if std::env::var_os("XDG_CURRENT_DESKTOP").is_none() {
            return Err(PluginError::Unavailable(
                "no desktop session detected".to_string(),
            ));
        }
        Ok(())
    }

    fn settings(
        &mut self,
        preset: Option<&Preset>,
    ) -> Result<Option<serde_json::Value>, PluginError> {
        let variant = preset
            .and_then(|p| p.plugin_settings("gradience_shell"))
            .and_then(|s| s.get("variant"))
            .and_then(|v| v.as_str())
            .unwrap_or("dark");
        Ok(Some(json!({ "variant": variant })))
    }
}

// Export the plugin for dynamic loading
export_plugin!(ShellPlugin);
