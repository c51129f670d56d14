//! Preset - the theme configuration handed to plugin hooks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PluginError;

/// A named theme configuration.
///
/// Hooks receive presets by shared reference, so a plugin can never change
/// the caller's copy. Per-plugin settings travel in [`Preset::plugins`],
/// keyed by plugin identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name of the preset
    pub name: String,
    /// Named colour variables (`accent_color` -> `#3584e4`)
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Palette shades grouped by colour (`blue_` -> `1` -> `#99c1f1`)
    #[serde(default)]
    pub palette: BTreeMap<String, BTreeMap<String, String>>,
    /// Extra CSS per toolkit (`gtk4`, `gtk3`)
    #[serde(default)]
    pub custom_css: BTreeMap<String, String>,
    /// Settings contributed by plugins, keyed by plugin identifier
    #[serde(default)]
    pub plugins: BTreeMap<String, serde_json::Value>,
}

impl Preset {
    /// Create an empty preset with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a preset from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, PluginError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a preset from a JSON file
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, PluginError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a colour variable
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Settings stored for one plugin
    pub fn plugin_settings(&self, plugin_id: &str) -> Option<&serde_json::Value> {
        self.plugins.get(plugin_id)
    }

    /// Builder: set a colour variable
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Builder: merge collected plugin settings into this preset
    pub fn with_plugin_settings(
        mut self,
        settings: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) -> Self {
        self.plugins.extend(settings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const SAMPLE: &str = r##"{
        "name": "Pretty Purple",
        "variables": { "accent_color": "#c061cb", "window_bg_color": "#242424" },
        "palette": { "purple_": { "1": "#dc8add", "5": "#613583" } },
        "custom_css": { "gtk4": "", "gtk3": "" },
        "plugins": { "gradience_shell": { "panel": true } }
    }"##;

    #[test]
    fn test_parse_full_preset() {
        let preset = Preset::from_json(SAMPLE).unwrap();
        assert_eq!(preset.name, "Pretty Purple");
        assert_eq!(preset.variable("accent_color"), Some("#c061cb"));
        assert_eq!(preset.palette["purple_"]["5"], "#613583");
        assert_eq!(
            preset.plugin_settings("gradience_shell"),
            Some(&json!({ "panel": true }))
        );
    }

    #[test]
    fn test_parse_minimal_preset() {
        let preset = Preset::from_json(r#"{"name":"Bare"}"#).unwrap();
        assert_eq!(preset.name, "Bare");
        assert!(preset.variables.is_empty());
        assert!(preset.plugins.is_empty());
    }

    #[test]
    fn test_parse_invalid_json_is_serialization_error() {
        let err = Preset::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PluginError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("purple.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let preset = Preset::load(&path).unwrap();
        assert_eq!(preset.name, "Pretty Purple");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Preset::load(Path::new("/nonexistent/preset.json")).unwrap_err();
        assert!(matches!(err, PluginError::Io(_)));
    }

    #[test]
    fn test_with_plugin_settings_leaves_original_untouched() {
        let original = Preset::new("Base").with_variable("accent_color", "#3584e4");
        let extended = original
            .clone()
            .with_plugin_settings([("gradience_monet".to_string(), json!({ "tone": 20 }))]);

        assert!(original.plugins.is_empty());
        assert_eq!(
            extended.plugin_settings("gradience_monet"),
            Some(&json!({ "tone": 20 }))
        );
        assert_eq!(extended.variable("accent_color"), Some("#3584e4"));
    }
}
