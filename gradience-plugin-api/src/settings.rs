//! Settings store contract shared between the application and plugins

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A value held by a settings store.
///
/// Serialized untagged so that a TOML or JSON backend stores plain values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    StringArray(Vec<String>),
}

impl SettingsValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for SettingsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::StringArray(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

impl From<bool> for SettingsValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SettingsValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SettingsValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for SettingsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<String>> for SettingsValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringArray(value)
    }
}

/// Key-value store handed to plugins when custom settings are loaded.
///
/// Reads never fail: a missing key reads as `None`, and [`get_boolean`]
/// treats a missing or non-boolean value as `false`.
///
/// [`get_boolean`]: SettingsStore::get_boolean
pub trait SettingsStore {
    /// Read any value
    fn get_value(&self, key: &str) -> Option<SettingsValue>;

    /// Write any value
    fn set_value(&mut self, key: &str, value: SettingsValue);

    /// Read a boolean
    fn get_boolean(&self, key: &str) -> bool {
        self.get_value(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Write a boolean
    fn set_boolean(&mut self, key: &str, value: bool) {
        self.set_value(key, SettingsValue::Bool(value));
    }
}

/// In-memory settings store
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<String, SettingsValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get_value(&self, key: &str) -> Option<SettingsValue> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: SettingsValue) {
        tracing::trace!(key, %value, "setting value");
        self.values.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_defaults_to_false() {
        let settings = MemorySettings::new();
        assert!(!settings.get_boolean("use-jsdeliver"));
    }

    #[test]
    fn test_boolean_roundtrip() {
        let mut settings = MemorySettings::new();
        settings.set_boolean("user-flatpak-theming-gtk4", true);
        assert!(settings.get_boolean("user-flatpak-theming-gtk4"));
        assert_eq!(
            settings.get_value("user-flatpak-theming-gtk4"),
            Some(SettingsValue::Bool(true))
        );
    }

    #[test]
    fn test_non_boolean_reads_as_false() {
        let mut settings = MemorySettings::new();
        settings.set_value("enabled-theme-engines", vec!["shell".to_string()].into());
        assert!(!settings.get_boolean("enabled-theme-engines"));
    }

    #[test]
    fn test_value_accessors() {
        let engines = SettingsValue::from(vec!["shell".to_string(), "monet".to_string()]);
        assert_eq!(engines.as_string_array().unwrap().len(), 2);
        assert!(engines.as_bool().is_none());

        assert_eq!(SettingsValue::from("dark").as_str(), Some("dark"));
    }

    #[test]
    fn test_display_matches_variant_notation() {
        assert_eq!(SettingsValue::Bool(true).to_string(), "true");
        assert_eq!(
            SettingsValue::from(vec!["shell".to_string(), "monet".to_string()]).to_string(),
            "['shell', 'monet']"
        );
    }

    #[test]
    fn test_untagged_json_shape() {
        let json = serde_json::to_string(&SettingsValue::from(vec!["shell".to_string()])).unwrap();
        assert_eq!(json, r#"["shell"]"#);

        let value: SettingsValue = serde_json::from_str("42").unwrap();
        assert_eq!(value, SettingsValue::Int(42));
        let value: SettingsValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, SettingsValue::Bool(true));
    }
}
