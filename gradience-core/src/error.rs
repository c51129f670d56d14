//! Error types for gradience-core

use thiserror::Error;

use crate::plugins::PluginHostError;
use crate::preferences::{GtkVersion, OverrideScope};

/// Top-level error type for gradience-core
#[derive(Error, Debug)]
pub enum GradienceError {
    #[error("Plugin error: {0}")]
    Plugins(#[from] PluginHostError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),
}

/// Errors from the file-backed settings store
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(String),

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),
}

/// Errors raised while changing preferences
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to update {scope} Flatpak override for {gtk}: {message}")]
    Override {
        gtk: GtkVersion,
        scope: OverrideScope,
        message: String,
    },

    #[error("Unknown theme engine: {0}")]
    UnknownThemeEngine(String),
}
