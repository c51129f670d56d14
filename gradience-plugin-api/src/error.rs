//! Error types for plugin authors

use thiserror::Error;

use crate::hook::Hook;

/// Errors that plugins can return
#[derive(Error, Debug)]
pub enum PluginError {
    /// The preset was rejected by the plugin
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The plugin's `check` probe found it cannot run on this system
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// A hook name that is not one of the seven known hooks
    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    /// A hook that takes a preset was called without one
    #[error("Hook '{0}' requires a preset")]
    MissingPreset(Hook),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl PluginError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
