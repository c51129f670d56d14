//! Plugin host error types

use std::path::PathBuf;
use thiserror::Error;

use gradience_plugin_api::Hook;

/// Errors that can occur while discovering or managing plugins
#[derive(Error, Debug)]
pub enum PluginHostError {
    /// API version mismatch between gradience and plugin
    #[error("API version mismatch: gradience expects {expected}, plugin has {found}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    /// Failed to load dynamic library
    #[error("Failed to load plugin library: {0}")]
    LibraryLoad(#[from] libloading::Error),

    /// Plugin factory returned an error
    #[error("Plugin initialization failed: {0}")]
    InitFailed(#[from] gradience_plugin_api::PluginError),

    /// Plugin factory or manifest panicked
    #[error("Plugin '{name}' panicked during construction")]
    ConstructionPanicked { name: String },

    /// Two modules resolved to the same identifier
    #[error("Plugin '{name}' is already registered")]
    Duplicate { name: String },

    /// Plugin search directory could not be read
    #[error("Cannot read plugin directory {path}: {source}")]
    DirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry error (parsing, saving, etc.)
    #[error("Registry error: {0}")]
    Registry(String),

    /// Plugin not found
    #[error("Plugin '{name}' not found")]
    NotFound { name: String },

    /// Plugin was marked failed after panicking
    #[error("Plugin '{name}' has failed: {error}")]
    PluginFailed { name: String, error: String },

    /// A single-plugin hook call returned an error or panicked
    #[error("Plugin '{name}' failed in {hook}: {error}")]
    HookFailed {
        name: String,
        hook: Hook,
        error: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
