//! Plugin system for gradience
//!
//! This module provides the infrastructure for discovering plugins and
//! invoking their hooks:
//!
//! - [`PluginLoader`]: Source of plugins ([`StaticLoader`], [`DylibLoader`], [`LoaderChain`])
//! - [`PluginsList`]: Owns the discovered plugins and fans hooks out to them
//! - [`PluginRegistry`]: Tracks which plugins the user disabled
//! - [`PreferencesGroup`]: Presentation model of the plugin list
//! - [`PluginHostError`]: Error types for plugin operations
//!
//! # Plugin Discovery
//!
//! A module is a plugin when its name starts with `gradience_`
//! ([`DEFAULT_PREFIX`]). Built-in plugins are registered explicitly on a
//! [`StaticLoader`]; third-party plugins are shared libraries found by
//! [`DylibLoader`] in `~/.local/share/gradience/plugins/`, e.g.
//! `libgradience_monet.so`.
//!
//! A candidate that fails to load or construct is left out of the list and
//! reported through [`PluginsList::discovery_failures`]. It never aborts
//! discovery of the others.
//!
//! # Example
//!
//! ```ignore
//! use gradience_core::plugins::{DylibLoader, PluginsList};
//!
//! let loader = DylibLoader::new(vec![gradience_paths::plugin_dir()]);
//! let mut plugins = PluginsList::discover(&loader);
//!
//! plugins.load_all_custom_settings(&mut settings);
//! let report = plugins.validate(&preset);
//! if report.is_valid() {
//!     plugins.apply(&preset);
//! }
//! ```

mod dispatch;
mod dylib;
mod error;
mod list;
mod loader;
mod presentation;
mod registry;

pub use dispatch::{DispatchReport, HookOutcome, ValidationReport};
pub use dylib::{DylibLoader, module_name};
pub use error::PluginHostError;
pub use list::{PluginInfo, PluginState, PluginsList};
pub use loader::{
    DEFAULT_PREFIX, Discovery, DiscoveryFailure, LoadedPlugin, LoaderChain, PluginDescriptor,
    PluginLoader, StaticLoader, is_plugin_name,
};
pub use presentation::{
    GROUP_DESCRIPTION, GROUP_TITLE, GroupRow, NO_PLUGINS_TITLE, PluginRow, PreferencesGroup,
};
pub use registry::PluginRegistry;
