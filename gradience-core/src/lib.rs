//! gradience-core: Core library for the gradience theming application
//!
//! This crate provides the pieces of gradience that are independent of any
//! widget toolkit:
//!
//! - **Plugin system** - [`PluginsList`] discovers plugins through a
//!   [`plugins::PluginLoader`] and fans hooks out to them with per-plugin
//!   failure isolation
//! - **Settings** - [`FileSettings`], a TOML-backed
//!   [`SettingsStore`](gradience_plugin_api::SettingsStore)
//! - **Preferences** - [`Preferences`], the toggle logic behind the
//!   preferences window
//!
//! # Quick Start
//!
//! ```no_run
//! use gradience_core::plugins::{DylibLoader, PluginsList};
//! use gradience_core::FileSettings;
//! use gradience_plugin_api::Preset;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = DylibLoader::new(vec![gradience_paths::plugin_dir()]);
//!     let mut plugins = PluginsList::discover(&loader);
//!
//!     let mut settings = FileSettings::load(&gradience_paths::settings_path())?;
//!     plugins.load_all_custom_settings(&mut settings);
//!
//!     let preset = Preset::load("purple.json".as_ref())?;
//!     if plugins.validate(&preset).is_valid() {
//!         plugins.apply(&preset);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod plugins;
pub mod preferences;
pub mod settings;

// Re-export key types for convenience
pub use error::{GradienceError, PreferencesError, SettingsError};
pub use plugins::{
    DispatchReport, HookOutcome, PluginHostError, PluginInfo, PluginState, PluginsList,
    PreferencesGroup, ValidationReport,
};
pub use preferences::{FlatpakOverrides, GtkVersion, OverrideScope, Preferences, ThemeEngine};
pub use settings::FileSettings;
