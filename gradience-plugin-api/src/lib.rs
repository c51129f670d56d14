//! gradience-plugin-api - Plugin API for the gradience theming application
//!
//! This crate provides the trait and types needed to write gradience plugins.
//! A plugin reacts to presets through a fixed set of hooks
//! ([`Hook`]): `apply`, `save`, `validate`, `enable`, `disable`, `check` and
//! `settings`. Every hook has a no-op default, so a plugin only overrides the
//! hooks it cares about.
//!
//! # Example
//!
//! ```ignore
//! use gradience_plugin_api::{Plugin, PluginError, PluginManifest, Preset, export_plugin};
//!
//! #[derive(Default)]
//! pub struct ShellPlugin;
//!
//! impl Plugin for ShellPlugin {
//!     fn manifest(&self) -> PluginManifest {
//!         PluginManifest {
//!             title: "GNOME Shell".to_string(),
//!             version: "0.1.0".to_string(),
//!             ..Default::default()
//!         }
//!     }
//!
//!     fn apply(&mut self, preset: &Preset) -> Result<(), PluginError> {
//!         tracing::info!(preset = %preset.name, "theming shell");
//!         Ok(())
//!     }
//! }
//!
//! export_plugin!(ShellPlugin);
//! ```
//!
//! Build the crate as a `cdylib` named `gradience_<something>` so the host's
//! prefix scan picks it up.

pub mod error;
pub mod hook;
pub mod preset;
pub mod settings;
pub mod types;

pub use error::PluginError;
pub use hook::{Hook, HookInput};
pub use preset::Preset;
pub use settings::{MemorySettings, SettingsStore, SettingsValue};
pub use types::PluginManifest;

/// Current plugin API version. Plugins must match this exactly.
/// This is checked when loading plugin libraries to ensure compatibility.
pub const API_VERSION: u32 = 1;

/// Symbol exported by [`export_plugin!`] that constructs the plugin
pub const CREATE_SYMBOL: &[u8] = b"_gradience_plugin_create";

/// Symbol exported by [`export_plugin!`] that reports [`API_VERSION`]
pub const API_VERSION_SYMBOL: &[u8] = b"_gradience_plugin_api_version";

/// The plugin trait - implement this to create a gradience plugin.
///
/// Only [`manifest`](Plugin::manifest) is required. Hooks signal failure by
/// returning an error; for `validate` an error means the preset was
/// rejected.
pub trait Plugin: Send + Sync {
    /// Return plugin metadata
    fn manifest(&self) -> PluginManifest;

    // ─── Hooks (default no-ops) ──────────────────────────────────────

    /// Called when a preset is applied
    fn apply(&mut self, _preset: &Preset) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when a preset is saved
    fn save(&mut self, _preset: &Preset) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called to check a preset. Return an error to reject it.
    fn validate(&mut self, _preset: &Preset) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when the plugin is enabled
    fn enable(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when the plugin is disabled
    fn disable(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Self-test. Return an error if the plugin cannot work on this system.
    fn check(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Contribute settings for a preset.
    ///
    /// `preset` is `None` when settings are collected before a preset is
    /// bound. Returning `Ok(None)` means the plugin has nothing to add.
    fn settings(
        &mut self,
        _preset: Option<&Preset>,
    ) -> Result<Option<serde_json::Value>, PluginError> {
        Ok(None)
    }

    /// Read plugin-specific values out of the application settings store
    fn load_custom_settings(&mut self, _settings: &mut dyn SettingsStore) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Construct a plugin behind a raw pointer for [`export_plugin!`].
///
/// A panic in `P::default()` must not unwind into the host, so it is caught
/// here and reported as a null pointer. The host turns null into a discovery
/// failure.
pub fn construct_plugin<P: Plugin + Default + 'static>() -> *mut dyn Plugin {
    match std::panic::catch_unwind(|| Box::new(P::default()) as Box<dyn Plugin>) {
        Ok(plugin) => Box::into_raw(plugin),
        Err(_) => std::ptr::null_mut::<P>() as *mut dyn Plugin,
    }
}

/// Export a plugin type for dynamic loading.
///
/// This macro generates the C ABI entry points that gradience uses to
/// construct plugins from a shared library.
///
/// # Usage
///
/// ```ignore
/// gradience_plugin_api::export_plugin!(MyPlugin);
/// ```
///
/// # Generated Functions
///
/// - `_gradience_plugin_create()`: Creates a new plugin instance, or returns
///   null if construction panicked
/// - `_gradience_plugin_api_version()`: Returns the API version
#[macro_export]
macro_rules! export_plugin {
    ($plugin_type:ty) => {
        #[unsafe(no_mangle)]
        pub extern "C" fn _gradience_plugin_create() -> *mut dyn $crate::Plugin {
            $crate::construct_plugin::<$plugin_type>()
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn _gradience_plugin_api_version() -> u32 {
            $crate::API_VERSION
        }
    };
}
