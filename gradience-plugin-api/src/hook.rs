//! Hooks - the fixed vocabulary of plugin lifecycle operations
//!
//! Every hook is independently optional. [`Plugin`](crate::Plugin) gives each
//! one a no-op default body, so calling a hook that a plugin never overrode
//! does nothing and succeeds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PluginError;
use crate::preset::Preset;
use crate::Plugin;

/// What a hook receives as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookInput {
    /// The hook receives the preset being processed
    Preset,
    /// The hook takes no arguments
    None,
}

/// The seven hooks a plugin may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    /// React to a preset being applied
    Apply,
    /// Persist state associated with a preset
    Save,
    /// Check a preset for plugin-specific validity
    Validate,
    /// Plugin was switched on
    Enable,
    /// Plugin was switched off
    Disable,
    /// Self-test / availability probe
    Check,
    /// Contribute or retrieve settings associated with a preset
    Settings,
}

impl Hook {
    /// All hooks in declaration order
    pub const ALL: [Hook; 7] = [
        Hook::Apply,
        Hook::Save,
        Hook::Validate,
        Hook::Enable,
        Hook::Disable,
        Hook::Check,
        Hook::Settings,
    ];

    /// The hook's name as used in manifests and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Hook::Apply => "apply",
            Hook::Save => "save",
            Hook::Validate => "validate",
            Hook::Enable => "enable",
            Hook::Disable => "disable",
            Hook::Check => "check",
            Hook::Settings => "settings",
        }
    }

    /// The declared input shape of the hook
    pub fn input(self) -> HookInput {
        match self {
            Hook::Apply | Hook::Save | Hook::Validate | Hook::Settings => HookInput::Preset,
            Hook::Enable | Hook::Disable | Hook::Check => HookInput::None,
        }
    }

    /// Invoke this hook on a plugin.
    ///
    /// `settings` is the only preset hook that may be called without a preset
    /// (nothing is bound yet when settings are collected). The other preset
    /// hooks return [`PluginError::MissingPreset`] when `preset` is `None`.
    /// Only `settings` produces a value.
    pub fn call(
        self,
        plugin: &mut dyn Plugin,
        preset: Option<&Preset>,
    ) -> Result<Option<serde_json::Value>, PluginError> {
        let missing = PluginError::MissingPreset(self);

        match self {
            Hook::Apply => plugin.apply(preset.ok_or(missing)?).map(|()| None),
            Hook::Save => plugin.save(preset.ok_or(missing)?).map(|()| None),
            Hook::Validate => plugin.validate(preset.ok_or(missing)?).map(|()| None),
            Hook::Enable => plugin.enable().map(|()| None),
            Hook::Disable => plugin.disable().map(|()| None),
            Hook::Check => plugin.check().map(|()| None),
            Hook::Settings => plugin.settings(preset),
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hook {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .into_iter()
            .find(|hook| hook.name() == s)
            .ok_or_else(|| PluginError::UnknownHook(s.to_string()))
    }
}
