//! PluginsList - owns discovered plugins and fans hooks out to them

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use gradience_plugin_api::{Hook, Plugin, PluginError, PluginManifest, Preset, SettingsStore};

use super::dispatch::{DispatchReport, HookOutcome, ValidationReport};
use super::error::PluginHostError;
use super::loader::{Discovery, DiscoveryFailure, LoadedPlugin, PluginLoader};
use super::presentation::{PluginRow, PreferencesGroup};
use super::registry::PluginRegistry;

/// State of a registered plugin
#[derive(Debug, Clone, PartialEq)]
pub enum PluginState {
    /// Plugin is loaded and active
    Loaded,
    /// Plugin is disabled
    Disabled { reason: String },
    /// Plugin has failed (panicked in a hook)
    Failed { error: String },
}

/// Information about a plugin
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// Plugin identifier
    pub id: String,
    /// Plugin manifest
    pub manifest: PluginManifest,
    /// Current state
    pub state: PluginState,
}

/// A registered plugin with its runtime state
struct RegisteredPlugin {
    manifest: PluginManifest,
    plugin: LoadedPlugin,
    state: PluginState,
}

/// Which plugins a fan-out call reaches
#[derive(Debug, Clone, Copy)]
enum Reach {
    /// Only plugins in the `Loaded` state
    Active,
    /// Loaded and disabled plugins; failed ones are always skipped
    Registered,
}

impl Reach {
    fn includes(self, state: &PluginState) -> bool {
        match (self, state) {
            (_, PluginState::Failed { .. }) => false,
            (Reach::Active, PluginState::Disabled { .. }) => false,
            _ => true,
        }
    }

    /// `settings` with a bound preset is preset processing, so it follows
    /// the other preset hooks
    fn for_hook(hook: Hook, preset_bound: bool) -> Self {
        match hook {
            Hook::Apply | Hook::Save | Hook::Validate => Reach::Active,
            Hook::Settings if preset_bound => Reach::Active,
            Hook::Enable | Hook::Disable | Hook::Check | Hook::Settings => Reach::Registered,
        }
    }
}

/// The discovered plugins, keyed by identifier.
///
/// Construction runs discovery, so a `PluginsList` is always fully
/// populated. Every hook call is isolated per plugin: errors are logged and
/// reported, panics are caught and mark the plugin failed, and the remaining
/// plugins are still invoked.
pub struct PluginsList {
    plugins: BTreeMap<String, RegisteredPlugin>,
    registry: PluginRegistry,
    /// Where enable/disable changes are persisted, if anywhere
    registry_path: Option<PathBuf>,
    failures: Vec<DiscoveryFailure>,
}

impl PluginsList {
    /// Discover plugins with every plugin enabled and nothing persisted
    pub fn discover(loader: &dyn PluginLoader) -> Self {
        Self::with_registry(loader, PluginRegistry::default(), None)
    }

    /// Discover plugins, honouring and updating the registry file at `path`
    pub fn discover_with_registry(
        loader: &dyn PluginLoader,
        path: PathBuf,
    ) -> Result<Self, PluginHostError> {
        let registry = PluginRegistry::load(&path)?;
        Ok(Self::with_registry(loader, registry, Some(path)))
    }

    fn with_registry(
        loader: &dyn PluginLoader,
        registry: PluginRegistry,
        registry_path: Option<PathBuf>,
    ) -> Self {
        let mut list = Self {
            plugins: BTreeMap::new(),
            registry,
            registry_path,
            failures: Vec::new(),
        };
        list.rediscover(loader);
        list
    }

    /// Run discovery again and replace the whole mapping at once
    pub fn rediscover(&mut self, loader: &dyn PluginLoader) -> &[DiscoveryFailure] {
        let (plugins, failures) = self.register(loader.discover());
        tracing::info!(
            loaded = plugins.len(),
            failed = failures.len(),
            "Plugin discovery complete"
        );
        self.plugins = plugins;
        self.failures = failures;
        &self.failures
    }

    fn register(
        &self,
        discovery: Discovery,
    ) -> (BTreeMap<String, RegisteredPlugin>, Vec<DiscoveryFailure>) {
        let Discovery {
            plugins: found,
            mut failures,
        } = discovery;
        let mut plugins = BTreeMap::new();

        for (id, plugin) in found {
            if plugins.contains_key(&id) {
                tracing::error!(plugin = %id, "Duplicate plugin identifier, keeping the first");
                failures.push(DiscoveryFailure {
                    error: PluginHostError::Duplicate { name: id.clone() },
                    id,
                });
                continue;
            }

            let manifest =
                match std::panic::catch_unwind(AssertUnwindSafe(|| plugin.instance.manifest())) {
                    Ok(manifest) => manifest,
                    Err(_) => {
                        tracing::error!(plugin = %id, "Plugin panicked in manifest");
                        failures.push(DiscoveryFailure {
                            error: PluginHostError::ConstructionPanicked { name: id.clone() },
                            id,
                        });
                        continue;
                    }
                };

            let state = if self.registry.is_enabled(&id) {
                PluginState::Loaded
            } else {
                PluginState::Disabled {
                    reason: "Disabled by user".to_string(),
                }
            };

            tracing::info!(
                plugin = %id,
                title = %manifest.title,
                version = %manifest.version,
                "Plugin registered"
            );
            plugins.insert(
                id,
                RegisteredPlugin {
                    manifest,
                    plugin,
                    state,
                },
            );
        }

        (plugins, failures)
    }

    /// Failures from the most recent discovery pass
    pub fn discovery_failures(&self) -> &[DiscoveryFailure] {
        &self.failures
    }

    // ─── Bulk operations ─────────────────────────────────────────────

    /// Hand the shared settings store to every plugin
    pub fn load_all_custom_settings(&mut self, settings: &mut dyn SettingsStore) -> DispatchReport {
        let results = self.fan_out("load_custom_settings", Reach::Registered, |plugin| {
            plugin.load_custom_settings(&mut *settings)
        });
        report(results)
    }

    /// Ask every plugin for its settings before a preset is bound.
    ///
    /// Plugins that contribute nothing, fail or panic have no entry.
    pub fn collect_all_custom_settings_for_preset(
        &mut self,
    ) -> BTreeMap<String, serde_json::Value> {
        self.collect_settings(None)
    }

    /// Ask active plugins for their settings for a specific preset
    pub fn settings(&mut self, preset: &Preset) -> BTreeMap<String, serde_json::Value> {
        self.collect_settings(Some(preset))
    }

    fn collect_settings(&mut self, preset: Option<&Preset>) -> BTreeMap<String, serde_json::Value> {
        let reach = Reach::for_hook(Hook::Settings, preset.is_some());
        self.fan_out(Hook::Settings.name(), reach, |plugin| plugin.settings(preset))
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(Some(value)) => Some((id, value)),
                _ => None,
            })
            .collect()
    }

    /// Invoke `hook` on every plugin it reaches.
    ///
    /// `apply`, `save`, `validate` and `settings` with a preset reach only
    /// enabled plugins; the other hooks also reach disabled ones. `enable`
    /// and `disable` go through [`enable_plugin`](Self::enable_plugin) /
    /// [`disable_plugin`](Self::disable_plugin) for each plugin, so state and
    /// registry follow the hook. Values returned by `settings` are discarded
    /// here; use [`settings`](Self::settings) to collect them.
    pub fn dispatch(&mut self, hook: Hook, preset: Option<&Preset>) -> DispatchReport {
        if let Some(enabled) = match hook {
            Hook::Enable => Some(true),
            Hook::Disable => Some(false),
            _ => None,
        } {
            return self.set_all_enabled(enabled);
        }

        let reach = Reach::for_hook(hook, preset.is_some());
        let results = self.fan_out(hook.name(), reach, |plugin| {
            hook.call(plugin, preset).map(|_| ())
        });
        report(results)
    }

    fn set_all_enabled(&mut self, enabled: bool) -> DispatchReport {
        let ids: Vec<String> = self
            .plugins
            .iter()
            .filter(|(_, p)| Reach::Registered.includes(&p.state))
            .map(|(id, _)| id.clone())
            .collect();

        let mut report = DispatchReport::default();
        for id in ids {
            let outcome = match self.set_enabled(&id, enabled) {
                Ok(()) => HookOutcome::Completed,
                Err(_) if self.is_failed(&id) => HookOutcome::Panicked,
                Err(PluginHostError::HookFailed { error, .. }) => HookOutcome::Failed { error },
                Err(e) => HookOutcome::Failed {
                    error: e.to_string(),
                },
            };
            report.outcomes.insert(id, outcome);
        }
        report
    }

    fn is_failed(&self, id: &str) -> bool {
        matches!(
            self.plugins.get(id).map(|p| &p.state),
            Some(PluginState::Failed { .. })
        )
    }

    /// Dispatch `apply`
    pub fn apply(&mut self, preset: &Preset) -> DispatchReport {
        self.dispatch(Hook::Apply, Some(preset))
    }

    /// Dispatch `save`
    pub fn save(&mut self, preset: &Preset) -> DispatchReport {
        self.dispatch(Hook::Save, Some(preset))
    }

    /// Dispatch `check`
    pub fn check(&mut self) -> DispatchReport {
        self.dispatch(Hook::Check, None)
    }

    /// Ask every enabled plugin to validate `preset`
    pub fn validate(&mut self, preset: &Preset) -> ValidationReport {
        let results = self.fan_out(Hook::Validate.name(), Reach::Active, |plugin| {
            plugin.validate(preset)
        });

        let mut report = ValidationReport {
            checked: results.len(),
            ..Default::default()
        };
        for (id, result) in results {
            let reason = match result {
                Ok(()) => continue,
                Err(HookOutcome::Failed { error }) => error,
                Err(_) => "plugin panicked during validation".to_string(),
            };
            report.rejections.insert(id, reason);
        }
        report
    }

    /// Call `f` on each reached plugin with panic isolation
    fn fan_out<T>(
        &mut self,
        operation: &str,
        reach: Reach,
        mut f: impl FnMut(&mut dyn Plugin) -> Result<T, PluginError>,
    ) -> Vec<(String, Result<T, HookOutcome>)> {
        let mut results = Vec::new();

        for (id, entry) in &mut self.plugins {
            if !reach.includes(&entry.state) {
                continue;
            }

            let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                f(entry.plugin.instance.as_mut())
            }));

            let result = match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => {
                    tracing::error!(plugin = %id, operation, error = %e, "Plugin hook error");
                    Err(HookOutcome::Failed {
                        error: e.to_string(),
                    })
                }
                Err(_) => {
                    tracing::error!(plugin = %id, operation, "Plugin panicked, disabling");
                    entry.state = PluginState::Failed {
                        error: format!("Plugin panicked in {operation}"),
                    };
                    Err(HookOutcome::Panicked)
                }
            };
            results.push((id.clone(), result));
        }

        results
    }

    // ─── Single plugin ───────────────────────────────────────────────

    /// Enable a plugin: run its `enable` hook, then record the change
    pub fn enable_plugin(&mut self, id: &str) -> Result<(), PluginHostError> {
        self.set_enabled(id, true)
    }

    /// Disable a plugin: run its `disable` hook, then record the change
    pub fn disable_plugin(&mut self, id: &str) -> Result<(), PluginHostError> {
        self.set_enabled(id, false)
    }

    /// If the registry cannot be saved the plugin's previous state is
    /// restored, so memory and disk never disagree.
    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), PluginHostError> {
        let hook = if enabled { Hook::Enable } else { Hook::Disable };
        let previous = self.toggle(id, hook)?;

        let mut registry = self.registry.clone();
        if enabled {
            registry.enable(id);
        } else {
            registry.disable(id);
        }

        if let Some(path) = &self.registry_path
            && let Err(e) = registry.save(path)
        {
            tracing::error!(plugin = %id, error = %e, "Failed to save plugin registry, reverting");
            if let Some(entry) = self.plugins.get_mut(id) {
                entry.state = previous;
            }
            return Err(e);
        }

        self.registry = registry;
        Ok(())
    }

    /// Run the toggle hook and update the state; returns the previous state
    fn toggle(&mut self, id: &str, hook: Hook) -> Result<PluginState, PluginHostError> {
        let entry = self
            .plugins
            .get_mut(id)
            .ok_or_else(|| PluginHostError::NotFound {
                name: id.to_string(),
            })?;

        if let PluginState::Failed { error } = &entry.state {
            return Err(PluginHostError::PluginFailed {
                name: id.to_string(),
                error: error.clone(),
            });
        }

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            hook.call(entry.plugin.instance.as_mut(), None)
        }));

        let error = match result {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => {
                entry.state = PluginState::Failed {
                    error: format!("Plugin panicked in {hook}"),
                };
                Some("plugin panicked".to_string())
            }
        };

        if let Some(error) = error {
            tracing::error!(plugin = %id, %hook, error = %error, "Plugin toggle failed");
            return Err(PluginHostError::HookFailed {
                name: id.to_string(),
                hook,
                error,
            });
        }

        let state = match hook {
            Hook::Disable => PluginState::Disabled {
                reason: "Disabled by user".to_string(),
            },
            _ => PluginState::Loaded,
        };
        tracing::info!(plugin = %id, %hook, "Plugin toggled");
        Ok(std::mem::replace(&mut entry.state, state))
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// Get information about a specific plugin
    pub fn plugin_info(&self, id: &str) -> Option<PluginInfo> {
        self.plugins.get(id).map(|p| PluginInfo {
            id: id.to_string(),
            manifest: p.manifest.clone(),
            state: p.state.clone(),
        })
    }

    /// List all plugins in identifier order
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|(id, p)| PluginInfo {
                id: id.clone(),
                manifest: p.manifest.clone(),
                state: p.state.clone(),
            })
            .collect()
    }

    /// Plugin identifiers in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Get the number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Render the plugins preferences group
    pub fn to_group(&self) -> PreferencesGroup {
        let rows = self
            .plugins
            .iter()
            .map(|(id, p)| PluginRow {
                title: p.manifest.title.clone(),
                plugin_id: id.clone(),
                enabled: p.state == PluginState::Loaded,
            })
            .collect();
        PreferencesGroup::plugins(rows)
    }
}

impl std::fmt::Debug for PluginsList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginsList")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("failures", &self.failures.len())
            .finish()
    }
}

fn report(results: Vec<(String, Result<(), HookOutcome>)>) -> DispatchReport {
    DispatchReport {
        outcomes: results
            .into_iter()
            .map(|(id, result)| (id, result.err().unwrap_or(HookOutcome::Completed)))
            .collect(),
    }
}
