pub mod config;
pub mod plugins;
pub mod preset;

use anyhow::{Context, Result};
use gradience_core::plugins::{DispatchReport, DylibLoader, HookOutcome, PluginsList};

use crate::config::GradienceConfig;

/// Discover plugins from the configured directories, honouring the registry
pub(crate) fn discover_plugins(config: &GradienceConfig) -> Result<PluginsList> {
    let loader =
        DylibLoader::new(config.plugins.dirs.clone()).with_prefix(config.plugins.prefix.clone());
    let registry = gradience_paths::registry_path();

    let plugins = PluginsList::discover_with_registry(&loader, registry.clone())
        .with_context(|| format!("Failed to read plugin registry {}", registry.display()))?;

    for failure in plugins.discovery_failures() {
        tracing::warn!(plugin = %failure.id, error = %failure.error, "Plugin skipped");
    }
    Ok(plugins)
}

/// One line per invoked plugin
pub(crate) fn format_report(report: &DispatchReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .map(|(id, outcome)| match outcome {
            HookOutcome::Completed => format!("✓ {}", id),
            HookOutcome::Failed { error } => format!("✗ {}: {}", id, error),
            HookOutcome::Panicked => format!("✗ {}: panicked", id),
        })
        .collect()
}
