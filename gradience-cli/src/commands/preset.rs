//! Preset commands: run presets through the plugin hooks

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use gradience_core::{FileSettings, PluginsList, ValidationReport};
use gradience_plugin_api::Preset;

use super::{discover_plugins, format_report};
use crate::config::{ConfigLoader, GradienceConfig};

#[derive(Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    pub command: PresetCommands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PresetCommands {
    /// Ask every enabled plugin to validate a preset
    Validate {
        /// Preset JSON file
        file: PathBuf,
    },
    /// Apply a preset, then let plugins save their state for it
    Apply {
        /// Preset JSON file
        file: PathBuf,
    },
    /// Print the settings plugins contribute, as JSON
    Settings {
        /// Collect settings for this preset instead of the defaults
        #[arg(long)]
        preset: Option<PathBuf>,
    },
}

pub fn run(args: PresetArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut plugins = discover_plugins(&config)?;
    let mut settings = load_settings(&config, &mut plugins)?;

    let result = match args.command {
        PresetCommands::Validate { file } => validate(&mut plugins, &load_preset(&file)?),
        PresetCommands::Apply { file } => apply(&mut plugins, &load_preset(&file)?),
        PresetCommands::Settings { preset } => {
            let collected = match preset {
                Some(file) => plugins.settings(&load_preset(&file)?),
                None => plugins.collect_all_custom_settings_for_preset(),
            };
            println!("{}", render_settings(&collected)?);
            Ok(())
        }
    };

    // Plugins may have written to the store while handling the preset
    if settings.is_dirty() {
        settings
            .save()
            .with_context(|| format!("Failed to save {}", config.settings.path.display()))?;
    }
    result
}

/// Open the shared settings file and hand it to every plugin
fn load_settings(config: &GradienceConfig, plugins: &mut PluginsList) -> Result<FileSettings> {
    let mut settings = FileSettings::load(&config.settings.path)
        .with_context(|| format!("Failed to load {}", config.settings.path.display()))?;

    let report = plugins.load_all_custom_settings(&mut settings);
    for (id, _) in report.failures() {
        tracing::warn!(plugin = %id, "Plugin could not load its settings");
    }
    Ok(settings)
}

fn load_preset(path: &Path) -> Result<Preset> {
    Preset::load(path).with_context(|| format!("Failed to load preset {}", path.display()))
}

fn validate(plugins: &mut PluginsList, preset: &Preset) -> Result<()> {
    let report = plugins.validate(preset);
    print!("{}", describe_validation(&preset.name, &report));

    if !report.is_valid() {
        bail!(
            "Preset '{}' was rejected by {} plugin(s)",
            preset.name,
            report.rejections.len()
        );
    }
    Ok(())
}

fn describe_validation(name: &str, report: &ValidationReport) -> String {
    let mut out = String::new();
    for (id, reason) in &report.rejections {
        out.push_str(&format!("✗ {}: {}\n", id, reason));
    }
    if report.is_valid() {
        out.push_str(&format!(
            "Preset '{}' is valid ({} plugin(s) checked)\n",
            name, report.checked
        ));
    }
    out
}

fn apply(plugins: &mut PluginsList, preset: &Preset) -> Result<()> {
    tracing::info!(preset = %preset.name, "Applying preset");

    let applied = plugins.apply(preset);
    for line in format_report(&applied) {
        println!("apply {}", line);
    }

    let saved = plugins.save(preset);
    for line in format_report(&saved) {
        println!("save  {}", line);
    }

    let failed = applied.failures().count() + saved.failures().count();
    if failed > 0 {
        bail!("Preset '{}' applied with {} plugin error(s)", preset.name, failed);
    }
    println!("Applied preset '{}'", preset.name);
    Ok(())
}

fn render_settings(collected: &BTreeMap<String, serde_json::Value>) -> Result<String> {
    Ok(serde_json::to_string_pretty(collected)?)
}
