//! Plugin management commands

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use gradience_core::{PluginInfo, PluginState, PluginsList};

use super::{discover_plugins, format_report};
use crate::config::ConfigLoader;

/// Plugin management arguments
#[derive(Args)]
pub struct PluginsArgs {
    #[command(subcommand)]
    pub command: PluginsCommands,
}

/// Plugin subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum PluginsCommands {
    /// List discovered plugins
    List,
    /// Show plugin details
    Info {
        /// Plugin identifier, e.g. gradience_monet
        id: String,
    },
    /// Run every plugin's self-test
    Check,
    /// Enable a plugin
    Enable {
        /// Plugin identifier to enable
        id: String,
    },
    /// Disable a plugin
    Disable {
        /// Plugin identifier to disable
        id: String,
    },
}

/// Run plugin command
pub fn run(args: PluginsArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let mut plugins = discover_plugins(&config)?;

    match args.command {
        PluginsCommands::List => list_plugins(&plugins),
        PluginsCommands::Info { id } => show_plugin_info(&plugins, &id),
        PluginsCommands::Check => check_plugins(&mut plugins),
        PluginsCommands::Enable { id } => {
            plugins.enable_plugin(&id)?;
            println!("Enabled plugin: {}", id);
            Ok(())
        }
        PluginsCommands::Disable { id } => {
            plugins.disable_plugin(&id)?;
            println!("Disabled plugin: {}", id);
            Ok(())
        }
    }
}

fn list_plugins(plugins: &PluginsList) -> Result<()> {
    print!("{}", plugins.to_group());

    if !plugins.discovery_failures().is_empty() {
        println!();
        println!("Failed to load:");
        for failure in plugins.discovery_failures() {
            println!("✗ {}    {}", failure.id, failure.error);
        }
    }
    Ok(())
}

fn show_plugin_info(plugins: &PluginsList, id: &str) -> Result<()> {
    match plugins.plugin_info(id) {
        Some(info) => {
            print!("{}", describe(&info));
            Ok(())
        }
        None => bail!("Plugin '{}' not found. Run 'gradience plugins list' to see all plugins.", id),
    }
}

fn describe(info: &PluginInfo) -> String {
    let m = &info.manifest;
    let or = |value: &str, fallback: &str| {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };
    let status = match &info.state {
        PluginState::Loaded => "Loaded".to_string(),
        PluginState::Disabled { reason } => format!("Disabled ({})", reason),
        PluginState::Failed { error } => format!("Failed ({})", error),
    };

    format!(
        "Identifier:  {}\nTitle:       {}\nVersion:     {}\nAPI Version: {}\nAuthor:      {}\nDescription: {}\nStatus:      {}\n",
        info.id,
        m.title,
        m.version,
        m.api_version,
        or(&m.author, "Unknown"),
        or(&m.description, "No description"),
        status,
    )
}

fn check_plugins(plugins: &mut PluginsList) -> Result<()> {
    let report = plugins.check();
    if report.invoked() == 0 {
        println!("No plugins to check");
        return Ok(());
    }

    for line in format_report(&report) {
        println!("{}", line);
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} plugin(s) failed their check", failed, report.invoked());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradience_plugin_api::PluginManifest;

    #[test]
    fn test_plugins_args_parsing() {
        use clap::Parser;

        #[derive(Parser)]
        struct TestCli {
            #[command(subcommand)]
            cmd: PluginsCommands,
        }

        let cli = TestCli::parse_from(["test", "list"]);
        assert_eq!(cli.cmd, PluginsCommands::List);

        let cli = TestCli::parse_from(["test", "check"]);
        assert_eq!(cli.cmd, PluginsCommands::Check);

        let cli = TestCli::parse_from(["test", "enable", "gradience_monet"]);
        assert!(matches!(cli.cmd, PluginsCommands::Enable { id } if id == "gradience_monet"));

        let cli = TestCli::parse_from(["test", "disable", "gradience_monet"]);
        assert!(matches!(cli.cmd, PluginsCommands::Disable { id } if id == "gradience_monet"));

        let cli = TestCli::parse_from(["test", "info", "gradience_shell"]);
        assert!(matches!(cli.cmd, PluginsCommands::Info { id } if id == "gradience_shell"));

        assert!(TestCli::try_parse_from(["test", "enable"]).is_err());
    }

    #[test]
    fn test_describe_fills_in_missing_fields() {
        let info = PluginInfo {
            id: "gradience_shell".to_string(),
            manifest: PluginManifest {
                title: "GNOME Shell".to_string(),
                version: "0.2.0".to_string(),
                ..Default::default()
            },
            state: PluginState::Disabled {
                reason: "Disabled by user".to_string(),
            },
        };

        let text = describe(&info);
        assert!(text.contains("Identifier:  gradience_shell"));
        assert!(text.contains("Title:       GNOME Shell"));
        assert!(text.contains("Version:     0.2.0"));
        assert!(text.contains("Author:      Unknown"));
        assert!(text.contains("Description: No description"));
        assert!(text.contains("Status:      Disabled (Disabled by user)"));
    }

    #[test]
    fn test_check_with_no_plugins_succeeds() {
        let loader = gradience_core::plugins::StaticLoader::new();
        let mut plugins = PluginsList::discover(&loader);
        assert!(check_plugins(&mut plugins).is_ok());
    }
}
