//! Presentation model for the plugin list
//!
//! A headless description of the "Plugins" preferences group. A UI layer
//! turns it into widgets; the CLI prints it through `Display`.

use std::fmt;

/// Title of the plugins group
pub const GROUP_TITLE: &str = "Plugins";

/// Description shown under the group title
pub const GROUP_DESCRIPTION: &str = "Plugins add additional features to Gradience, plugins are made by Gradience community and can make issues.";

/// Title of the row shown when no plugin was discovered
pub const NO_PLUGINS_TITLE: &str = "No plugins found";

/// One row per discovered plugin
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRow {
    /// Title declared in the plugin manifest
    pub title: String,
    /// Plugin identifier
    pub plugin_id: String,
    /// Whether the plugin is currently enabled
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupRow {
    Plugin(PluginRow),
    /// Stand-in row when there is nothing to list
    Placeholder { title: String },
}

/// A titled, described container of rows
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesGroup {
    pub title: String,
    pub description: String,
    pub rows: Vec<GroupRow>,
}

impl PreferencesGroup {
    /// Build the plugins group. An empty `rows` becomes a single placeholder.
    pub fn plugins(rows: Vec<PluginRow>) -> Self {
        let rows = if rows.is_empty() {
            vec![GroupRow::Placeholder {
                title: NO_PLUGINS_TITLE.to_string(),
            }]
        } else {
            rows.into_iter().map(GroupRow::Plugin).collect()
        };

        Self {
            title: GROUP_TITLE.to_string(),
            description: GROUP_DESCRIPTION.to_string(),
            rows,
        }
    }

    /// Plugin rows only, skipping any placeholder
    pub fn plugin_rows(&self) -> impl Iterator<Item = &PluginRow> {
        self.rows.iter().filter_map(|row| match row {
            GroupRow::Plugin(row) => Some(row),
            GroupRow::Placeholder { .. } => None,
        })
    }
}

impl fmt::Display for PreferencesGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        for row in &self.rows {
            match row {
                GroupRow::Plugin(row) => {
                    let status = if row.enabled { "✓" } else { "○" };
                    writeln!(f, "{} {}    {}", status, row.title, row.plugin_id)?;
                }
                GroupRow::Placeholder { title } => writeln!(f, "{}", title)?,
            }
        }
        Ok(())
    }
}
