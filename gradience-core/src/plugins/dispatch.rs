//! Outcomes of fan-out hook dispatch

use std::collections::BTreeMap;

/// What happened when one plugin's hook was invoked
#[derive(Debug, Clone, PartialEq)]
pub enum HookOutcome {
    /// The hook returned successfully (including default no-op hooks)
    Completed,
    /// The hook returned an error
    Failed { error: String },
    /// The hook panicked; the plugin has been marked failed
    Panicked,
}

impl HookOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Per-plugin outcomes of one fan-out call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub outcomes: BTreeMap<String, HookOutcome>,
}

impl DispatchReport {
    /// Number of plugins the hook was invoked on
    pub fn invoked(&self) -> usize {
        self.outcomes.len()
    }

    /// True when every invoked plugin completed
    pub fn is_success(&self) -> bool {
        self.outcomes.values().all(HookOutcome::is_completed)
    }

    /// Plugins that failed or panicked
    pub fn failures(&self) -> impl Iterator<Item = (&str, &HookOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_completed())
            .map(|(id, outcome)| (id.as_str(), outcome))
    }
}

/// Result of running `validate` across plugins
///
/// A rejection is any error or panic from a plugin's `validate` hook. It
/// describes the preset, not the health of the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Number of plugins that were asked
    pub checked: usize,
    /// Rejection messages keyed by plugin identifier
    pub rejections: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.rejections.is_empty()
    }
}
