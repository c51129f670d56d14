//! Preferences model - the toggle logic behind the preferences window
//!
//! Each toggle maps to a key in the settings store. Flatpak theming toggles
//! also call out to a [`FlatpakOverrides`] implementation, which owns the
//! actual override files.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use gradience_plugin_api::{SettingsStore, SettingsValue};

use crate::error::PreferencesError;

/// Settings key holding the enabled theme engines (string array)
pub const ENABLED_THEME_ENGINES_KEY: &str = "enabled-theme-engines";

/// Settings key for fetching presets through the jsDelivr CDN (boolean)
pub const USE_JSDELIVR_KEY: &str = "use-jsdeliver";

/// GTK major version an override applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GtkVersion {
    Gtk3,
    Gtk4,
}

impl GtkVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gtk3 => "gtk3",
            Self::Gtk4 => "gtk4",
        }
    }

    pub fn major(self) -> u8 {
        match self {
            Self::Gtk3 => 3,
            Self::Gtk4 => 4,
        }
    }
}

impl fmt::Display for GtkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an override is written for the current user or system-wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideScope {
    User,
    Global,
}

impl OverrideScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for OverrideScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings key for a Flatpak theming toggle, e.g. `user-flatpak-theming-gtk4`
pub fn flatpak_theming_key(scope: OverrideScope, gtk: GtkVersion) -> String {
    format!("{}-flatpak-theming-{}", scope, gtk)
}

/// Optional theme engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeEngine {
    /// GNOME Shell theming
    Shell,
    /// Palette generation from the wallpaper
    Monet,
}

impl ThemeEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Monet => "monet",
        }
    }
}

impl fmt::Display for ThemeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeEngine {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(Self::Shell),
            "monet" => Ok(Self::Monet),
            other => Err(PreferencesError::UnknownThemeEngine(other.to_string())),
        }
    }
}

/// Writes and removes Flatpak permission overrides
pub trait FlatpakOverrides {
    fn create_override(
        &mut self,
        settings: &mut dyn SettingsStore,
        gtk: GtkVersion,
        scope: OverrideScope,
    ) -> Result<(), PreferencesError>;

    fn remove_override(
        &mut self,
        settings: &mut dyn SettingsStore,
        gtk: GtkVersion,
        scope: OverrideScope,
    ) -> Result<(), PreferencesError>;
}

/// Typed view over the preference keys of a settings store
pub struct Preferences<'a> {
    settings: &'a mut dyn SettingsStore,
}

impl<'a> Preferences<'a> {
    pub fn new(settings: &'a mut dyn SettingsStore) -> Self {
        Self { settings }
    }

    /// Whether Flatpak apps are themed for `gtk` in `scope`
    pub fn flatpak_theming(&self, scope: OverrideScope, gtk: GtkVersion) -> bool {
        self.settings.get_boolean(&flatpak_theming_key(scope, gtk))
    }

    /// Switch Flatpak theming on or off.
    ///
    /// The setting only changes if the override was written or removed.
    pub fn set_flatpak_theming(
        &mut self,
        overrides: &mut dyn FlatpakOverrides,
        scope: OverrideScope,
        gtk: GtkVersion,
        enabled: bool,
    ) -> Result<(), PreferencesError> {
        if enabled {
            overrides.create_override(&mut *self.settings, gtk, scope)?;
        } else {
            overrides.remove_override(&mut *self.settings, gtk, scope)?;
        }

        let key = flatpak_theming_key(scope, gtk);
        self.settings.set_boolean(&key, enabled);
        tracing::debug!(key = %key, enabled, "Flatpak theming updated");
        Ok(())
    }

    /// Theme engines currently enabled. Unknown names are ignored.
    pub fn enabled_theme_engines(&self) -> BTreeSet<ThemeEngine> {
        self.settings
            .get_value(ENABLED_THEME_ENGINES_KEY)
            .as_ref()
            .and_then(SettingsValue::as_string_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| match name.parse() {
                        Ok(engine) => Some(engine),
                        Err(e) => {
                            tracing::warn!(error = %e, "Ignoring stored theme engine");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Enable or disable one theme engine and return the resulting set
    pub fn set_theme_engine(&mut self, engine: ThemeEngine, enabled: bool) -> BTreeSet<ThemeEngine> {
        let mut engines = self.enabled_theme_engines();
        if enabled {
            engines.insert(engine);
        } else {
            engines.remove(&engine);
        }

        let names: Vec<String> = engines.iter().map(|e| e.as_str().to_string()).collect();
        let value = SettingsValue::StringArray(names);
        tracing::debug!(key = ENABLED_THEME_ENGINES_KEY, %value, "Theme engines updated");
        self.settings.set_value(ENABLED_THEME_ENGINES_KEY, value);
        engines
    }

    pub fn use_jsdelivr(&self) -> bool {
        self.settings.get_boolean(USE_JSDELIVR_KEY)
    }

    pub fn set_use_jsdelivr(&mut self, enabled: bool) {
        self.settings.set_boolean(USE_JSDELIVR_KEY, enabled);
        tracing::debug!(key = USE_JSDELIVR_KEY, enabled, "jsDelivr preference updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradience_plugin_api::MemorySettings;

    /// Records override calls; fails for the scopes listed in `failing`
    #[derive(Default)]
    struct FakeOverrides {
        calls: Vec<(&'static str, GtkVersion, OverrideScope)>,
        failing: Vec<OverrideScope>,
    }

    impl FakeOverrides {
        fn record(
            &mut self,
            action: &'static str,
            gtk: GtkVersion,
            scope: OverrideScope,
        ) -> Result<(), PreferencesError> {
            if self.failing.contains(&scope) {
                return Err(PreferencesError::Override {
                    gtk,
                    scope,
                    message: "permission denied".to_string(),
                });
            }
            self.calls.push((action, gtk, scope));
            Ok(())
        }
    }

    impl FlatpakOverrides for FakeOverrides {
        fn create_override(
            &mut self,
            _settings: &mut dyn SettingsStore,
            gtk: GtkVersion,
            scope: OverrideScope,
        ) -> Result<(), PreferencesError> {
            self.record("create", gtk, scope)
        }

        fn remove_override(
            &mut self,
            _settings: &mut dyn SettingsStore,
            gtk: GtkVersion,
            scope: OverrideScope,
        ) -> Result<(), PreferencesError> {
            self.record("remove", gtk, scope)
        }
    }

    #[test]
    fn test_flatpak_theming_keys() {
        assert_eq!(
            flatpak_theming_key(OverrideScope::User, GtkVersion::Gtk4),
            "user-flatpak-theming-gtk4"
        );
        assert_eq!(
            flatpak_theming_key(OverrideScope::Global, GtkVersion::Gtk3),
            "global-flatpak-theming-gtk3"
        );
        assert_eq!(GtkVersion::Gtk3.major(), 3);
    }

    #[test]
    fn test_enable_flatpak_theming_creates_override() {
        let mut settings = MemorySettings::new();
        let mut overrides = FakeOverrides::default();
        let mut prefs = Preferences::new(&mut settings);

        prefs
            .set_flatpak_theming(&mut overrides, OverrideScope::User, GtkVersion::Gtk4, true)
            .unwrap();

        assert!(prefs.flatpak_theming(OverrideScope::User, GtkVersion::Gtk4));
        assert!(!prefs.flatpak_theming(OverrideScope::User, GtkVersion::Gtk3));
        assert_eq!(
            overrides.calls,
            vec![("create", GtkVersion::Gtk4, OverrideScope::User)]
        );
    }

    #[test]
    fn test_disable_flatpak_theming_removes_override() {
        let mut settings = MemorySettings::new();
        settings.set_boolean("user-flatpak-theming-gtk3", true);
        let mut overrides = FakeOverrides::default();
        let mut prefs = Preferences::new(&mut settings);

        prefs
            .set_flatpak_theming(&mut overrides, OverrideScope::User, GtkVersion::Gtk3, false)
            .unwrap();

        assert!(!prefs.flatpak_theming(OverrideScope::User, GtkVersion::Gtk3));
        assert_eq!(overrides.calls[0].0, "remove");
    }

    #[test]
    fn test_failed_override_leaves_setting_unchanged() {
        let mut settings = MemorySettings::new();
        let mut overrides = FakeOverrides {
            failing: vec![OverrideScope::Global],
            ..Default::default()
        };
        let mut prefs = Preferences::new(&mut settings);

        let err = prefs
            .set_flatpak_theming(&mut overrides, OverrideScope::Global, GtkVersion::Gtk4, true)
            .unwrap_err();

        assert!(matches!(err, PreferencesError::Override { .. }));
        assert!(!prefs.flatpak_theming(OverrideScope::Global, GtkVersion::Gtk4));
    }

    #[test]
    fn test_theme_engines_toggle() {
        let mut settings = MemorySettings::new();
        let mut prefs = Preferences::new(&mut settings);
        assert!(prefs.enabled_theme_engines().is_empty());

        prefs.set_theme_engine(ThemeEngine::Shell, true);
        let engines = prefs.set_theme_engine(ThemeEngine::Monet, true);
        assert_eq!(
            engines.into_iter().collect::<Vec<_>>(),
            vec![ThemeEngine::Shell, ThemeEngine::Monet]
        );

        prefs.set_theme_engine(ThemeEngine::Shell, false);
        assert_eq!(
            settings.get_value(ENABLED_THEME_ENGINES_KEY),
            Some(SettingsValue::StringArray(vec!["monet".to_string()]))
        );
    }

    #[test]
    fn test_unknown_stored_engines_are_ignored() {
        let mut settings = MemorySettings::new();
        settings.set_value(
            ENABLED_THEME_ENGINES_KEY,
            vec!["monet".to_string(), "plasma".to_string()].into(),
        );
        let prefs = Preferences::new(&mut settings);

        let engines = prefs.enabled_theme_engines();
        assert_eq!(engines.len(), 1);
        assert!(engines.contains(&ThemeEngine::Monet));
    }

    #[test]
    fn test_theme_engine_from_str() {
        assert_eq!("shell".parse::<ThemeEngine>().unwrap(), ThemeEngine::Shell);
        assert!(matches!(
            "plasma".parse::<ThemeEngine>(),
            Err(PreferencesError::UnknownThemeEngine(_))
        ));
    }

    #[test]
    fn test_jsdelivr_toggle() {
        let mut settings = MemorySettings::new();
        let mut prefs = Preferences::new(&mut settings);
        assert!(!prefs.use_jsdelivr());

        prefs.set_use_jsdelivr(true);
        assert!(prefs.use_jsdelivr());
    }
}
