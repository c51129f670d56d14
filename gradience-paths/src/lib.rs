//! XDG Base Directory paths for gradience.
//!
//! The plugin host and the settings file resolve their locations through
//! these helpers so that `XDG_CONFIG_HOME` and `XDG_DATA_HOME` are honoured
//! the same way on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "gradience";

/// Get the gradience config directory.
///
/// Returns `$XDG_CONFIG_HOME/gradience` if set, otherwise `~/.config/gradience`.
/// This is where the config file, the settings store and the plugin registry live.
///
/// # Examples
///
/// ```
/// use gradience_paths::config_dir;
///
/// let config = config_dir();
/// let registry = config.join("plugins/registry.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config").join(APP_DIR)
    } else {
        PathBuf::from(".config").join(APP_DIR)
    }
}

/// Get the gradience data directory.
///
/// Returns `$XDG_DATA_HOME/gradience` if set, otherwise `~/.local/share/gradience`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share").join(APP_DIR)
    } else {
        PathBuf::from(".local/share").join(APP_DIR)
    }
}

/// Directory scanned for plugin libraries (`<data_dir>/plugins`).
pub fn plugin_dir() -> PathBuf {
    data_dir().join("plugins")
}

/// Location of the enabled/disabled plugin registry.
pub fn registry_path() -> PathBuf {
    config_dir().join("plugins").join("registry.toml")
}

/// Default location of the file-backed settings store.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_ends_with_gradience() {
        let path = config_dir();
        assert!(
            path.ends_with("gradience"),
            "config_dir should end with 'gradience'"
        );
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_env() {
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/tmp/test-config");
        }
        let path = config_dir();
        assert_eq!(path, PathBuf::from("/tmp/test-config/gradience"));
        assert_eq!(
            registry_path(),
            PathBuf::from("/tmp/test-config/gradience/plugins/registry.toml")
        );
        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_respects_xdg_env() {
        unsafe {
            std::env::set_var("XDG_DATA_HOME", "/tmp/test-data");
        }
        assert_eq!(data_dir(), PathBuf::from("/tmp/test-data/gradience"));
        assert_eq!(
            plugin_dir(),
            PathBuf::from("/tmp/test-data/gradience/plugins")
        );
        unsafe {
            std::env::remove_var("XDG_DATA_HOME");
        }
    }
}
