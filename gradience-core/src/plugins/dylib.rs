//! Dynamic library loader - scans directories for plugin shared objects

use libloading::Library;
use std::path::{Path, PathBuf};

use gradience_plugin_api::{API_VERSION, API_VERSION_SYMBOL, CREATE_SYMBOL, Plugin};

use super::error::PluginHostError;
use super::loader::{DEFAULT_PREFIX, Discovery, LoadedPlugin, PluginLoader, is_plugin_name};

/// Shared library extensions for the current platform
fn library_extensions() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["dylib", "so"] as &[&str]
    } else if cfg!(target_os = "windows") {
        &["dll"] as &[&str]
    } else {
        &["so"] as &[&str]
    }
}

/// Module name for a library file: the file stem without a leading `lib`.
///
/// Returns `None` for files without a shared library extension.
pub fn module_name(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !library_extensions().contains(&ext) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    Some(stem.strip_prefix("lib").unwrap_or(stem).to_string())
}

/// Loads plugins from `<prefix>*.so` / `lib<prefix>*.so` files
pub struct DylibLoader {
    dirs: Vec<PathBuf>,
    prefix: String,
}

impl DylibLoader {
    /// Search the given directories, earlier directories first
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self {
            dirs,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Builder: use a different naming prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Library files in one directory that match the naming convention,
    /// sorted by path
    fn candidates(&self, dir: &Path) -> Result<Vec<(String, PathBuf)>, std::io::Error> {
        let mut found = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match module_name(&path) {
                Some(name) if is_plugin_name(&name, &self.prefix) => found.push((name, path)),
                _ => {}
            }
        }

        found.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(found)
    }
}

impl PluginLoader for DylibLoader {
    fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();

        for dir in &self.dirs {
            if !dir.exists() {
                tracing::debug!(dir = %dir.display(), "Plugin directory does not exist");
                continue;
            }

            let candidates = match self.candidates(dir) {
                Ok(candidates) => candidates,
                Err(source) => {
                    discovery.fail(
                        dir.display().to_string(),
                        PluginHostError::DirUnreadable {
                            path: dir.clone(),
                            source,
                        },
                    );
                    continue;
                }
            };

            for (name, path) in candidates {
                match load_library(&name, &path) {
                    Ok(plugin) => {
                        tracing::debug!(plugin = %name, path = %path.display(), "Plugin library loaded");
                        discovery.plugins.push((name, plugin));
                    }
                    Err(e) => discovery.fail(name, e),
                }
            }
        }

        discovery
    }
}

/// Load one plugin library and construct its plugin
fn load_library(name: &str, path: &Path) -> Result<LoadedPlugin, PluginHostError> {
    // SAFETY: loading a library runs its initializers. Installing a library
    // with the plugin prefix into a plugin directory is the trust decision.
    let library = unsafe { Library::new(path)? };

    // SAFETY: the symbol is generated by `export_plugin!` with this signature.
    let api_version_fn: libloading::Symbol<extern "C" fn() -> u32> =
        unsafe { library.get(API_VERSION_SYMBOL)? };

    check_api_version(api_version_fn())?;

    // SAFETY: the create function returns a pointer obtained from
    // `Box::into_raw`, which we take back ownership of exactly once.
    let create_fn: libloading::Symbol<extern "C" fn() -> *mut dyn Plugin> =
        unsafe { library.get(CREATE_SYMBOL)? };
    let instance = unsafe { adopt_instance(name, create_fn())? };

    Ok(LoadedPlugin::from_library(instance, library))
}

fn check_api_version(found: u32) -> Result<(), PluginHostError> {
    if found != API_VERSION {
        return Err(PluginHostError::ApiVersionMismatch {
            expected: API_VERSION,
            found,
        });
    }
    Ok(())
}

/// Take ownership of the pointer returned by `_gradience_plugin_create`.
///
/// Null means the plugin's constructor panicked.
///
/// # Safety
///
/// `raw` must be null or come from `Box::into_raw` and not be owned elsewhere.
unsafe fn adopt_instance(
    name: &str,
    raw: *mut dyn Plugin,
) -> Result<Box<dyn Plugin>, PluginHostError> {
    if raw.is_null() {
        return Err(PluginHostError::ConstructionPanicked {
            name: name.to_string(),
        });
    }
    Ok(unsafe { Box::from_raw(raw) })
}
