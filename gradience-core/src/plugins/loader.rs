//! Plugin loaders - the narrow seam through which plugins enter the process
//!
//! A [`PluginLoader`] turns some source of plugins into constructed
//! instances. Everything that runs foreign code at load time (library
//! initializers, factories) happens inside a loader, so the aggregator
//! only ever sees finished plugins and a list of failures.

use libloading::Library;
use std::panic::AssertUnwindSafe;

use gradience_plugin_api::{Plugin, PluginError};

use super::error::PluginHostError;

/// Prefix a module name must carry to be treated as a plugin
pub const DEFAULT_PREFIX: &str = "gradience_";

/// Whether `name` follows the plugin naming convention for `prefix`
pub fn is_plugin_name(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len() && name.starts_with(prefix)
}

/// A constructed plugin plus whatever must outlive it
pub struct LoadedPlugin {
    /// The plugin instance
    pub(crate) instance: Box<dyn Plugin>,
    /// Keep the library loaded. Declared after `instance` so the instance
    /// is dropped while its code is still mapped.
    _library: Option<Library>,
}

impl LoadedPlugin {
    /// Wrap a plugin that lives in this binary
    pub fn new(instance: Box<dyn Plugin>) -> Self {
        Self {
            instance,
            _library: None,
        }
    }

    pub(crate) fn from_library(instance: Box<dyn Plugin>, library: Library) -> Self {
        Self {
            instance,
            _library: Some(library),
        }
    }
}

impl std::fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("dynamic", &self._library.is_some())
            .finish_non_exhaustive()
    }
}

/// A candidate that matched the naming convention but could not be loaded
#[derive(Debug)]
pub struct DiscoveryFailure {
    /// Identifier the plugin would have had
    pub id: String,
    /// Why it was excluded
    pub error: PluginHostError,
}

/// Result of one discovery pass
#[derive(Debug, Default)]
pub struct Discovery {
    /// Successfully constructed plugins, by identifier
    pub plugins: Vec<(String, LoadedPlugin)>,
    /// Candidates that were excluded
    pub failures: Vec<DiscoveryFailure>,
}

impl Discovery {
    pub(crate) fn fail(&mut self, id: impl Into<String>, error: PluginHostError) {
        let id = id.into();
        tracing::error!(plugin = %id, error = %error, "Failed to load plugin");
        self.failures.push(DiscoveryFailure { id, error });
    }

    fn extend(&mut self, other: Discovery) {
        self.plugins.extend(other.plugins);
        self.failures.extend(other.failures);
    }
}

/// Source of plugins
pub trait PluginLoader {
    /// Find and construct every plugin this loader knows about.
    ///
    /// Must not panic: construction failures are reported in
    /// [`Discovery::failures`].
    fn discover(&self) -> Discovery;
}

type Factory = Box<dyn Fn() -> Result<Box<dyn Plugin>, PluginError> + Send + Sync>;

/// An explicitly registered plugin: identifier plus zero-argument factory
pub struct PluginDescriptor {
    id: String,
    factory: Factory,
}

impl PluginDescriptor {
    pub fn new<F>(id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Plugin>, PluginError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            factory: Box::new(factory),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Loader backed by an explicit descriptor list
pub struct StaticLoader {
    prefix: String,
    descriptors: Vec<PluginDescriptor>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            descriptors: Vec::new(),
        }
    }

    /// Builder: use a different naming prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder: register a plugin factory under an identifier
    pub fn register<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Plugin>, PluginError> + Send + Sync + 'static,
    {
        self.descriptors.push(PluginDescriptor::new(id, factory));
        self
    }

    /// Builder: register a `Default` plugin type
    pub fn register_default<P>(self, id: impl Into<String>) -> Self
    where
        P: Plugin + Default + 'static,
    {
        self.register(id, || Ok(Box::new(P::default()) as Box<dyn Plugin>))
    }

    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.descriptors
    }
}

impl Default for StaticLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginLoader for StaticLoader {
    fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();

        for descriptor in &self.descriptors {
            if !is_plugin_name(&descriptor.id, &self.prefix) {
                tracing::debug!(plugin = %descriptor.id, prefix = %self.prefix, "Name does not match plugin prefix, skipping");
                continue;
            }

            let result = std::panic::catch_unwind(AssertUnwindSafe(|| (descriptor.factory)()));
            match result {
                Ok(Ok(instance)) => {
                    tracing::debug!(plugin = %descriptor.id, "Plugin constructed");
                    discovery
                        .plugins
                        .push((descriptor.id.clone(), LoadedPlugin::new(instance)));
                }
                Ok(Err(e)) => discovery.fail(&descriptor.id, e.into()),
                Err(_) => discovery.fail(
                    &descriptor.id,
                    PluginHostError::ConstructionPanicked {
                        name: descriptor.id.clone(),
                    },
                ),
            }
        }

        discovery
    }
}

/// Runs several loaders and concatenates their results in order
#[derive(Default)]
pub struct LoaderChain {
    loaders: Vec<Box<dyn PluginLoader>>,
}

impl LoaderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a loader
    pub fn with(mut self, loader: impl PluginLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }
}

impl PluginLoader for LoaderChain {
    fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();
        for loader in &self.loaders {
            discovery.extend(loader.discover());
        }
        discovery
    }
}
