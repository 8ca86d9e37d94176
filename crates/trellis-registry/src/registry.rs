//! The process-wide plugin catalog.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, warn};
use trellis_core::{PluginId, PluginManifest};

use crate::error::{RegistryError, RegistryResult};
use crate::plugin::{Plugin, PluginFactory, PluginResult};

/// One catalog entry: the manifest captured at registration plus the
/// factory that builds fresh instances.
pub struct PluginRegistryItem {
    manifest: PluginManifest,
    factory: PluginFactory,
}

impl PluginRegistryItem {
    /// The manifest captured when the plugin was registered.
    #[must_use]
    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Construct a fresh instance.
    ///
    /// Instances are never shared: every tenant initialization calls
    /// this again.
    ///
    /// # Errors
    ///
    /// Whatever the plugin's factory reports.
    pub fn instantiate(&self) -> PluginResult<Box<dyn Plugin>> {
        (self.factory)()
    }
}

impl std::fmt::Debug for PluginRegistryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistryItem")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

/// Process-wide catalog mapping plugin identifiers to registry items.
///
/// Populated once at startup via [`register`](Self::register) calls,
/// then shared read-only (`Arc<PluginRegistry>`) into every tenant
/// runtime.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    items: HashMap<PluginId, PluginRegistryItem>,
}

impl PluginRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin by probing one constructed instance.
    ///
    /// The probe instance is used only to read the manifest and is
    /// dropped immediately. Re-registering an existing identifier
    /// succeeds with a warning — last registration wins.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Registration`] if the factory fails its probe or
    /// the manifest has an empty identifier. A rejected registration
    /// leaves every other entry untouched.
    pub fn register(&mut self, factory: PluginFactory) -> RegistryResult<PluginId> {
        let probe = (factory)().map_err(|e| {
            let rejected = RegistryError::Registration {
                reason: format!("factory probe failed: {e}"),
            };
            error!(error = %rejected, "plugin registration rejected");
            rejected
        })?;
        let manifest = probe.manifest();
        drop(probe);

        if manifest.id.is_empty() {
            let rejected = RegistryError::Registration {
                reason: format!("manifest for '{}' has an empty plugin id", manifest.name),
            };
            error!(error = %rejected, "plugin registration rejected");
            return Err(rejected);
        }

        let id = manifest.id.clone();
        let replaced = self
            .items
            .insert(id.clone(), PluginRegistryItem { manifest, factory })
            .is_some();
        if replaced {
            warn!(plugin_id = %id, "plugin re-registered, previous entry replaced");
        }
        Ok(id)
    }

    /// Register from a plain constructor closure.
    ///
    /// Convenience wrapper around [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_fn<F>(&mut self, factory: F) -> RegistryResult<PluginId>
    where
        F: Fn() -> PluginResult<Box<dyn Plugin>> + Send + Sync + 'static,
    {
        self.register(Arc::new(factory))
    }

    /// Look up a registered plugin.
    #[must_use]
    pub fn get(&self, id: &PluginId) -> Option<&PluginRegistryItem> {
        self.items.get(id)
    }

    /// Whether a plugin is registered.
    #[must_use]
    pub fn contains(&self, id: &PluginId) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate over registered entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&PluginId, &PluginRegistryItem)> {
        self.items.iter()
    }

    /// Registered manifests, sorted by plugin id for stable discovery
    /// surfaces.
    #[must_use]
    pub fn manifests(&self) -> Vec<&PluginManifest> {
        let mut manifests: Vec<&PluginManifest> =
            self.items.values().map(PluginRegistryItem::manifest).collect();
        manifests.sort_by(|a, b| a.id.cmp(&b.id));
        manifests
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
