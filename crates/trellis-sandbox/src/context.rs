//! The sandboxed context - everything a plugin may touch.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use trellis_core::{PluginId, ScopeSet, TenantId};
use trellis_storage::PluginStore;

use crate::error::{SandboxError, SandboxResult};
use crate::logger::PluginLogger;
use crate::storage::ScopedStorage;

/// Opaque handle built per plugin instantiation.
///
/// Owned exclusively by the runtime slot that holds the plugin instance;
/// never shared or reused across plugins. The context exposes only
/// scope-gated storage, the plugin's own config blob, and a tagged
/// logger — never the raw store.
#[derive(Debug)]
pub struct SandboxedContext {
    plugin_id: PluginId,
    tenant_id: TenantId,
    config: serde_json::Value,
    storage: ScopedStorage,
    logger: PluginLogger,
}

impl SandboxedContext {
    /// Build a context for one plugin under one tenant.
    ///
    /// `scopes` must be the declared scope set from the plugin's
    /// registered manifest — the sandbox trusts its caller to pass the
    /// manifest's scopes and gates everything else against them.
    #[must_use]
    pub fn new(
        plugin_id: PluginId,
        tenant_id: TenantId,
        config: serde_json::Value,
        scopes: ScopeSet,
        store: Arc<dyn PluginStore>,
    ) -> Self {
        let storage = ScopedStorage::new(plugin_id.clone(), tenant_id.clone(), scopes, store);
        let logger = PluginLogger::new(plugin_id.clone(), tenant_id.clone());
        Self {
            plugin_id,
            tenant_id,
            config,
            storage,
            logger,
        }
    }

    /// The plugin this context belongs to.
    #[must_use]
    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    /// The tenant this context belongs to.
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// The opaque configuration blob from the tenant's `PluginConfig`.
    #[must_use]
    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }

    /// Deserialize the configuration blob to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::InvalidConfig`] if the blob does not match
    /// the expected shape.
    pub fn config_as<T: DeserializeOwned>(&self) -> SandboxResult<T> {
        serde_json::from_value(self.config.clone()).map_err(|e| SandboxError::InvalidConfig {
            plugin_id: self.plugin_id.clone(),
            reason: e.to_string(),
        })
    }

    /// The scope-gated storage accessor.
    #[must_use]
    pub fn storage(&self) -> &ScopedStorage {
        &self.storage
    }

    /// The plugin-tagged logger.
    #[must_use]
    pub fn logger(&self) -> &PluginLogger {
        &self.logger
    }
}
