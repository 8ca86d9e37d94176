//! Per-tenant plugin configuration records and dependency edges.

use serde::{Deserialize, Serialize};

use crate::id::{HookName, PluginId, TenantId};

/// A tenant's configuration record for one plugin.
///
/// Created when a tenant enables a plugin; mutated by tenant admin
/// actions; never deleted, only disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// The plugin this record configures.
    pub plugin_id: PluginId,
    /// The tenant this record belongs to.
    pub tenant_id: TenantId,
    /// Whether the plugin is currently enabled for the tenant.
    pub enabled: bool,
    /// Opaque configuration blob, interpreted only by the plugin itself.
    #[serde(default)]
    pub config: serde_json::Value,
}

impl PluginConfig {
    /// Create an enabled config with an empty blob.
    #[must_use]
    pub fn new(plugin_id: impl Into<PluginId>, tenant_id: impl Into<TenantId>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            tenant_id: tenant_id.into(),
            enabled: true,
            config: serde_json::Value::Null,
        }
    }

    /// Set the opaque configuration blob.
    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    /// Set the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A directed dependency edge: `plugin_id` depends on `depends_on`.
///
/// Edges are global, not tenant-scoped: a dependency is a property of the
/// plugin code, not of any tenant's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginDependency {
    /// The dependent plugin.
    pub plugin_id: PluginId,
    /// The plugin it depends on.
    pub depends_on: PluginId,
}

impl PluginDependency {
    /// Create a dependency edge.
    #[must_use]
    pub fn new(plugin_id: impl Into<PluginId>, depends_on: impl Into<PluginId>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            depends_on: depends_on.into(),
        }
    }
}

/// Read-only snapshot of one active plugin, for admin and diagnostic
/// surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSummary {
    /// Plugin identifier.
    pub id: PluginId,
    /// Display name from the manifest.
    pub name: String,
    /// Version from the manifest.
    pub version: String,
    /// Category tag from the manifest.
    pub category: String,
    /// Hooks the live instance declares.
    pub hooks: Vec<HookName>,
}
