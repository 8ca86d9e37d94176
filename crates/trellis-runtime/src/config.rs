//! The config-source seam - where tenant plugin configuration comes from.

use async_trait::async_trait;
use std::sync::RwLock;
use trellis_core::{PluginConfig, PluginDependency, PluginId, TenantId};

/// Errors from the upstream configuration source.
///
/// These are infrastructure failures: unlike per-plugin errors they
/// abort runtime construction and surface to the host.
#[derive(Debug, thiserror::Error)]
pub enum ConfigSourceError {
    /// The source could not be reached or read.
    #[error("config source unavailable: {0}")]
    Unavailable(String),

    /// The source returned data that could not be interpreted.
    #[error("malformed plugin configuration: {0}")]
    Malformed(String),
}

/// Source of per-tenant plugin configuration and the global dependency
/// edge list.
///
/// The concrete implementation (database tables, admin API, fixtures)
/// belongs to the host application.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// The tenant's enabled plugin configurations, in admin-defined
    /// order. Disabled records are not returned.
    async fn enabled_configs(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<PluginConfig>, ConfigSourceError>;

    /// The global plugin dependency edges.
    async fn dependency_edges(&self) -> Result<Vec<PluginDependency>, ConfigSourceError>;
}

/// In-memory config source for tests and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryConfigSource {
    configs: RwLock<Vec<PluginConfig>>,
    edges: RwLock<Vec<PluginDependency>>,
}

impl MemoryConfigSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the config record for `(plugin, tenant)`.
    ///
    /// Insertion order is preserved for new records; replacement keeps
    /// the original position, matching "mutated by tenant admin actions,
    /// never deleted".
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSourceError::Unavailable`] if the store lock is
    /// poisoned.
    pub fn upsert_config(&self, config: PluginConfig) -> Result<(), ConfigSourceError> {
        let mut configs = self
            .configs
            .write()
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?;
        if let Some(existing) = configs
            .iter_mut()
            .find(|c| c.plugin_id == config.plugin_id && c.tenant_id == config.tenant_id)
        {
            *existing = config;
        } else {
            configs.push(config);
        }
        Ok(())
    }

    /// Flip the enabled flag on an existing record. Returns `true` if a
    /// record was found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSourceError::Unavailable`] if the store lock is
    /// poisoned.
    pub fn set_enabled(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        enabled: bool,
    ) -> Result<bool, ConfigSourceError> {
        let mut configs = self
            .configs
            .write()
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?;
        match configs
            .iter_mut()
            .find(|c| &c.plugin_id == plugin_id && &c.tenant_id == tenant_id)
        {
            Some(config) => {
                config.enabled = enabled;
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Add a global dependency edge.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSourceError::Unavailable`] if the store lock is
    /// poisoned.
    pub fn add_edge(&self, edge: PluginDependency) -> Result<(), ConfigSourceError> {
        let mut edges = self
            .edges
            .write()
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?;
        if !edges.contains(&edge) {
            edges.push(edge);
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigSource for MemoryConfigSource {
    async fn enabled_configs(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Vec<PluginConfig>, ConfigSourceError> {
        let configs = self
            .configs
            .read()
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?;
        Ok(configs
            .iter()
            .filter(|c| &c.tenant_id == tenant_id && c.enabled)
            .cloned()
            .collect())
    }

    async fn dependency_edges(&self) -> Result<Vec<PluginDependency>, ConfigSourceError> {
        let edges = self
            .edges
            .read()
            .map_err(|e| ConfigSourceError::Unavailable(e.to_string()))?;
        Ok(edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_by_tenant_and_enabled() {
        let source = MemoryConfigSource::new();
        source
            .upsert_config(PluginConfig::new("emotion", "acme"))
            .unwrap();
        source
            .upsert_config(PluginConfig::new("memory", "acme").with_enabled(false))
            .unwrap();
        source
            .upsert_config(PluginConfig::new("emotion", "globex"))
            .unwrap();

        let configs = source
            .enabled_configs(&TenantId::new("acme"))
            .await
            .unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].plugin_id.as_str(), "emotion");
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let source = MemoryConfigSource::new();
        source
            .upsert_config(PluginConfig::new("emotion", "acme"))
            .unwrap();
        source
            .upsert_config(PluginConfig::new("memory", "acme"))
            .unwrap();
        source
            .upsert_config(
                PluginConfig::new("emotion", "acme").with_config(serde_json::json!({"v": 2})),
            )
            .unwrap();

        let configs = source
            .enabled_configs(&TenantId::new("acme"))
            .await
            .unwrap();
        // Replaced record keeps its original position.
        assert_eq!(configs[0].plugin_id.as_str(), "emotion");
        assert_eq!(configs[0].config["v"], 2);
        assert_eq!(configs[1].plugin_id.as_str(), "memory");
    }

    #[tokio::test]
    async fn set_enabled_flips_existing_only() {
        let source = MemoryConfigSource::new();
        source
            .upsert_config(PluginConfig::new("emotion", "acme"))
            .unwrap();

        assert!(
            source
                .set_enabled(&PluginId::new("emotion"), &TenantId::new("acme"), false)
                .unwrap()
        );
        assert!(
            !source
                .set_enabled(&PluginId::new("missing"), &TenantId::new("acme"), true)
                .unwrap()
        );

        let configs = source
            .enabled_configs(&TenantId::new("acme"))
            .await
            .unwrap();
        assert!(configs.is_empty());
    }

    #[tokio::test]
    async fn duplicate_edges_collapse() {
        let source = MemoryConfigSource::new();
        source
            .add_edge(PluginDependency::new("memory", "emotion"))
            .unwrap();
        source
            .add_edge(PluginDependency::new("memory", "emotion"))
            .unwrap();

        assert_eq!(source.dependency_edges().await.unwrap().len(), 1);
    }
}
