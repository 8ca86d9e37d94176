//! In-memory `PluginStore` implementation.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::trace;
use trellis_core::{PluginId, TenantId};

use crate::error::{StorageError, StorageResult};
use crate::store::PluginStore;

type PartitionKey = (PluginId, TenantId, String);

/// In-memory plugin store.
///
/// Backs tests and single-node deployments. Partition isolation is
/// enforced structurally: the full `(plugin, tenant, key)` tuple is the
/// map key.
#[derive(Debug, Default)]
pub struct MemoryPluginStore {
    entries: RwLock<HashMap<PartitionKey, serde_json::Value>>,
}

impl MemoryPluginStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all partitions.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the store lock is poisoned.
    pub fn len(&self) -> StorageResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(entries.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the store lock is poisoned.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl PluginStore for MemoryPluginStore {
    async fn get(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
    ) -> StorageResult<Option<serde_json::Value>> {
        validate_key(key)?;
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let value = entries
            .get(&(plugin_id.clone(), tenant_id.clone(), key.to_string()))
            .cloned();
        trace!(
            plugin_id = %plugin_id,
            tenant_id = %tenant_id,
            key = %key,
            found = value.is_some(),
            "store get"
        );
        Ok(value)
    }

    async fn set(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
        value: serde_json::Value,
    ) -> StorageResult<()> {
        validate_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        entries.insert(
            (plugin_id.clone(), tenant_id.clone(), key.to_string()),
            value,
        );
        trace!(
            plugin_id = %plugin_id,
            tenant_id = %tenant_id,
            key = %key,
            "store set"
        );
        Ok(())
    }

    async fn delete(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
    ) -> StorageResult<bool> {
        validate_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        let removed = entries
            .remove(&(plugin_id.clone(), tenant_id.clone(), key.to_string()))
            .is_some();
        trace!(
            plugin_id = %plugin_id,
            tenant_id = %tenant_id,
            key = %key,
            removed,
            "store delete"
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(plugin: &str, tenant: &str) -> (PluginId, TenantId) {
        (PluginId::new(plugin), TenantId::new(tenant))
    }

    #[tokio::test]
    async fn get_set_round_trip() {
        let store = MemoryPluginStore::new();
        let (plugin, tenant) = ids("emotion", "acme");

        assert!(store.get(&plugin, &tenant, "state").await.unwrap().is_none());

        store
            .set(&plugin, &tenant, "state", serde_json::json!({"mood": "calm"}))
            .await
            .unwrap();

        let value = store.get(&plugin, &tenant, "state").await.unwrap().unwrap();
        assert_eq!(value["mood"], "calm");
    }

    #[tokio::test]
    async fn partitions_are_isolated_by_plugin() {
        let store = MemoryPluginStore::new();
        let (emotion, tenant) = ids("emotion", "acme");
        let memory = PluginId::new("memory");

        store
            .set(&emotion, &tenant, "shared-key", serde_json::json!(1))
            .await
            .unwrap();

        assert!(
            store
                .get(&memory, &tenant, "shared-key")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn partitions_are_isolated_by_tenant() {
        let store = MemoryPluginStore::new();
        let (plugin, acme) = ids("emotion", "acme");
        let globex = TenantId::new("globex");

        store
            .set(&plugin, &acme, "state", serde_json::json!("a"))
            .await
            .unwrap();
        store
            .set(&plugin, &globex, "state", serde_json::json!("b"))
            .await
            .unwrap();

        let a = store.get(&plugin, &acme, "state").await.unwrap().unwrap();
        let b = store.get(&plugin, &globex, "state").await.unwrap().unwrap();
        assert_eq!(a, serde_json::json!("a"));
        assert_eq!(b, serde_json::json!("b"));
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let store = MemoryPluginStore::new();
        let (plugin, tenant) = ids("emotion", "acme");

        assert!(!store.delete(&plugin, &tenant, "missing").await.unwrap());

        store
            .set(&plugin, &tenant, "state", serde_json::json!(true))
            .await
            .unwrap();
        assert!(store.delete(&plugin, &tenant, "state").await.unwrap());
        assert!(store.get(&plugin, &tenant, "state").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let store = MemoryPluginStore::new();
        let (plugin, tenant) = ids("emotion", "acme");

        let err = store.get(&plugin, &tenant, "").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(store.is_empty().unwrap());
    }
}
