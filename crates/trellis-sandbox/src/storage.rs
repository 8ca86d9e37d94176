//! Scope-gated storage accessor.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use trellis_core::{PluginId, Scope, ScopeSet, TenantId};
use trellis_storage::PluginStore;

use crate::error::{SandboxError, SandboxResult};

/// Storage accessor pair closed over one plugin's granted scopes.
///
/// Every call checks the required scope synchronously before touching the
/// store, so a denied plugin never causes a backend round-trip. The
/// partition key is always `(plugin_id, tenant_id, key)` — the plugin
/// cannot name any other partition.
pub struct ScopedStorage {
    plugin_id: PluginId,
    tenant_id: TenantId,
    scopes: ScopeSet,
    store: Arc<dyn PluginStore>,
}

impl ScopedStorage {
    /// Create an accessor for one plugin under one tenant.
    #[must_use]
    pub fn new(
        plugin_id: PluginId,
        tenant_id: TenantId,
        scopes: ScopeSet,
        store: Arc<dyn PluginStore>,
    ) -> Self {
        Self {
            plugin_id,
            tenant_id,
            scopes,
            store,
        }
    }

    fn ensure(&self, scope: Scope) -> SandboxResult<()> {
        if self.scopes.has(&scope) {
            Ok(())
        } else {
            Err(SandboxError::PermissionDenied {
                plugin_id: self.plugin_id.clone(),
                scope,
            })
        }
    }

    /// Read a value from the plugin's partition.
    ///
    /// # Errors
    ///
    /// [`SandboxError::PermissionDenied`] without `storage:read`, or a
    /// storage error from the backend.
    pub async fn get(&self, key: &str) -> SandboxResult<Option<serde_json::Value>> {
        self.ensure(Scope::storage_read())?;
        Ok(self.store.get(&self.plugin_id, &self.tenant_id, key).await?)
    }

    /// Write a value to the plugin's partition.
    ///
    /// # Errors
    ///
    /// [`SandboxError::PermissionDenied`] without `storage:write`, or a
    /// storage error from the backend.
    pub async fn set(&self, key: &str, value: serde_json::Value) -> SandboxResult<()> {
        self.ensure(Scope::storage_write())?;
        Ok(self
            .store
            .set(&self.plugin_id, &self.tenant_id, key, value)
            .await?)
    }

    /// Remove a key from the plugin's partition. Returns `true` if a
    /// value was present.
    ///
    /// # Errors
    ///
    /// [`SandboxError::PermissionDenied`] without `storage:write`, or a
    /// storage error from the backend.
    pub async fn delete(&self, key: &str) -> SandboxResult<bool> {
        self.ensure(Scope::storage_write())?;
        Ok(self
            .store
            .delete(&self.plugin_id, &self.tenant_id, key)
            .await?)
    }

    /// Read a value and deserialize it to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`get`](Self::get) can raise, plus
    /// [`SandboxError::Serialization`] if the stored value does not match
    /// `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> SandboxResult<Option<T>> {
        match self.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| SandboxError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// # Errors
    ///
    /// Everything [`set`](Self::set) can raise, plus
    /// [`SandboxError::Serialization`] if `value` cannot be serialized.
    pub async fn set_as<T: Serialize>(&self, key: &str, value: &T) -> SandboxResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| SandboxError::Serialization(e.to_string()))?;
        self.set(key, value).await
    }

    /// The scopes this accessor was closed over.
    #[must_use]
    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }
}

impl std::fmt::Debug for ScopedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedStorage")
            .field("plugin_id", &self.plugin_id)
            .field("tenant_id", &self.tenant_id)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trellis_storage::{MemoryPluginStore, StorageResult};

    /// Store wrapper counting backend calls, for the "denied plugin
    /// incurs no storage round-trip" property.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryPluginStore,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PluginStore for CountingStore {
        async fn get(
            &self,
            plugin_id: &PluginId,
            tenant_id: &TenantId,
            key: &str,
        ) -> StorageResult<Option<serde_json::Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get(plugin_id, tenant_id, key).await
        }

        async fn set(
            &self,
            plugin_id: &PluginId,
            tenant_id: &TenantId,
            key: &str,
            value: serde_json::Value,
        ) -> StorageResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.set(plugin_id, tenant_id, key, value).await
        }

        async fn delete(
            &self,
            plugin_id: &PluginId,
            tenant_id: &TenantId,
            key: &str,
        ) -> StorageResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(plugin_id, tenant_id, key).await
        }
    }

    fn storage_with(scopes: ScopeSet, store: Arc<dyn PluginStore>) -> ScopedStorage {
        ScopedStorage::new(PluginId::new("emotion"), TenantId::new("acme"), scopes, store)
    }

    fn read_write() -> ScopeSet {
        [Scope::storage_read(), Scope::storage_write()]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn read_write_round_trip() {
        let storage = storage_with(read_write(), Arc::new(MemoryPluginStore::new()));

        storage
            .set("state", serde_json::json!({"mood": "calm"}))
            .await
            .unwrap();
        let value = storage.get("state").await.unwrap().unwrap();
        assert_eq!(value["mood"], "calm");

        assert!(storage.delete("state").await.unwrap());
        assert!(storage.get("state").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn denied_write_never_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let read_only: ScopeSet = [Scope::storage_read()].into_iter().collect();
        let storage = storage_with(read_only, store.clone());

        let err = storage
            .set("state", serde_json::json!(1))
            .await
            .unwrap_err();

        match err {
            SandboxError::PermissionDenied { plugin_id, scope } => {
                assert_eq!(plugin_id.as_str(), "emotion");
                assert_eq!(scope, Scope::storage_write());
            },
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denied_read_never_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let storage = storage_with(ScopeSet::new(), store.clone());

        assert!(matches!(
            storage.get("state").await,
            Err(SandboxError::PermissionDenied { .. })
        ));
        assert!(matches!(
            storage.delete("state").await,
            Err(SandboxError::PermissionDenied { .. })
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn typed_helpers_round_trip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Mood {
            label: String,
            intensity: f32,
        }

        let storage = storage_with(read_write(), Arc::new(MemoryPluginStore::new()));
        let mood = Mood {
            label: "calm".into(),
            intensity: 0.4,
        };

        storage.set_as("mood", &mood).await.unwrap();
        let back: Mood = storage.get_as("mood").await.unwrap().unwrap();
        assert_eq!(back, mood);

        let missing: Option<Mood> = storage.get_as("absent").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn typed_read_of_mismatched_value_fails() {
        let storage = storage_with(read_write(), Arc::new(MemoryPluginStore::new()));
        storage
            .set("count", serde_json::json!("not a number"))
            .await
            .unwrap();

        let result: SandboxResult<Option<u64>> = storage.get_as("count").await;
        assert!(matches!(result, Err(SandboxError::Serialization(_))));
    }
}
