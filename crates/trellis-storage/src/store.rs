//! The `PluginStore` trait - what the runtime requires of the backend.

use async_trait::async_trait;
use trellis_core::{PluginId, TenantId};

use crate::error::StorageResult;

/// Asynchronous key-value store partitioned by `(plugin, tenant, key)`.
///
/// Implementations must guarantee partition isolation: a value written
/// under one `(plugin_id, tenant_id)` pair is never visible under any
/// other pair. Beyond that, durability and consistency are backend
/// concerns.
///
/// All methods may suspend; callers that gate access (the sandbox) must
/// perform their checks *before* awaiting so a denied caller incurs no
/// backend round-trip.
#[async_trait]
pub trait PluginStore: Send + Sync {
    /// Read a value, or `None` if the key is absent in the partition.
    async fn get(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
    ) -> StorageResult<Option<serde_json::Value>>;

    /// Write a value, overwriting any previous value under the key.
    async fn set(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
        value: serde_json::Value,
    ) -> StorageResult<()>;

    /// Remove a key. Returns `true` if a value was present.
    async fn delete(
        &self,
        plugin_id: &PluginId,
        tenant_id: &TenantId,
        key: &str,
    ) -> StorageResult<bool>;
}
