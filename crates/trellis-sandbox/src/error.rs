//! Sandbox error types.

use trellis_core::{PluginId, Scope};
use trellis_storage::StorageError;

/// Errors raised inside a plugin's sandbox.
///
/// These surface to the plugin's own init or hook call and are contained
/// by the runtime's per-plugin failure boundary; they never escape to
/// other plugins.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// A capability check failed. Raised before any I/O is issued.
    #[error("permission denied: plugin '{plugin_id}' missing scope '{scope}'")]
    PermissionDenied {
        /// The plugin that attempted the access.
        plugin_id: PluginId,
        /// The scope the plugin's manifest does not declare.
        scope: Scope,
    },

    /// The underlying store failed after the capability check passed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The plugin's configuration blob did not match the expected shape.
    #[error("invalid config for plugin '{plugin_id}': {reason}")]
    InvalidConfig {
        /// The plugin whose config was rejected.
        plugin_id: PluginId,
        /// Why deserialization failed.
        reason: String,
    },

    /// A stored value could not be (de)serialized to the requested type.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for sandbox operations.
pub type SandboxResult<T> = Result<T, SandboxError>;
