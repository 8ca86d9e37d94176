//! Runtime error types.

use trellis_core::TenantId;

use crate::config::ConfigSourceError;

/// Errors from the tenant runtime itself.
///
/// Per-plugin failures (init, hooks, permission denials) are contained
/// and reported as data; only host-level misuse and infrastructure
/// failure surface here.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Hook dispatch was requested before `init()` completed.
    #[error("tenant runtime '{tenant_id}' is not loaded")]
    NotLoaded {
        /// The tenant whose runtime was not loaded.
        tenant_id: TenantId,
    },

    /// The upstream config source failed; runtime construction aborts
    /// and the failure surfaces to the host application.
    #[error(transparent)]
    ConfigSource(#[from] ConfigSourceError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
