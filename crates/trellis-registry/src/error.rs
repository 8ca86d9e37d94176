//! Registry error types.

/// Errors from plugin registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The factory probe failed or the manifest was malformed. The
    /// offending registration is aborted; others are unaffected.
    #[error("registration failed: {reason}")]
    Registration {
        /// Why the registration was rejected.
        reason: String,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
