//! Prelude module - commonly used types for convenient import.
//!
//! Use `use trellis_core::prelude::*;` to import all essential types.

// Identifiers
pub use crate::{HookName, PluginId, TenantId};

// Scopes
pub use crate::{Scope, ScopeSet};

// Records
pub use crate::{PluginConfig, PluginDependency, PluginManifest, PluginSummary};

// Logging
pub use crate::LogLevel;
