//! Prelude module - commonly used types for convenient import.
//!
//! Use `use trellis_runtime::prelude::*;` to import everything a host
//! needs to stand up a tenant runtime.

// Runtime
pub use crate::{RuntimeState, TenantRuntime};

// Dispatch records
pub use crate::{HookDispatch, HookOutcome};

// Config seam
pub use crate::{ConfigSource, ConfigSourceError, MemoryConfigSource};

// Resolution
pub use crate::{CycleEdge, Resolution, resolve};

// Errors
pub use crate::{RuntimeError, RuntimeResult};

// Re-exported vocabulary from the lower layers
pub use trellis_core::prelude::*;
pub use trellis_registry::{Plugin, PluginError, PluginFactory, PluginRegistry, PluginResult};
pub use trellis_sandbox::{SandboxError, SandboxedContext};
pub use trellis_storage::{MemoryPluginStore, PluginStore};
