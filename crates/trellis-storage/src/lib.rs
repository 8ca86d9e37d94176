//! Trellis Storage — the persistent key-value seam for plugin data.
//!
//! Plugins may persist key-value records, and nothing else. Every record
//! is partitioned by `(plugin_id, tenant_id, key)`: two different
//! plugins, or the same plugin under two different tenants, never observe
//! each other's values.
//!
//! The concrete backend (schema, connections, replication) belongs to the
//! host application; the runtime sees only the [`PluginStore`] trait.
//! [`MemoryPluginStore`] ships as the in-process implementation used by
//! tests and single-node deployments.
//!
//! Plugins never hold a [`PluginStore`] directly — they reach it through
//! the scope-gated accessor in `trellis-sandbox`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryPluginStore;
pub use store::PluginStore;
