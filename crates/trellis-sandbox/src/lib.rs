//! Trellis Sandbox — the restricted handle a plugin receives in place of
//! direct access to shared resources.
//!
//! A [`SandboxedContext`] is created fresh for every plugin
//! instantiation. It exposes exactly three things:
//!
//! - the plugin's own configuration blob (typed access via serde)
//! - a storage accessor closed over the plugin's granted scopes, with
//!   every call checked against the required scope *before* any I/O is
//!   issued — a denied plugin incurs no storage round-trip
//! - a logger that tags every event with the owning plugin and tenant
//!   (logging is not a capability and is never gated)
//!
//! The plugin never sees the raw [`PluginStore`](trellis_storage::PluginStore),
//! and contexts are never shared or reused across plugins.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod context;
mod error;
mod logger;
mod storage;

pub use context::SandboxedContext;
pub use error::{SandboxError, SandboxResult};
pub use logger::PluginLogger;
pub use storage::ScopedStorage;
