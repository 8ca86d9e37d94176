//! Trellis Core - Foundation types for the tenant-scoped plugin runtime.
//!
//! This crate provides the shared vocabulary used by every other Trellis
//! crate:
//! - Identifier newtypes (`PluginId`, `TenantId`, `HookName`)
//! - Capability scopes and the scope-membership check (`Scope`, `ScopeSet`)
//! - Plugin metadata records (`PluginManifest`, `PluginConfig`,
//!   `PluginDependency`, `PluginSummary`)
//! - Structured log levels for plugin-emitted logging
//!
//! Everything here is plain data: no I/O, no async, no global state.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod id;
mod log;
mod manifest;
mod scope;

pub use config::{PluginConfig, PluginDependency, PluginSummary};
pub use id::{HookName, PluginId, TenantId};
pub use log::LogLevel;
pub use manifest::PluginManifest;
pub use scope::{Scope, ScopeSet};
