//! Trellis Registry — the plugin contract and the process-wide catalog of
//! installable plugins.
//!
//! A plugin is anything implementing the [`Plugin`] trait: a manifest, a
//! declared hook table, and lifecycle/event handlers that receive a
//! sandboxed context instead of raw platform resources.
//!
//! The [`PluginRegistry`] maps plugin identifiers to `(manifest, factory)`
//! pairs. It is populated once at process start behind explicit `&mut`
//! registration calls, then shared immutably (`Arc`) into every tenant
//! runtime — dependencies stay explicit, nothing reaches into ambient
//! global state.
//!
//! Failure containment starts here: a factory that fails its probe
//! construction, or a manifest without an identifier, is rejected and
//! logged while every other registration proceeds untouched.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod plugin;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use plugin::{Plugin, PluginError, PluginFactory, PluginResult};
pub use registry::{PluginRegistry, PluginRegistryItem};
