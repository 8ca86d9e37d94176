//! Trellis Runtime — per-tenant plugin orchestration.
//!
//! Each tenant owns exactly one [`TenantRuntime`]. On
//! [`init`](TenantRuntime::init) the runtime fetches the tenant's enabled
//! plugin configurations, resolves their dependency order (tolerating and
//! reporting cycles), instantiates each plugin inside a capability-gated
//! sandbox, and runs its initialization hook inside a per-plugin failure
//! boundary. The surviving instances form the tenant's active set, the
//! authoritative "currently running" view.
//!
//! [`execute_hook`](TenantRuntime::execute_hook) fans a named hook out to
//! every active plugin that declares it and fans the per-plugin outcomes
//! back in — one broken plugin can never abort its siblings or the host.
//!
//! Runtimes for different tenants are fully independent; they share only
//! the read-only registry handle and the store handle, whose per-tenant
//! partitions are disjoint.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod dispatch;
mod error;
mod resolver;
mod runtime;

pub use config::{ConfigSource, ConfigSourceError, MemoryConfigSource};
pub use dispatch::{HookDispatch, HookOutcome};
pub use error::{RuntimeError, RuntimeResult};
pub use resolver::{CycleEdge, Resolution, resolve};
pub use runtime::{RuntimeState, TenantRuntime};
