//! The plugin contract.

use async_trait::async_trait;
use std::sync::Arc;
use trellis_core::{HookName, PluginManifest};
use trellis_sandbox::{SandboxError, SandboxedContext};
use trellis_storage::StorageError;

/// Error type plugin code returns from lifecycle and hook handlers.
///
/// Sandbox denials and storage failures convert with `?` so a plugin
/// body reads as ordinary fallible code; the runtime's failure boundary
/// catches whatever comes back.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin-reported failure.
    #[error("{0}")]
    Failed(String),

    /// A sandbox capability check or sandbox-side conversion failed.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    /// The storage backend failed outside the sandbox path.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A hook payload could not be (de)serialized.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl PluginError {
    /// Create a plugin-reported failure from a message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result type for plugin handler code.
pub type PluginResult<T> = Result<T, PluginError>;

/// A capability module installable per tenant.
///
/// Different plugins implement different subsets of hooks; the declared
/// table in [`hooks`](Self::hooks) is what the runtime consults before
/// dispatch — there is no runtime type inspection. All handlers have
/// contained defaults, so a minimal plugin implements nothing beyond
/// [`manifest`](Self::manifest).
///
/// Handlers receive a [`SandboxedContext`] in place of platform
/// resources. The same plugin type is instantiated independently per
/// tenant; instances must not share mutable state.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The plugin's static metadata. Must be stable across instances.
    fn manifest(&self) -> PluginManifest;

    /// The hook names this instance handles.
    ///
    /// Hooks not listed here are never dispatched to the plugin.
    fn hooks(&self) -> Vec<HookName> {
        Vec::new()
    }

    /// Called once after instantiation, inside the per-plugin failure
    /// boundary. An error excludes the plugin from the tenant's active
    /// set.
    ///
    /// The default does nothing and cannot fail — a plugin without
    /// initialization work is activated unconditionally.
    ///
    /// # Errors
    ///
    /// Any [`PluginError`]; contained by the runtime.
    async fn on_init(&mut self, ctx: &SandboxedContext) -> PluginResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Handle one dispatched hook.
    ///
    /// Called only for hooks declared in [`hooks`](Self::hooks), inside
    /// the per-plugin failure boundary.
    ///
    /// # Errors
    ///
    /// Any [`PluginError`]; recorded in the plugin's own dispatch result.
    async fn on_hook(
        &self,
        hook: &HookName,
        ctx: &SandboxedContext,
        payload: serde_json::Value,
    ) -> PluginResult<serde_json::Value> {
        let _ = (hook, ctx, payload);
        Ok(serde_json::Value::Null)
    }

    /// Called when the tenant runtime shuts the plugin down.
    ///
    /// Errors are logged and contained; shutdown of other plugins
    /// proceeds regardless.
    ///
    /// # Errors
    ///
    /// Any [`PluginError`]; contained by the runtime.
    async fn on_shutdown(&mut self, ctx: &SandboxedContext) -> PluginResult<()> {
        let _ = ctx;
        Ok(())
    }
}

/// Constructor for plugin instances.
///
/// Called once at registration to probe the manifest, then once per
/// tenant instantiation. Construction is fallible; a probe failure
/// rejects the registration, an instantiation failure skips the plugin
/// for that tenant.
pub type PluginFactory = Arc<dyn Fn() -> PluginResult<Box<dyn Plugin>> + Send + Sync>;
