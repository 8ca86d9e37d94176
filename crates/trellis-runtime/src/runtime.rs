//! The per-tenant plugin runtime.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use trellis_core::{HookName, PluginId, PluginManifest, PluginSummary, TenantId};
use trellis_registry::{Plugin, PluginRegistry};
use trellis_sandbox::SandboxedContext;
use trellis_storage::PluginStore;
use uuid::Uuid;

use crate::config::ConfigSource;
use crate::dispatch::{HookDispatch, HookOutcome};
use crate::error::{RuntimeError, RuntimeResult};
use crate::resolver;

/// Lifecycle state of a tenant runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeState {
    /// No plugins loaded; `init()` has not completed.
    Unloaded,
    /// `init()` is building the active set.
    Loading,
    /// The config list was exhausted; hook dispatch is accepted. An
    /// empty active set is still a valid loaded runtime.
    Loaded,
}

/// One slot in the active set: the live instance plus the sandbox it
/// exclusively owns.
struct ActivePlugin {
    manifest: PluginManifest,
    instance: Box<dyn Plugin>,
    context: SandboxedContext,
}

/// Orchestrates one tenant's plugins.
///
/// Each tenant owns exactly one runtime. Runtimes share only the
/// read-only registry and the store handle; there is no shared mutable
/// state across tenants.
///
/// `init` takes `&mut self`, so concurrent self-initialization is
/// unrepresentable; once loaded, the runtime can be shared immutably
/// (e.g. behind `Arc`) and [`execute_hook`](Self::execute_hook) called
/// concurrently.
pub struct TenantRuntime {
    tenant_id: TenantId,
    registry: Arc<PluginRegistry>,
    configs: Arc<dyn ConfigSource>,
    store: Arc<dyn PluginStore>,
    state: RuntimeState,
    active: Vec<ActivePlugin>,
}

impl TenantRuntime {
    /// Create an unloaded runtime for one tenant.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        registry: Arc<PluginRegistry>,
        configs: Arc<dyn ConfigSource>,
        store: Arc<dyn PluginStore>,
    ) -> Self {
        Self {
            tenant_id,
            registry,
            configs,
            store,
            state: RuntimeState::Unloaded,
            active: Vec::new(),
        }
    }

    /// The tenant this runtime belongs to.
    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RuntimeState {
        self.state
    }

    /// Build the tenant's active plugin set.
    ///
    /// Fetches enabled configs, resolves dependency order, and for each
    /// config in resolved order: looks the plugin up in the registry
    /// (a miss is logged and skipped), builds a sandbox from the manifest's
    /// declared scopes, instantiates the plugin, and runs `on_init`
    /// inside a per-plugin failure boundary. A plugin whose `on_init`
    /// fails is excluded from the active set; every other plugin loads
    /// regardless.
    ///
    /// Calling `init` on an already-loaded runtime is a no-op; use
    /// [`reload`](Self::reload) to rebuild from scratch.
    ///
    /// # Errors
    ///
    /// Only infrastructure failure of the config source aborts loading;
    /// the runtime returns to `Unloaded` and the error surfaces to the
    /// host.
    pub async fn init(&mut self) -> RuntimeResult<()> {
        if self.state == RuntimeState::Loaded {
            debug!(tenant_id = %self.tenant_id, "runtime already loaded, init is a no-op");
            return Ok(());
        }
        self.state = RuntimeState::Loading;
        self.active.clear();

        let configs = match self.configs.enabled_configs(&self.tenant_id).await {
            Ok(configs) => configs,
            Err(e) => {
                self.state = RuntimeState::Unloaded;
                return Err(RuntimeError::ConfigSource(e));
            },
        };
        let edges = match self.configs.dependency_edges().await {
            Ok(edges) => edges,
            Err(e) => {
                self.state = RuntimeState::Unloaded;
                return Err(RuntimeError::ConfigSource(e));
            },
        };

        let resolution = resolver::resolve(configs, &edges);
        for cycle in &resolution.cycles {
            warn!(
                tenant_id = %self.tenant_id,
                plugin_id = %cycle.plugin_id,
                depends_on = %cycle.depends_on,
                "dependency cycle detected, edge dropped"
            );
        }

        for config in resolution.ordered {
            // Registry/config drift is expected: plugins can be removed
            // from the catalog independently of tenant config.
            let Some(item) = self.registry.get(&config.plugin_id) else {
                warn!(
                    tenant_id = %self.tenant_id,
                    plugin_id = %config.plugin_id,
                    "configured plugin not in registry, skipping"
                );
                continue;
            };
            let manifest = item.manifest().clone();

            let context = SandboxedContext::new(
                config.plugin_id.clone(),
                self.tenant_id.clone(),
                config.config.clone(),
                manifest.scopes.clone(),
                Arc::clone(&self.store),
            );

            let mut instance = match item.instantiate() {
                Ok(instance) => instance,
                Err(e) => {
                    error!(
                        tenant_id = %self.tenant_id,
                        plugin_id = %config.plugin_id,
                        error = %e,
                        "plugin instantiation failed, skipping"
                    );
                    continue;
                },
            };

            if let Err(e) = instance.on_init(&context).await {
                error!(
                    tenant_id = %self.tenant_id,
                    plugin_id = %config.plugin_id,
                    error = %e,
                    "plugin initialization failed, excluded from active set"
                );
                continue;
            }

            debug!(
                tenant_id = %self.tenant_id,
                plugin_id = %config.plugin_id,
                "plugin initialized"
            );
            self.active.push(ActivePlugin {
                manifest,
                instance,
                context,
            });
        }

        self.state = RuntimeState::Loaded;
        info!(
            tenant_id = %self.tenant_id,
            active = self.active.len(),
            "tenant plugin runtime loaded"
        );
        Ok(())
    }

    /// Dispatch a hook to every active plugin that declares it.
    ///
    /// Invocations run sequentially in active-set insertion order (the
    /// resolved dependency order), each inside its own failure boundary.
    /// The returned records cover every invoked plugin — successes and
    /// contained failures alike — and are aggregated only after the last
    /// invocation settled. Plugins that do not declare the hook are
    /// silently skipped.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NotLoaded`] if called before `init()` completed.
    /// Handler failures never surface here.
    pub async fn execute_hook(
        &self,
        hook: &HookName,
        payload: serde_json::Value,
    ) -> RuntimeResult<Vec<HookDispatch>> {
        if self.state != RuntimeState::Loaded {
            return Err(RuntimeError::NotLoaded {
                tenant_id: self.tenant_id.clone(),
            });
        }

        let invocation_id = Uuid::new_v4();
        let mut results = Vec::new();

        for active in &self.active {
            if !active.instance.hooks().contains(hook) {
                continue;
            }

            let started_at = Utc::now();
            let outcome = match active
                .instance
                .on_hook(hook, &active.context, payload.clone())
                .await
            {
                Ok(payload) => HookOutcome::Success { payload },
                Err(e) => {
                    error!(
                        tenant_id = %self.tenant_id,
                        plugin_id = %active.manifest.id,
                        hook = %hook,
                        error = %e,
                        "hook handler failed"
                    );
                    HookOutcome::Error {
                        error: e.to_string(),
                    }
                },
            };
            let completed_at = Utc::now();
            #[allow(clippy::cast_sign_loss)]
            // Safety: chrono DateTime subtraction cannot overflow for reasonable time values
            #[allow(clippy::arithmetic_side_effects)]
            let duration_ms = (completed_at - started_at).num_milliseconds().max(0) as u64;

            results.push(HookDispatch {
                plugin_id: active.manifest.id.clone(),
                hook: hook.clone(),
                invocation_id,
                started_at,
                completed_at,
                duration_ms,
                outcome,
            });
        }

        Ok(results)
    }

    /// Snapshot of the active set for admin and diagnostic surfaces.
    ///
    /// Returns owned summaries; the internal set is never exposed.
    #[must_use]
    pub fn active_plugins(&self) -> Vec<PluginSummary> {
        self.active
            .iter()
            .map(|active| PluginSummary {
                id: active.manifest.id.clone(),
                name: active.manifest.name.clone(),
                version: active.manifest.version.clone(),
                category: active.manifest.category.clone(),
                hooks: active.instance.hooks(),
            })
            .collect()
    }

    /// Whether a plugin is in the active set.
    #[must_use]
    pub fn is_active(&self, plugin_id: &PluginId) -> bool {
        self.active.iter().any(|a| &a.manifest.id == plugin_id)
    }

    /// Shut the runtime down.
    ///
    /// Runs `on_shutdown` on every active plugin in reverse
    /// initialization order (dependents before their dependencies), each
    /// inside its own failure boundary, then clears the active set and
    /// returns to `Unloaded`.
    pub async fn shutdown(&mut self) {
        for active in self.active.iter_mut().rev() {
            if let Err(e) = active.instance.on_shutdown(&active.context).await {
                error!(
                    tenant_id = %self.tenant_id,
                    plugin_id = %active.manifest.id,
                    error = %e,
                    "plugin shutdown failed"
                );
            }
        }
        self.active.clear();
        self.state = RuntimeState::Unloaded;
        info!(tenant_id = %self.tenant_id, "tenant plugin runtime unloaded");
    }

    /// Rebuild from scratch: shutdown followed by a fresh `init()`.
    ///
    /// This is the path for picking up newly enabled plugins without a
    /// full tenant restart.
    ///
    /// # Errors
    ///
    /// Same as [`init`](Self::init).
    pub async fn reload(&mut self) -> RuntimeResult<()> {
        self.shutdown().await;
        self.init().await
    }
}

impl std::fmt::Debug for TenantRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantRuntime")
            .field("tenant_id", &self.tenant_id)
            .field("state", &self.state)
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}
