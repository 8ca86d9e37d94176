//! Plugin-tagged logger.

use trellis_core::{LogLevel, PluginId, TenantId};

/// Logger handed to a plugin through its sandbox.
///
/// Logging is not a capability: the logger is unscoped. Every event is
/// emitted through `tracing` tagged with the owning plugin and tenant so
/// plugin output stays attributable in mixed logs.
#[derive(Debug, Clone)]
pub struct PluginLogger {
    plugin_id: PluginId,
    tenant_id: TenantId,
}

impl PluginLogger {
    /// Create a logger tagged with the given plugin and tenant.
    #[must_use]
    pub fn new(plugin_id: PluginId, tenant_id: TenantId) -> Self {
        Self {
            plugin_id,
            tenant_id,
        }
    }

    /// Emit a message at the given level.
    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(
                plugin_id = %self.plugin_id,
                tenant_id = %self.tenant_id,
                "{message}"
            ),
            LogLevel::Debug => tracing::debug!(
                plugin_id = %self.plugin_id,
                tenant_id = %self.tenant_id,
                "{message}"
            ),
            LogLevel::Info => tracing::info!(
                plugin_id = %self.plugin_id,
                tenant_id = %self.tenant_id,
                "{message}"
            ),
            LogLevel::Warn => tracing::warn!(
                plugin_id = %self.plugin_id,
                tenant_id = %self.tenant_id,
                "{message}"
            ),
            LogLevel::Error => tracing::error!(
                plugin_id = %self.plugin_id,
                tenant_id = %self.tenant_id,
                "{message}"
            ),
        }
    }

    /// Emit at trace level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    /// Emit at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Emit at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Emit at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Emit at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_is_cheap_to_clone_and_never_fails() {
        let logger = PluginLogger::new(PluginId::new("emotion"), TenantId::new("acme"));
        let cloned = logger.clone();

        // No sink installed: events are dropped, calls still succeed.
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            logger.log(level, "probe");
        }
        cloned.info("probe");
    }
}
