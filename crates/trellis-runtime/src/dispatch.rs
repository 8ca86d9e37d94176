//! Per-plugin hook dispatch records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trellis_core::{HookName, PluginId};
use uuid::Uuid;

/// Outcome of one plugin's hook invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum HookOutcome {
    /// The handler returned a payload.
    Success {
        /// The handler's return value.
        payload: serde_json::Value,
    },
    /// The handler failed; the error stayed inside this plugin's
    /// boundary.
    Error {
        /// Error message from the handler.
        error: String,
    },
}

impl HookOutcome {
    /// Whether the invocation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

/// One plugin's result record from a hook dispatch.
///
/// `execute_hook` returns one of these per active plugin that declared
/// the hook, in dispatch order, after every invocation has settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDispatch {
    /// The plugin that was invoked.
    pub plugin_id: PluginId,
    /// The hook that was dispatched.
    pub hook: HookName,
    /// Identifier shared by all records of one dispatch call.
    pub invocation_id: Uuid,
    /// When the invocation started.
    pub started_at: DateTime<Utc>,
    /// When the invocation settled.
    pub completed_at: DateTime<Utc>,
    /// Invocation duration in milliseconds.
    pub duration_ms: u64,
    /// Success or contained failure.
    pub outcome: HookOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let ok = HookOutcome::Success {
            payload: serde_json::json!({"n": 1}),
        };
        assert!(ok.is_success());
        assert_eq!(ok.payload().unwrap()["n"], 1);
        assert!(ok.error().is_none());

        let err = HookOutcome::Error {
            error: "boom".into(),
        };
        assert!(!err.is_success());
        assert!(err.payload().is_none());
        assert_eq!(err.error(), Some("boom"));
    }

    #[test]
    fn serde_tags_by_status() {
        let ok = HookOutcome::Success {
            payload: serde_json::Value::Null,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");

        let err = HookOutcome::Error {
            error: "boom".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
    }
}
