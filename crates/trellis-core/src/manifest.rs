//! Plugin manifests - static metadata describing a plugin.

use serde::{Deserialize, Serialize};

use crate::id::PluginId;
use crate::scope::{Scope, ScopeSet};

/// Static metadata describing a plugin's identity, version, and declared
/// capability scopes.
///
/// A manifest is immutable once registered: the registry stores the copy
/// taken at registration time and every sandbox for the plugin is built
/// from that copy's declared scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique, stable plugin identifier.
    pub id: PluginId,
    /// Human-readable display name.
    pub name: String,
    /// Semantic version string (e.g. `"1.2.0"`).
    pub version: String,
    /// Capability scopes the plugin declares.
    #[serde(default)]
    pub scopes: ScopeSet,
    /// Category tag for discovery surfaces (e.g. `"analysis"`).
    #[serde(default)]
    pub category: String,
}

impl PluginManifest {
    /// Create a manifest with the given identity and no declared scopes.
    #[must_use]
    pub fn new(
        id: impl Into<PluginId>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            scopes: ScopeSet::new(),
            category: String::new(),
        }
    }

    /// Declare an additional capability scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scopes.insert(scope);
        self
    }

    /// Declare multiple capability scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        for scope in scopes {
            self.scopes.insert(scope);
        }
        self
    }

    /// Set the category tag.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl std::fmt::Display for PluginManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.id, self.version)
    }
}
