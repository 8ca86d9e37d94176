//! Capability scopes.
//!
//! A scope is a named permission string (e.g. `storage:read`) declared in
//! a plugin's manifest and checked by the sandbox before the plugin
//! touches a shared resource. Matching is exact-string membership: no
//! wildcards, no hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single capability scope string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    /// Create a scope from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Scope gating reads of the plugin's storage partition.
    #[must_use]
    pub fn storage_read() -> Self {
        Self::new("storage:read")
    }

    /// Scope gating writes to the plugin's storage partition.
    #[must_use]
    pub fn storage_write() -> Self {
        Self::new("storage:write")
    }

    /// The scope as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The set of scopes granted to a plugin.
///
/// Backed by an ordered set so that enumeration (manifest serialization,
/// admin surfaces) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<Scope>);

impl ScopeSet {
    /// Create an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scope to the set.
    pub fn insert(&mut self, scope: Scope) {
        self.0.insert(scope);
    }

    /// Check whether `scope` is granted.
    ///
    /// Exact-string membership; pure and total. This is the single
    /// permission check the sandbox consults before every storage call.
    #[must_use]
    pub fn has(&self, scope: &Scope) -> bool {
        self.0.contains(scope)
    }

    /// Number of granted scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no scopes are granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the granted scopes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.0.iter()
    }
}

impl FromIterator<Scope> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a Scope;
    type IntoIter = std::collections::btree_set::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
