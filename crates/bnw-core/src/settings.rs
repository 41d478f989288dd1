use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// World-scoped settings, grouped by namespace.
///
/// Values are kept as raw JSON because the host stores settings for many
/// systems side by side; this ruleset only ever reads booleans.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldSettings(BTreeMap<String, BTreeMap<String, serde_json::Value>>);

impl WorldSettings {
    /// Create an empty settings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw setting value.
    pub fn get(&self, namespace: &str, key: &str) -> Option<&serde_json::Value> {
        self.0.get(namespace)?.get(key)
    }

    /// Set a raw setting value, replacing any previous one.
    pub fn set(&mut self, namespace: &str, key: &str, value: serde_json::Value) {
        self.0
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Remove a setting. Returns the old value if there was one.
    pub fn remove(&mut self, namespace: &str, key: &str) -> Option<serde_json::Value> {
        let ns = self.0.get_mut(namespace)?;
        let old = ns.remove(key);
        if ns.is_empty() {
            self.0.remove(namespace);
        }
        old
    }
}
