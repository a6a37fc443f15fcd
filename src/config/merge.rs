//! Write-once environment map

use std::collections::BTreeMap;

/// Prefix applied to every key copied out of the master config.
pub const ENV_PREFIX: &str = "RGT_";

/// Build the environment name for a config key: `RGT_` + upper-cased key.
pub fn namespaced_key(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.trim().to_uppercase())
}

/// Environment variables collected for the harness.
///
/// Insertion is first-writer-wins: a key that is already present is never
/// overwritten. Seeded values (typically the caller's process environment)
/// therefore take precedence over anything merged later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
    added: Vec<String>,
}

impl EnvMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the `RGT_`-prefixed variables of the current process.
    ///
    /// Variables that are not valid UTF-8 are ignored.
    pub fn from_process_env() -> Self {
        Self::seeded(std::env::vars_os().filter_map(|(k, v)| {
            let key = k.into_string().ok()?;
            if !key.starts_with(ENV_PREFIX) {
                return None;
            }
            Some((key, v.into_string().ok()?))
        }))
    }

    /// Seed with pre-existing values. Seeded keys are not reported by [`EnvMap::added`].
    pub fn seeded<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { vars, added: Vec::new() }
    }

    /// Insert `value` under `key` unless the key is already set.
    ///
    /// Returns `true` when the value was stored.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.vars.contains_key(&key) {
            tracing::info!("{} is already set. Skipping.", key);
            return false;
        }
        self.added.push(key.clone());
        self.vars.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// All variables, seeded and merged, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Variables stored by [`EnvMap::insert_if_absent`], in insertion order.
    pub fn added(&self) -> impl Iterator<Item = (&str, &str)> {
        self.added.iter().filter_map(|k| self.vars.get_key_value(k)).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
