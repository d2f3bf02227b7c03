//! Environment snapshot, prefix extraction, and key normalization.
//!
//! The snapshot is captured once at the boundary and threaded explicitly
//! through the pipeline and the rule engine, so the core stays a pure
//! function of its inputs.

use std::collections::{BTreeMap, HashMap};

/// Read-only snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Snapshot with no variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a variable, builder-style.
    pub fn with_var(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(var.into(), value.into());
        self
    }

    /// Look up a variable.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(String::as_str)
    }

    /// Number of variables in the snapshot.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True when the snapshot holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variables whose name starts with `prefix`, with the prefix stripped.
    ///
    /// The match is case-sensitive; map semantics, so ordering carries no
    /// meaning (a `BTreeMap` is returned for deterministic logging).
    pub fn extract_prefixed(&self, prefix: &str) -> BTreeMap<String, String> {
        self.vars
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .map(|stripped| (stripped.to_string(), value.clone()))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Derive the variable prefix for a feature name.
///
/// Uppercases the name, folds non-alphanumerics to `_`, and appends a
/// trailing underscore: `storage` becomes `STORAGE_`.
pub fn env_prefix(feature: &str) -> String {
    let mut prefix: String = feature
        .to_uppercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    prefix.push('_');
    prefix
}

/// Convert a SCREAMING_SNAKE_CASE variable name to a camelCase field name.
///
/// Underscores mark word boundaries; runs of underscores collapse to a single
/// boundary and leading or trailing underscores are dropped, so `API__KEY`
/// and `_API_KEY` both normalize to `apiKey`.
pub fn camel_case_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    for (index, segment) in key.split('_').filter(|s| !s.is_empty()).enumerate() {
        let lowered = segment.to_lowercase();
        if index == 0 {
            result.push_str(&lowered);
        } else {
            let mut chars = lowered.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_uppercase());
                result.push_str(chars.as_str());
            }
        }
    }
    result
}

/// Convert a camelCase field name to a SCREAMING_SNAKE_CASE variable name.
///
/// Inverse of [`camel_case_key`]; used to document the variables a schema
/// reads (`apiKey` becomes `API_KEY`).
pub fn screaming_snake_key(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_uppercase());
        }
    }
    result
}

/// Normalize every key of an extracted mapping to camelCase.
pub fn normalize_keys(extracted: BTreeMap<String, String>) -> BTreeMap<String, String> {
    extracted
        .into_iter()
        .map(|(key, value)| (camel_case_key(&key), value))
        .collect()
}
