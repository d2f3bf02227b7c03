//! Feature registration surface for composition roots.
//!
//! Configurations are built eagerly at registration time; the registry is a
//! plain owned map, so the host application decides where the singleton
//! lives and when startup aborts.

use crate::env::EnvSnapshot;
use crate::error::ConfigError;
use crate::frozen::FrozenConfig;
use crate::loader::{BuildOptions, build_config};
use crate::schema::Schema;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Generate the injection token for a feature name.
///
/// Uppercases the name and folds anything outside `A-Z0-9` to `_`:
/// `storage` becomes `FEATURE_CONFIG_STORAGE`.
pub fn config_token(feature: &str) -> String {
    let normalized: String = feature
        .to_uppercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("FEATURE_CONFIG_{normalized}")
}

/// Opaque handle to a registered feature configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigToken(String);

impl ConfigToken {
    /// The token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of built, frozen feature configurations.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    configs: HashMap<String, FrozenConfig>,
}

impl ConfigRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feature configuration and register it under its token.
    ///
    /// Re-registering a feature replaces the previous instance.
    ///
    /// # Errors
    /// Propagates build failures; a failed build registers nothing.
    pub fn register(
        &mut self,
        schema: &Schema,
        env: &EnvSnapshot,
        options: &BuildOptions,
    ) -> Result<ConfigToken, ConfigError> {
        let frozen = build_config(schema, env, options)?;
        Ok(self.insert(frozen))
    }

    /// Build and register several features against one environment snapshot.
    ///
    /// # Errors
    /// Stops at the first failed build; features registered before the
    /// failure stay registered (the caller is expected to abort startup).
    pub fn register_all<'a>(
        &mut self,
        schemas: impl IntoIterator<Item = &'a Schema>,
        env: &EnvSnapshot,
    ) -> Result<Vec<ConfigToken>, ConfigError> {
        let options = BuildOptions::new();
        schemas
            .into_iter()
            .map(|schema| self.register(schema, env, &options))
            .collect()
    }

    /// Register an already-built instance (the asynchronous-factory path).
    pub fn insert(&mut self, frozen: FrozenConfig) -> ConfigToken {
        let token = config_token(frozen.feature());
        debug!(
            "registered feature config (feature={}, token={token})",
            frozen.feature()
        );
        self.configs.insert(token.clone(), frozen);
        ConfigToken(token)
    }

    /// Look up a configuration by feature name.
    pub fn get(&self, feature: &str) -> Option<&FrozenConfig> {
        self.configs.get(&config_token(feature))
    }

    /// Resolve a configuration through its token.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownFeature`] for tokens that were never
    /// registered.
    pub fn resolve(&self, token: &ConfigToken) -> Result<&FrozenConfig, ConfigError> {
        self.configs
            .get(token.as_str())
            .ok_or_else(|| ConfigError::UnknownFeature(token.to_string()))
    }

    /// Names of every registered feature.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.configs.values().map(FrozenConfig::feature)
    }

    /// Number of registered features.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
