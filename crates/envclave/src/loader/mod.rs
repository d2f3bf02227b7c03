//! Environment-to-configuration pipeline.
//!
//! Extracts prefixed variables from an [`EnvSnapshot`], normalizes keys to
//! camelCase, binds them onto a [`Schema`] with per-kind coercion, validates
//! structural and conditional constraints with full aggregation, and freezes
//! the result. The flow is raw env -> extracted -> normalized -> bound ->
//! validated (or rejected) -> frozen; a rejected build raises exactly one
//! aggregated error and produces nothing.

mod bind;
mod validate;

#[cfg(test)]
mod tests;

use crate::env::{self, EnvSnapshot};
use crate::error::ConfigError;
use crate::frozen::{ConfigInstance, FrozenConfig};
use crate::schema::Schema;
use log::{debug, info, warn};
use serde_json::Value;

/// Options controlling a single configuration build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Override for the derived `<FEATURE>_` environment prefix.
    pub env_prefix: Option<String>,
}

impl BuildOptions {
    /// Options with every default in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom environment-variable prefix instead of the derived one.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }
}

/// Build, validate, and freeze a feature configuration from the environment.
///
/// # Errors
/// Returns [`ConfigError::InvalidSchema`] for inconsistent schema
/// declarations and [`ConfigError::Validation`] carrying every violated
/// constraint when the bound instance is rejected.
pub fn build_config(
    schema: &Schema,
    env: &EnvSnapshot,
    options: &BuildOptions,
) -> Result<FrozenConfig, ConfigError> {
    schema.ensure_well_formed()?;
    let prefix = options
        .env_prefix
        .clone()
        .unwrap_or_else(|| schema.env_prefix());
    debug!(
        "extracting environment (feature={}, prefix={})",
        schema.feature(),
        prefix
    );
    let extracted = env.extract_prefixed(&prefix);
    let normalized = env::normalize_keys(extracted);
    debug!(
        "normalized variables (feature={}, count={})",
        schema.feature(),
        normalized.len()
    );
    let bound = bind::bind_env(schema, &normalized);
    finish(schema, bound, env)
}

/// Validate and freeze an already-assembled raw configuration object.
///
/// This is the boundary for caller-supplied factories: an asynchronous
/// producer is awaited by the caller, and its output goes through the same
/// synchronous bind-validate-freeze pipeline as environment input.
///
/// # Errors
/// Returns [`ConfigError::Invalid`] when the raw value is not an object,
/// otherwise the same errors as [`build_config`].
pub fn build_config_from_value(
    schema: &Schema,
    raw: Value,
    env: &EnvSnapshot,
) -> Result<FrozenConfig, ConfigError> {
    schema.ensure_well_formed()?;
    let Value::Object(map) = raw else {
        return Err(ConfigError::Invalid(
            "raw configuration must be an object".to_string(),
        ));
    };
    debug!(
        "binding raw value (feature={}, entries={})",
        schema.feature(),
        map.len()
    );
    let bound = bind::bind_value(schema, &map);
    finish(schema, bound, env)
}

/// Shared validate-and-freeze tail of both entry points.
fn finish(
    schema: &Schema,
    bound: serde_json::Map<String, Value>,
    env: &EnvSnapshot,
) -> Result<FrozenConfig, ConfigError> {
    let report = validate::validate_instance(schema, &bound, env);
    if !report.is_empty() {
        warn!(
            "configuration rejected (feature={}, failures={})",
            schema.feature(),
            report.len()
        );
        return Err(ConfigError::Validation {
            feature: schema.feature().to_string(),
            report,
        });
    }
    let instance = ConfigInstance::new(schema.feature().to_string(), bound);
    info!(
        "configuration built (feature={}, fields={})",
        schema.feature(),
        instance.len()
    );
    Ok(instance.freeze())
}
