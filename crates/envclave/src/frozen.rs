//! Validated configuration instances and the freeze step.
//!
//! Freezing happens exactly once, only after validation succeeds: the bound
//! values move behind an `Arc` and every mutating path disappears from the
//! API, so an instance observed by one consumer can never change under
//! another. Lifecycle ends at process exit; there is no unfreeze.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Bound and validated configuration prior to freezing.
///
/// Pipeline-internal: consumers only ever receive the frozen form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ConfigInstance {
    feature: String,
    values: Map<String, Value>,
}

impl ConfigInstance {
    /// Wrap a validated value map.
    pub(crate) fn new(feature: String, values: Map<String, Value>) -> Self {
        Self { feature, values }
    }

    /// Number of bound fields.
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Freeze the instance, making it immutable and cheaply shareable.
    pub(crate) fn freeze(self) -> FrozenConfig {
        FrozenConfig {
            feature: Arc::from(self.feature.as_str()),
            values: Arc::new(self.values),
        }
    }
}

/// Immutable, cheaply cloneable configuration instance.
///
/// Clones share the same underlying values; there is no mutating API, so the
/// configuration observed at startup is the configuration for the lifetime of
/// the process.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenConfig {
    feature: Arc<str>,
    values: Arc<Map<String, Value>>,
}

impl FrozenConfig {
    /// Feature this configuration was built for.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Look up a string field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Look up an integer field.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Look up a boolean field.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Look up an array field.
    pub fn get_array(&self, field: &str) -> Option<&[Value]> {
        self.get(field).and_then(Value::as_array).map(Vec::as_slice)
    }

    /// Iterate bound fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no field was bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the instance into a plain JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object((*self.values).clone())
    }

    /// Decode the instance into a caller-owned type.
    ///
    /// The returned value is a private copy; mutating it has no effect on the
    /// frozen instance or on any other consumer.
    ///
    /// # Errors
    /// Returns [`ConfigError::DecodeFailed`] when the instance does not match
    /// the target type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Ok(serde_json::from_value(self.to_value())?)
    }
}
