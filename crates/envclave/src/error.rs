//! Error types for config building and validation.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors returned while building or consuming feature configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields violated structural or conditional constraints.
    #[error("configuration validation failed for feature '{feature}':\n{report}")]
    Validation {
        /// Feature whose build was rejected.
        feature: String,
        /// Every violated field with every violated constraint.
        report: ValidationReport,
    },
    /// The schema declaration itself is inconsistent.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// Raw configuration input was not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Converting a validated instance into a caller-owned type failed.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// The requested feature was never registered.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

/// One violated field together with every constraint it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// Dot-separated property path (`smtp.host` for nested fields).
    pub path: String,
    /// The offending value as bound, when present.
    pub value: Option<Value>,
    /// Constraint name paired with its message, in discovery order.
    pub constraints: Vec<(String, String)>,
}

/// Aggregated validation failures for a single feature build.
///
/// Failures are recorded in field declaration order and never short-circuit;
/// the report is the machine-readable form of the rendered error message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failed properties.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Record a failure for one property path.
    pub(crate) fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// The recorded failures in discovery order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for failure in &self.failures {
            for (_, message) in &failure.constraints {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "  - {}: {}", failure.path, message)?;
                first = false;
            }
        }
        Ok(())
    }
}
