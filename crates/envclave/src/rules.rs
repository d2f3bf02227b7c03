//! Condition predicates, combinators, and conditional-requirement rules.
//!
//! A [`Condition`] is a pure predicate over a bound configuration object and
//! an explicit [`EnvSnapshot`]; a [`RequireRule`] binds one or more conditions
//! to a field and makes that field mandatory whenever the conditions hold.

use crate::env::EnvSnapshot;
use regex::Regex;
use serde_json::{Map, Value};

/// Environment variable consulted by [`RequireRule::in_env`] by default.
pub const DEFAULT_ENV_VAR: &str = "NODE_ENV";

/// Declarative predicate over a configuration snapshot.
///
/// Leaves read a single field (or a single environment variable); `All`,
/// `Any`, and `Not` compose sub-conditions. Evaluation never fails: a missing
/// field is simply a non-match.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Field compares equal to the given value.
    Equals {
        /// Field name on the candidate object.
        field: String,
        /// Value the field must equal.
        value: Value,
    },
    /// Field is one of the given values.
    In {
        /// Field name on the candidate object.
        field: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Field is present and truthy (non-null, not `false`, not `0`, not `""`).
    Truthy {
        /// Field name on the candidate object.
        field: String,
    },
    /// Field is present and non-null.
    Exists {
        /// Field name on the candidate object.
        field: String,
    },
    /// Field is a string matching the given pattern.
    Matches {
        /// Field name on the candidate object.
        field: String,
        /// Pattern the string value must match.
        pattern: Regex,
    },
    /// Environment variable compares equal to the given value.
    EnvEquals {
        /// Variable name in the environment snapshot.
        var: String,
        /// Value the variable must equal; unset variables never match.
        value: String,
    },
    /// Logical AND over sub-conditions; vacuously true when empty.
    All(Vec<Condition>),
    /// Logical OR over sub-conditions; vacuously false when empty.
    Any(Vec<Condition>),
    /// Logical negation.
    Not(Box<Condition>),
}

impl Condition {
    /// Condition that a field equals a value.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Condition that a field is one of the given values.
    pub fn is_in<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Condition that a field is truthy.
    pub fn truthy(field: impl Into<String>) -> Self {
        Self::Truthy {
            field: field.into(),
        }
    }

    /// Condition that a field is present and non-null.
    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }

    /// Condition that a string field matches a pattern.
    pub fn matches(field: impl Into<String>, pattern: Regex) -> Self {
        Self::Matches {
            field: field.into(),
            pattern,
        }
    }

    /// Condition that [`DEFAULT_ENV_VAR`] equals a value.
    pub fn env_equals(value: impl Into<String>) -> Self {
        Self::env_var_equals(DEFAULT_ENV_VAR, value)
    }

    /// Condition that a named environment variable equals a value.
    pub fn env_var_equals(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::EnvEquals {
            var: var.into(),
            value: value.into(),
        }
    }

    /// Logical AND over conditions; `all([])` evaluates true.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Logical OR over conditions; `any([])` evaluates false.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Logical NOT.
    pub fn negate(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Evaluate against a candidate object and an environment snapshot.
    pub fn evaluate(&self, object: &Map<String, Value>, env: &EnvSnapshot) -> bool {
        match self {
            Self::Equals { field, value } => object.get(field) == Some(value),
            Self::In { field, values } => object
                .get(field)
                .is_some_and(|actual| values.iter().any(|value| value == actual)),
            Self::Truthy { field } => object.get(field).is_some_and(is_truthy),
            Self::Exists { field } => {
                matches!(object.get(field), Some(value) if !value.is_null())
            }
            Self::Matches { field, pattern } => object
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|text| pattern.is_match(text)),
            Self::EnvEquals { var, value } => env.get(var) == Some(value.as_str()),
            Self::All(conditions) => conditions
                .iter()
                .all(|condition| condition.evaluate(object, env)),
            Self::Any(conditions) => conditions
                .iter()
                .any(|condition| condition.evaluate(object, env)),
            Self::Not(condition) => !condition.evaluate(object, env),
        }
    }
}

/// Combination operator applied across a rule's conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionOp {
    /// Every condition must hold (the default).
    #[default]
    All,
    /// At least one condition must hold.
    Any,
}

/// Conditional requirement attached to a schema field.
///
/// When the rule's conditions are met the field must carry a non-empty value;
/// otherwise the rule never affects validity. Booleans and zero are counted
/// as present even though they are falsy.
#[derive(Debug, Clone)]
pub struct RequireRule {
    conditions: Vec<Condition>,
    op: ConditionOp,
    message: Option<String>,
}

impl RequireRule {
    /// Rule gated on a single condition.
    pub fn when(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            op: ConditionOp::All,
            message: None,
        }
    }

    /// Rule requiring every listed condition to hold.
    pub fn when_all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            op: ConditionOp::All,
            message: None,
        }
    }

    /// Rule requiring at least one listed condition to hold.
    pub fn when_any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            op: ConditionOp::Any,
            message: None,
        }
    }

    /// Rule gated on [`DEFAULT_ENV_VAR`] equalling `value`.
    pub fn in_env(value: impl Into<String>) -> Self {
        Self::when(Condition::env_equals(value))
    }

    /// Rule gated on a named environment variable equalling `value`.
    pub fn in_env_var(var: impl Into<String>, value: impl Into<String>) -> Self {
        Self::when(Condition::env_var_equals(var, value))
    }

    /// Replace the synthesized failure message with a custom one.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The rule's conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// The operator combining the rule's conditions.
    pub fn op(&self) -> ConditionOp {
        self.op
    }

    /// True when the rule's conditions hold for the candidate object.
    pub fn conditions_met(&self, object: &Map<String, Value>, env: &EnvSnapshot) -> bool {
        match self.op {
            ConditionOp::All => self
                .conditions
                .iter()
                .all(|condition| condition.evaluate(object, env)),
            ConditionOp::Any => self
                .conditions
                .iter()
                .any(|condition| condition.evaluate(object, env)),
        }
    }

    /// Whether the field satisfies this rule.
    ///
    /// Returns false only when the conditions are met and the value is empty.
    pub fn check(&self, value: Option<&Value>, object: &Map<String, Value>, env: &EnvSnapshot) -> bool {
        if self.conditions_met(object, env) {
            return is_not_empty(value);
        }
        true
    }

    /// Failure message for the named field.
    pub fn failure_message(&self, field: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if let [Condition::EnvEquals { var, value }] = self.conditions.as_slice() {
            return format!("{field} is required when {var} is '{value}'");
        }
        format!("{field} is required when specified conditions are met")
    }

    /// True when the rule is a single environment-equality condition.
    pub(crate) fn is_env_rule(&self) -> bool {
        matches!(self.conditions.as_slice(), [Condition::EnvEquals { .. }])
    }
}

/// Emptiness check used by requirement rules and `required` fields.
///
/// Absent values, JSON null, and the empty string are empty; `false` and `0`
/// are not.
pub fn is_not_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// JavaScript-style truthiness over JSON values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
