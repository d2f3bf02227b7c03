//! Validation orchestrator: structural constraints plus requirement rules.
//!
//! Runs every check against the bound instance without failing fast; each
//! violated field is recorded with every violated constraint, and the caller
//! turns a non-empty report into a single aggregated error. Kind
//! well-formedness is guaranteed by the binder, so the checks here cover
//! required-ness, enum membership, string shapes, nested objects, and the
//! conditional-requirement rules.

use crate::env::EnvSnapshot;
use crate::error::{ValidationFailure, ValidationReport};
use crate::rules::is_not_empty;
use crate::schema::{Field, FieldKind, Format, Schema};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Shape check for email-formatted fields.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("hard-coded pattern"));

/// Shape check for url-formatted fields.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s]+$").expect("hard-coded pattern"));

/// Validate a bound instance against its schema and the environment snapshot.
pub(super) fn validate_instance(
    schema: &Schema,
    object: &Map<String, Value>,
    env: &EnvSnapshot,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    validate_object(schema, object, env, "", &mut report);
    report
}

/// Validate one object level, recursing into nested schemas.
fn validate_object(
    schema: &Schema,
    object: &Map<String, Value>,
    env: &EnvSnapshot,
    prefix: &str,
    report: &mut ValidationReport,
) {
    for field in schema.fields() {
        let value = object.get(field.name());
        let path = join_path(prefix, field.name());
        let mut constraints: Vec<(String, String)> = Vec::new();

        if field.is_required() && !is_not_empty(value) {
            constraints.push((
                "isNotEmpty".to_string(),
                format!("{} should not be empty", field.name()),
            ));
        }

        if let Some(constraint) = check_enum(field, value) {
            constraints.push(constraint);
        }
        if let Some(constraint) = check_shape(field, value) {
            constraints.push(constraint);
        }

        if let Some(nested) = field.nested_schema() {
            match value {
                Some(Value::Object(child)) => {
                    validate_object(nested, child, env, &path, report);
                }
                Some(other) if !other.is_null() => {
                    constraints.push((
                        "nestedValidation".to_string(),
                        format!("{} must be an object", field.name()),
                    ));
                }
                _ => {}
            }
        }

        for rule in field.rules() {
            if !rule.check(value, object, env) {
                let name = if rule.is_env_rule() {
                    "isRequiredInEnv"
                } else {
                    "isRequiredIf"
                };
                constraints.push((name.to_string(), rule.failure_message(field.name())));
            }
        }

        if !constraints.is_empty() {
            report.push(ValidationFailure {
                path,
                value: value.cloned(),
                constraints,
            });
        }
    }
}

/// Enum membership for present, non-null values.
fn check_enum(field: &Field, value: Option<&Value>) -> Option<(String, String)> {
    let FieldKind::Enum(allowed) = field.kind() else {
        return None;
    };
    let value = value?;
    if value.is_null() {
        return None;
    }
    let member = value
        .as_str()
        .is_some_and(|text| allowed.iter().any(|candidate| candidate == text));
    if member {
        return None;
    }
    Some((
        "isEnum".to_string(),
        format!("{} must be one of: {}", field.name(), allowed.join(", ")),
    ))
}

/// Email/url shape for present string values.
fn check_shape(field: &Field, value: Option<&Value>) -> Option<(String, String)> {
    let format = field.shape()?;
    let Some(Value::String(text)) = value else {
        return None;
    };
    match format {
        Format::Email if !EMAIL_PATTERN.is_match(text) => Some((
            "isEmail".to_string(),
            format!("{} must be an email", field.name()),
        )),
        Format::Url if !URL_PATTERN.is_match(text) => Some((
            "isUrl".to_string(),
            format!("{} must be a URL address", field.name()),
        )),
        _ => None,
    }
}

/// Join nested paths for error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
