//! Schema binder: coerce raw values onto declared fields.
//!
//! Binding is whitelist-based (only declared fields populate the result) and
//! never fails; coercion anomalies fall back to the field default and surface
//! later, if at all, as validation constraint failures.

use crate::schema::{Field, FieldKind, Schema};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bind normalized environment text values onto the schema.
pub(super) fn bind_env(schema: &Schema, raw: &BTreeMap<String, String>) -> Map<String, Value> {
    let mut bound = Map::new();
    for field in schema.fields() {
        let value = match raw.get(field.name()) {
            Some(text) => coerce_text(field, text),
            None => field.default().cloned(),
        };
        if let Some(value) = value {
            bound.insert(field.name().to_string(), value);
        }
    }

    let unmapped: Vec<&str> = raw
        .keys()
        .filter(|key| schema.field(key).is_none())
        .map(String::as_str)
        .collect();
    if !unmapped.is_empty() {
        debug!(
            "dropping unmapped variables (feature={}, keys={:?})",
            schema.feature(),
            unmapped
        );
    }

    bound
}

/// Bind an already-assembled JSON object onto the schema.
///
/// Used for caller-supplied raw configuration (the asynchronous-factory
/// boundary); values may arrive typed or as strings.
pub(super) fn bind_value(schema: &Schema, raw: &Map<String, Value>) -> Map<String, Value> {
    let mut bound = Map::new();
    for field in schema.fields() {
        let value = match raw.get(field.name()) {
            Some(value) => coerce_value(field, value),
            None => field.default().cloned(),
        };
        if let Some(value) = value {
            bound.insert(field.name().to_string(), value);
        }
    }
    bound
}

/// Coerce one environment string per the field's declared kind.
fn coerce_text(field: &Field, text: &str) -> Option<Value> {
    match field.kind() {
        FieldKind::String | FieldKind::Enum(_) => Some(Value::String(text.to_string())),
        FieldKind::Number => match text.trim().parse::<i64>() {
            Ok(number) => Some(Value::from(number)),
            Err(_) => {
                warn!(
                    "non-numeric value for number field (field={}, value={:?}); using default",
                    field.name(),
                    text
                );
                field.default().cloned()
            }
        },
        FieldKind::Boolean => Some(Value::Bool(text == "true")),
        FieldKind::Array => Some(split_array(text)),
        FieldKind::Json => match serde_json::from_str::<Value>(text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "malformed json for field (field={}, error={err}); using default",
                    field.name()
                );
                field.default().cloned()
            }
        },
    }
}

/// Coerce one JSON value per the field's declared kind.
///
/// Null passes through every kind as the explicit empty marker so that
/// required-ness checks still see it.
fn coerce_value(field: &Field, value: &Value) -> Option<Value> {
    if value.is_null() {
        return Some(Value::Null);
    }
    match field.kind() {
        FieldKind::String | FieldKind::Enum(_) => match value {
            Value::String(_) => Some(value.clone()),
            _ => field.default().cloned(),
        },
        FieldKind::Number => match value {
            Value::Number(number) => number.as_i64().map(Value::from).or_else(|| {
                warn!(
                    "non-integer number for field (field={}, value={value})",
                    field.name()
                );
                field.default().cloned()
            }),
            Value::String(text) => coerce_text(field, text),
            _ => field.default().cloned(),
        },
        FieldKind::Boolean => Some(Value::Bool(
            matches!(value, Value::Bool(true)) || value.as_str() == Some("true"),
        )),
        FieldKind::Array => match value {
            Value::Array(_) => Some(value.clone()),
            Value::String(text) => Some(split_array(text)),
            _ => field.default().cloned(),
        },
        FieldKind::Json => match value {
            Value::String(text) => coerce_text(field, text),
            _ => Some(value.clone()),
        },
    }
}

/// Split a comma-separated list, trimming elements and dropping empties.
fn split_array(text: &str) -> Value {
    Value::Array(
        text.split(',')
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(|element| Value::String(element.to_string()))
            .collect(),
    )
}
