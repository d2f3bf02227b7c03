//! Declarative configuration schema: fields, semantic types, defaults, rules.
//!
//! A schema is plain data built with a builder; nothing is resolved through
//! reflection. Field declaration order is preserved and drives the order of
//! aggregated validation errors.

use crate::env::{env_prefix, screaming_snake_key};
use crate::error::ConfigError;
use crate::rules::{Condition, RequireRule};
use serde_json::Value;

/// Semantic type of a configuration field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Raw string passthrough.
    String,
    /// Base-10 signed integer.
    Number,
    /// Boolean parsed from the literal `true`.
    Boolean,
    /// String restricted to a fixed set of values.
    Enum(Vec<String>),
    /// Comma-separated list of strings.
    Array,
    /// Arbitrary JSON value, optionally validated against a nested schema.
    Json,
}

/// Shape constraint applied to string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Value must look like an email address.
    Email,
    /// Value must look like an http(s) URL.
    Url,
}

/// One declared configuration field.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    kind: FieldKind,
    default: Option<Value>,
    required: bool,
    format: Option<Format>,
    rules: Vec<RequireRule>,
    nested: Option<Schema>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: false,
            format: None,
            rules: Vec::new(),
            nested: None,
        }
    }

    /// Declare a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Declare an integer field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Declare a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Declare an enum field over the given allowed values.
    pub fn enumeration<V>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<String>,
    {
        Self::new(
            name,
            FieldKind::Enum(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Declare a comma-separated string-array field.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Array)
    }

    /// Declare a JSON-blob field.
    pub fn json(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Json)
    }

    /// Attach a default used when the variable is absent or fails coercion.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the field unconditionally required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach an email/url shape constraint.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Attach a conditional-requirement rule.
    pub fn rule(mut self, rule: RequireRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shorthand for `rule(RequireRule::when(condition))`.
    pub fn required_if(self, condition: Condition) -> Self {
        self.rule(RequireRule::when(condition))
    }

    /// Shorthand for `rule(RequireRule::in_env(value))`.
    pub fn required_in_env(self, value: impl Into<String>) -> Self {
        self.rule(RequireRule::in_env(value))
    }

    /// Validate a JSON-blob field against a nested schema.
    pub fn nested(mut self, schema: Schema) -> Self {
        self.nested = Some(schema);
        self
    }

    /// Field name (camelCase).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared semantic type.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Declared default, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// True when the field is unconditionally required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Declared shape constraint, if any.
    pub fn shape(&self) -> Option<Format> {
        self.format
    }

    /// Conditional-requirement rules attached to the field.
    pub fn rules(&self) -> &[RequireRule] {
        &self.rules
    }

    /// Nested schema for JSON-blob fields, if any.
    pub fn nested_schema(&self) -> Option<&Schema> {
        self.nested.as_ref()
    }
}

/// Ordered set of fields describing one feature's configuration.
#[derive(Debug, Clone)]
pub struct Schema {
    feature: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Start building a schema for the named feature.
    pub fn builder(feature: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            feature: feature.into(),
            fields: Vec::new(),
        }
    }

    /// Feature name the schema was declared for.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by camelCase name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Default environment-variable prefix for this feature.
    pub fn env_prefix(&self) -> String {
        env_prefix(&self.feature)
    }

    /// Environment variables this schema reads, in declaration order.
    ///
    /// Pairs each field with its derived `<PREFIX><SCREAMING_SNAKE>` name;
    /// useful for generating deployment documentation.
    pub fn env_keys(&self) -> Vec<(String, &Field)> {
        let prefix = self.env_prefix();
        self.fields
            .iter()
            .map(|field| (format!("{prefix}{}", screaming_snake_key(&field.name)), field))
            .collect()
    }

    /// Check schema-level invariants before a build.
    pub(crate) fn ensure_well_formed(&self) -> Result<(), ConfigError> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|prior| prior.name == field.name) {
                return Err(ConfigError::InvalidSchema(format!(
                    "duplicate field '{}' in feature '{}'",
                    field.name, self.feature
                )));
            }
            if let FieldKind::Enum(values) = &field.kind {
                if values.is_empty() {
                    return Err(ConfigError::InvalidSchema(format!(
                        "enum field '{}' declares no values",
                        field.name
                    )));
                }
            }
            if field.nested.is_some() && field.kind != FieldKind::Json {
                return Err(ConfigError::InvalidSchema(format!(
                    "field '{}' declares a nested schema but is not a json field",
                    field.name
                )));
            }
            if let Some(nested) = &field.nested {
                nested.ensure_well_formed()?;
            }
        }
        Ok(())
    }
}

/// Builder assembling a [`Schema`] field by field.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    feature: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Append a field declaration.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Finalize the schema.
    pub fn build(self) -> Schema {
        Schema {
            feature: self.feature,
            fields: self.fields,
        }
    }
}
