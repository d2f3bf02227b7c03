//! Tests for the extraction, binding, and validation pipeline.

use super::*;
use crate::error::ConfigError;
use crate::rules::{Condition, RequireRule};
use crate::schema::{Field, Format, Schema};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn prefixed_variable_round_trips_to_camel_case_field() {
    let schema = Schema::builder("foo").field(Field::string("apiKey")).build();
    let env: EnvSnapshot = [("FOO_API_KEY", "x")].into_iter().collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.get_str("apiKey"), Some("x"));
}

#[test]
fn defaults_fill_absent_variables() {
    let schema = Schema::builder("app")
        .field(Field::string("logLevel").default_value("info"))
        .field(Field::number("workers").default_value(4))
        .field(Field::boolean("verbose").default_value(false))
        .field(Field::string("banner"))
        .build();

    let config = build_config(&schema, &EnvSnapshot::empty(), &BuildOptions::new())
        .expect("config");
    assert_eq!(config.get_str("logLevel"), Some("info"));
    assert_eq!(config.get_i64("workers"), Some(4));
    assert_eq!(config.get_bool("verbose"), Some(false));
    assert_eq!(config.get("banner"), None);
}

#[test]
fn non_numeric_number_falls_back_to_default() {
    let schema = Schema::builder("app")
        .field(Field::number("workers").default_value(4))
        .field(Field::number("retries"))
        .build();
    let env: EnvSnapshot = [("APP_WORKERS", "plenty"), ("APP_RETRIES", "abc")]
        .into_iter()
        .collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.get_i64("workers"), Some(4));
    assert_eq!(config.get("retries"), None);
}

#[test]
fn boolean_parses_only_the_literal_true() {
    let schema = Schema::builder("app")
        .field(Field::boolean("a"))
        .field(Field::boolean("b"))
        .field(Field::boolean("c"))
        .build();
    let env: EnvSnapshot = [("APP_A", "true"), ("APP_B", "TRUE"), ("APP_C", "1")]
        .into_iter()
        .collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.get_bool("a"), Some(true));
    assert_eq!(config.get_bool("b"), Some(false));
    assert_eq!(config.get_bool("c"), Some(false));
}

#[test]
fn array_splits_trims_and_drops_empty_elements() {
    let schema = Schema::builder("app").field(Field::array("origins")).build();
    let env: EnvSnapshot = [("APP_ORIGINS", "a.example.com , b.example.com,,")]
        .into_iter()
        .collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(
        config.get("origins"),
        Some(&json!(["a.example.com", "b.example.com"]))
    );
}

#[test]
fn json_field_parses_structured_data() {
    let schema = Schema::builder("app").field(Field::json("limits")).build();
    let env: EnvSnapshot = [("APP_LIMITS", r#"{"rps": 10, "burst": 20}"#)]
        .into_iter()
        .collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.get("limits"), Some(&json!({ "rps": 10, "burst": 20 })));
}

#[test]
fn malformed_json_falls_back_to_default() {
    let schema = Schema::builder("app")
        .field(Field::json("limits").default_value(json!({ "rps": 5 })))
        .build();
    let env: EnvSnapshot = [("APP_LIMITS", "{not json")].into_iter().collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.get("limits"), Some(&json!({ "rps": 5 })));
}

#[test]
fn unmapped_variables_are_dropped_silently() {
    let schema = Schema::builder("app").field(Field::string("name")).build();
    let env: EnvSnapshot = [("APP_NAME", "svc"), ("APP_SOMETHING_ELSE", "ignored")]
        .into_iter()
        .collect();

    let config = build_config(&schema, &env, &BuildOptions::new()).expect("config");
    assert_eq!(config.len(), 1);
    assert_eq!(config.get_str("name"), Some("svc"));
}

#[test]
fn custom_prefix_overrides_the_derived_one() {
    let schema = Schema::builder("storage").field(Field::string("bucket")).build();
    let env: EnvSnapshot = [("BLOB_BUCKET", "media")].into_iter().collect();
    let options = BuildOptions::new().with_env_prefix("BLOB_");

    let config = build_config(&schema, &env, &options).expect("config");
    assert_eq!(config.get_str("bucket"), Some("media"));
}

#[test]
fn rejection_aggregates_every_failure_in_declaration_order() {
    let schema = Schema::builder("app")
        .field(Field::enumeration("mode", ["basic", "advanced"]).required())
        .field(Field::string("contact").format(Format::Email))
        .field(
            Field::string("apiKey")
                .rule(RequireRule::when(Condition::equals("mode", "advanced"))),
        )
        .build();
    let env: EnvSnapshot = [("APP_MODE", "advanced"), ("APP_CONTACT", "not-an-email")]
        .into_iter()
        .collect();

    let err = build_config(&schema, &env, &BuildOptions::new()).unwrap_err();
    let ConfigError::Validation { feature, report } = err else {
        panic!("expected validation error");
    };
    assert_eq!(feature, "app");
    let paths: Vec<&str> = report
        .failures()
        .iter()
        .map(|failure| failure.path.as_str())
        .collect();
    assert_eq!(paths, vec!["contact", "apiKey"]);

    let rendered = format!("{report}");
    let expected = [
        "  - contact: contact must be an email",
        "  - apiKey: apiKey is required when specified conditions are met",
    ]
    .join("\n");
    assert_eq!(rendered, expected);
}

#[test]
fn nested_failures_use_dotted_paths() {
    let transport = Schema::builder("transport")
        .field(Field::string("host").required())
        .field(Field::number("port"))
        .build();
    let schema = Schema::builder("email")
        .field(Field::json("smtp").nested(transport))
        .build();
    let env: EnvSnapshot = [("EMAIL_SMTP", r#"{"host": "", "port": 25}"#)]
        .into_iter()
        .collect();

    let err = build_config(&schema, &env, &BuildOptions::new()).unwrap_err();
    let ConfigError::Validation { report, .. } = err else {
        panic!("expected validation error");
    };
    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].path, "smtp.host");
}

#[test]
fn nested_non_object_is_a_structural_failure() {
    let transport = Schema::builder("transport")
        .field(Field::string("host").required())
        .build();
    let schema = Schema::builder("email")
        .field(Field::json("smtp").nested(transport))
        .build();
    let env: EnvSnapshot = [("EMAIL_SMTP", "[1, 2]")].into_iter().collect();

    let err = build_config(&schema, &env, &BuildOptions::new()).unwrap_err();
    assert!(format!("{err}").contains("smtp must be an object"));
}

#[test]
fn value_input_goes_through_the_same_pipeline() {
    let schema = Schema::builder("app")
        .field(Field::string("name").required())
        .field(Field::number("workers").default_value(2))
        .field(Field::boolean("verbose"))
        .build();
    let raw = json!({ "name": "svc", "workers": 8, "verbose": true, "extra": "dropped" });

    let config =
        build_config_from_value(&schema, raw, &EnvSnapshot::empty()).expect("config");
    assert_eq!(config.get_str("name"), Some("svc"));
    assert_eq!(config.get_i64("workers"), Some(8));
    assert_eq!(config.get_bool("verbose"), Some(true));
    assert_eq!(config.get("extra"), None);
}

#[test]
fn value_input_must_be_an_object() {
    let schema = Schema::builder("app").field(Field::string("name")).build();
    let err = build_config_from_value(&schema, json!([1, 2]), &EnvSnapshot::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn value_input_null_still_counts_as_empty() {
    let schema = Schema::builder("app")
        .field(Field::string("name").required())
        .build();
    let err = build_config_from_value(&schema, json!({ "name": null }), &EnvSnapshot::empty())
        .unwrap_err();
    assert!(format!("{err}").contains("name should not be empty"));
}

#[test]
fn duplicate_schema_fields_abort_the_build() {
    let schema = Schema::builder("app")
        .field(Field::string("name"))
        .field(Field::string("name"))
        .build();
    let err = build_config(&schema, &EnvSnapshot::empty(), &BuildOptions::new()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSchema(_)));
}
