//! Tests for the feature registration surface.

use envclave::{
    BuildOptions, ConfigError, ConfigRegistry, EnvSnapshot, Field, Schema,
    build_config_from_value, config_token,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn storage_schema() -> Schema {
    Schema::builder("storage")
        .field(Field::enumeration("provider", ["local", "s3"]).required())
        .build()
}

fn email_schema() -> Schema {
    Schema::builder("email")
        .field(Field::string("fromName").default_value("Example"))
        .build()
}

#[test]
fn register_builds_and_exposes_the_config() {
    let env: EnvSnapshot = [("STORAGE_PROVIDER", "local")].into_iter().collect();
    let mut registry = ConfigRegistry::new();

    let token = registry
        .register(&storage_schema(), &env, &BuildOptions::new())
        .expect("register");
    assert_eq!(token.as_str(), "FEATURE_CONFIG_STORAGE");

    let config = registry.resolve(&token).expect("resolve");
    assert_eq!(config.get_str("provider"), Some("local"));
    assert_eq!(
        registry.get("storage").map(|config| config.feature()),
        Some("storage")
    );
}

#[test]
fn register_all_covers_every_feature() {
    let env: EnvSnapshot = [("STORAGE_PROVIDER", "s3")].into_iter().collect();
    let mut registry = ConfigRegistry::new();

    let tokens = registry
        .register_all([&storage_schema(), &email_schema()], &env)
        .expect("register all");
    assert_eq!(tokens.len(), 2);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("email").and_then(|c| c.get_str("fromName")), Some("Example"));
}

#[test]
fn failed_builds_register_nothing_for_that_feature() {
    let mut registry = ConfigRegistry::new();
    let err = registry
        .register(&storage_schema(), &EnvSnapshot::empty(), &BuildOptions::new())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Validation { .. }));
    assert!(registry.get("storage").is_none());
    assert!(registry.is_empty());
}

#[test]
fn prebuilt_instances_can_be_inserted() {
    let frozen = build_config_from_value(
        &email_schema(),
        json!({ "fromName": "Ops" }),
        &EnvSnapshot::empty(),
    )
    .expect("build");

    let mut registry = ConfigRegistry::new();
    let token = registry.insert(frozen);
    assert_eq!(token.as_str(), "FEATURE_CONFIG_EMAIL");
    assert_eq!(
        registry.get("email").and_then(|c| c.get_str("fromName")),
        Some("Ops")
    );
}

#[test]
fn unknown_tokens_are_an_error() {
    let env: EnvSnapshot = [("STORAGE_PROVIDER", "local")].into_iter().collect();
    let mut orphan = ConfigRegistry::new();
    let token = orphan
        .register(&storage_schema(), &env, &BuildOptions::new())
        .expect("register");

    let registry = ConfigRegistry::new();
    let err = registry.resolve(&token).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFeature(_)));
}

#[test]
fn token_generation_matches_the_documented_shape() {
    assert_eq!(config_token("storage"), "FEATURE_CONFIG_STORAGE");
    assert_eq!(config_token("feature flags"), "FEATURE_CONFIG_FEATURE_FLAGS");
}
