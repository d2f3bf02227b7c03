//! Environment-driven feature configuration with conditional requirements.
//!
//! This crate turns prefixed environment variables into validated, immutable
//! per-feature configuration objects. Fields become mandatory only when
//! declarative conditions over sibling fields or the deployment environment
//! hold; every violated constraint is collected into a single aggregated
//! error so startup fails once, with the full picture.
//!
//! ```
//! use envclave::{BuildOptions, Condition, EnvSnapshot, Field, RequireRule, Schema, build_config};
//!
//! let schema = Schema::builder("storage")
//!     .field(Field::enumeration("provider", ["local", "s3"]).required())
//!     .field(Field::string("s3BucketName").rule(
//!         RequireRule::when(Condition::equals("provider", "s3"))
//!             .message("S3 bucket name is required when using S3 storage provider"),
//!     ))
//!     .build();
//!
//! let env: EnvSnapshot = [("STORAGE_PROVIDER", "local")].into_iter().collect();
//! let config = build_config(&schema, &env, &BuildOptions::new()).expect("valid config");
//! assert_eq!(config.get_str("provider"), Some("local"));
//! ```

pub mod env;
mod error;
mod frozen;
mod loader;
pub mod presets;
mod registry;
mod rules;
mod schema;

/// Environment snapshot threaded through the pipeline and rule engine.
pub use env::EnvSnapshot;
/// Public error and validation-report types.
pub use error::{ConfigError, ValidationFailure, ValidationReport};
/// Validated and frozen configuration instances.
pub use frozen::FrozenConfig;
/// Pipeline entry points and options.
pub use loader::{BuildOptions, build_config, build_config_from_value};
/// Registration surface for composition roots.
pub use registry::{ConfigRegistry, ConfigToken, config_token};
/// Rule engine: predicates, combinators, requirement rules.
pub use rules::{Condition, ConditionOp, DEFAULT_ENV_VAR, RequireRule, is_not_empty};
/// Schema declaration types.
pub use schema::{Field, FieldKind, Format, Schema, SchemaBuilder};
