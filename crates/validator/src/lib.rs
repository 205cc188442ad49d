//! # shapeguard-validator
//!
//! Recursive schema validation for JSON-shaped data.
//!
//! A schema mirrors the shape of the input: each key maps to a rule name,
//! a nested schema, or a single-element array describing a list. Validation
//! walks both trees together and produces a verdict plus an error tree with
//! one entry per schema key, `"success"` or a failure message.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use shapeguard_validator::Validator;
//!
//! let mut validator = Validator::new(
//!     json!({
//!         "email": "not-an-email",
//!         "address": { "city": "Lisbon" },
//!         "tags": ["a", "b"],
//!     }),
//!     json!({
//!         "email": "email",
//!         "address": { "city": "string" },
//!         "tags": [{ "type": "string", "params": { "max": 10 } }],
//!     }),
//! )
//! .unwrap();
//!
//! // Scalar elements pass unchecked unless the walker is strict.
//! assert!(!validator.validate().unwrap());
//! assert_eq!(
//!     validator.errors().unwrap().to_value(),
//!     json!({
//!         "email": "email is invalid",
//!         "address": { "city": "success" },
//!         "tags": "success",
//!     })
//! );
//! ```
//!
//! ## Custom Rules
//!
//! Use [`Validator::extend`] for closure rules, the [`rule!`] macro for
//! zero-boilerplate unit rules, or implement [`Rule`] by hand.
//!
//! ## Built-in Rules
//!
//! `array`, `boolean`, `date`, `email`, `number`, `string` and `url`; see
//! [`rules`] for what each accepts.
//!
//! ## Errors
//!
//! Data that fails a rule lands in the [`ErrorTree`]. A broken schema, an
//! unknown rule, or input missing a declared key is a [`ConfigError`]
//! returned from [`Validator::validate`].

// Re-exported for `rule!` expansions in downstream crates.
pub use serde_json;

#[macro_use]
mod macros;

pub mod formats;
pub mod foundation;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod validator;
pub mod walker;

pub use formats::{FormatChecker, StandardFormats};
pub use foundation::{ConfigError, ErrorTree, Outcome, Rule, RuleOptions};
pub use registry::{CustomRule, RuleRegistry};
pub use schema::{ElementSchema, FieldDescriptor, Schema, SchemaNode, TypeRef};
pub use validator::{Report, Validator, validate};
pub use walker::{ElementPolicy, SchemaWalker, Walk, WalkerConfig};
