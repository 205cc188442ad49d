//! Prelude module for convenient imports.
//!
//! Provides a single `use shapeguard_validator::prelude::*;` import that
//! brings in the validator, the schema model, the rule traits and the
//! built-in rules.
//!
//! # Examples
//!
//! ```
//! use shapeguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("name", "string")
//!     .field("scores", FieldDescriptor::new("number").optional());
//!
//! let report = Validator::from_schema(json!({ "name": "Ada", "scores": [1, null] }), schema)
//!     .into_report()
//!     .unwrap();
//! assert!(report.valid);
//! ```

// ============================================================================
// FOUNDATION: Rule traits, errors, error tree
// ============================================================================

pub use crate::foundation::{ConfigError, ConfigResult, ErrorTree, Outcome, Rule, RuleOptions};

// ============================================================================
// SCHEMA: Model and parsing
// ============================================================================

pub use crate::schema::{ElementSchema, FieldDescriptor, Schema, SchemaNode, TypeRef};

// ============================================================================
// RULES: Registry and built-ins
// ============================================================================

pub use crate::formats::{FormatChecker, StandardFormats};
pub use crate::registry::{CustomRule, RuleRegistry};
pub use crate::rules::{
    ArrayRule, BooleanRule, DateRule, EmailRule, NumberRule, StringRule, UrlRule,
};

// ============================================================================
// VALIDATION: Walker and entry points
// ============================================================================

pub use crate::validator::{Report, Validator, validate};
pub use crate::walker::{ElementPolicy, SchemaWalker, WalkerConfig};
