//! Core traits for the rule system
//!
//! This module defines the trait every rule implements and the options
//! value handed to each rule invocation.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::foundation::ConfigError;

// ============================================================================
// RULE OPTIONS
// ============================================================================

/// Options passed to a rule's predicate and message producer.
///
/// `type_ref` is the full type string from the schema (e.g. `"string:slug"`).
/// `params` is only set when the rule is reached through a collection field
/// descriptor; plain type references run the rule with its defaults.
#[derive(Debug, Clone, Copy)]
pub struct RuleOptions<'a> {
    /// The raw type reference, suffix included.
    pub type_ref: &'a str,
    /// Rule-specific parameters from a field descriptor.
    pub params: Option<&'a Map<String, Value>>,
}

impl<'a> RuleOptions<'a> {
    /// Options for a bare type reference with no parameters.
    #[must_use]
    pub fn new(type_ref: &'a str) -> Self {
        Self {
            type_ref,
            params: None,
        }
    }

    /// Attaches descriptor parameters.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params(mut self, params: Option<&'a Map<String, Value>>) -> Self {
        self.params = params;
        self
    }

    /// Looks up a single parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&'a Value> {
        self.params.and_then(|params| params.get(key))
    }

    /// The parameters, or an empty map when none were given.
    #[must_use]
    pub fn params_or_empty(&self) -> Cow<'a, Map<String, Value>> {
        match self.params {
            Some(params) => Cow::Borrowed(params),
            None => Cow::Owned(Map::new()),
        }
    }

    /// Text after the first `:` in the type reference.
    ///
    /// Reserved syntax: no built-in rule reads it.
    #[must_use]
    pub fn suffix(&self) -> Option<&'a str> {
        self.type_ref.split_once(':').map(|(_, suffix)| suffix)
    }
}

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A named check applied to a single scalar value.
///
/// `check` answers whether the value passes. It returns `Err` only when the
/// rule's own parameters are unusable, which is a schema-author mistake and
/// aborts the whole validation. `message` describes a failure and is only
/// called after `check` returned `Ok(false)`.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use serde_json::{Value, json};
/// use shapeguard_validator::foundation::{ConfigError, Rule, RuleOptions};
///
/// struct Positive;
///
/// impl Rule for Positive {
///     fn name(&self) -> &str {
///         "positive"
///     }
///
///     fn check(&self, value: &Value, _: &RuleOptions<'_>) -> Result<bool, ConfigError> {
///         Ok(value.as_f64().is_some_and(|n| n > 0.0))
///     }
///
///     fn message(&self, _: &Value, _: &RuleOptions<'_>) -> Cow<'static, str> {
///         Cow::Borrowed("must be positive")
///     }
/// }
///
/// assert!(Positive.check(&json!(3), &RuleOptions::new("positive")).unwrap());
/// ```
pub trait Rule: Send + Sync {
    /// Unique name the schema refers to this rule by.
    fn name(&self) -> &str;

    /// Runs the predicate.
    fn check(&self, value: &Value, options: &RuleOptions<'_>) -> Result<bool, ConfigError>;

    /// Produces the failure message for `value`.
    fn message(&self, value: &Value, options: &RuleOptions<'_>) -> Cow<'static, str>;
}

impl std::fmt::Debug for dyn Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name()).finish()
    }
}
