//! Validator orchestration
//!
//! A [`Validator`] binds one input object to one schema and owns its own
//! rule registry, so instances share no mutable state. Create one per
//! input (e.g. per request) and drop it afterwards.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{ConfigError, ErrorTree, Rule, RuleOptions};
use crate::registry::RuleRegistry;
use crate::schema::Schema;
use crate::walker::{SchemaWalker, WalkerConfig};

/// Verdict plus error tree, detached from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// True when every field passed.
    pub valid: bool,
    /// Per-field outcomes, shaped like the schema.
    pub errors: ErrorTree,
}

/// Validates one input object against one schema.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shapeguard_validator::Validator;
///
/// let mut validator = Validator::new(
///     json!({ "email": "ada@example.com", "age": 17 }),
///     json!({ "email": "email", "age": "adult" }),
/// )
/// .unwrap();
///
/// validator
///     .extend("adult", |value, _| value.as_u64().is_some_and(|age| age >= 18), Some("must be 18 or older"))
///     .unwrap();
///
/// assert!(!validator.validate().unwrap());
/// assert_eq!(
///     validator.errors().unwrap().to_value(),
///     json!({ "email": "success", "age": "must be 18 or older" })
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    input: Value,
    schema: Schema,
    registry: RuleRegistry,
    config: WalkerConfig,
    errors: Option<ErrorTree>,
}

impl Validator {
    /// Binds `input` to the JSON form of a schema.
    ///
    /// Fails when the schema itself is malformed.
    pub fn new(input: Value, schema: Value) -> Result<Self, ConfigError> {
        Ok(Self::from_schema(input, Schema::from_value(&schema)?))
    }

    /// Binds `input` to an already parsed schema.
    pub fn from_schema(input: Value, schema: Schema) -> Self {
        Self {
            input,
            schema,
            registry: RuleRegistry::new(),
            config: WalkerConfig::default(),
            errors: None,
        }
    }

    /// Replaces the rule registry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the walker settings.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a custom rule on this validator's registry.
    ///
    /// Without a message, failures read `"is invalid"`. Fails when the name
    /// is empty, contains `:`, or is already taken (built-ins included).
    pub fn extend<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
        message: Option<&str>,
    ) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync + 'static,
    {
        self.registry.extend(name, predicate, message)?;
        Ok(self)
    }

    /// Registers a hand-written [`Rule`].
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<&mut Self, ConfigError> {
        self.registry.register(rule)?;
        Ok(self)
    }

    /// Runs validation and returns the verdict.
    ///
    /// The error tree is available from [`errors`](Self::errors) afterwards.
    /// Each call rebuilds it. Configuration errors are logged and returned;
    /// the previous tree, if any, is discarded.
    pub fn validate(&mut self) -> Result<bool, ConfigError> {
        self.errors = None;
        tracing::debug!(fields = self.schema.len(), "validation started");

        let walker = SchemaWalker::new(&self.registry, self.config);
        let walk = walker.walk(&self.input, &self.schema).inspect_err(|err| {
            tracing::error!(code = err.code(), error = %err, "schema configuration error");
        })?;

        tracing::debug!(
            valid = walk.valid,
            failures = walk.errors.failure_count(),
            "validation finished"
        );
        self.errors = Some(walk.errors);
        Ok(walk.valid)
    }

    /// The error tree of the last successful [`validate`](Self::validate) call.
    #[must_use]
    pub fn errors(&self) -> Option<&ErrorTree> {
        self.errors.as_ref()
    }

    /// Validates and returns the verdict together with the tree.
    pub fn into_report(mut self) -> Result<Report, ConfigError> {
        let valid = self.validate()?;
        let errors = self.errors.take().unwrap_or_else(ErrorTree::success);
        Ok(Report { valid, errors })
    }

    /// The bound input.
    #[must_use]
    pub fn input(&self) -> &Value {
        &self.input
    }

    /// The bound schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// This validator's registry.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }
}

/// One-shot validation with the built-in rules and default settings.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let report = shapeguard_validator::validate(
///     json!({ "site": "https://example.com" }),
///     json!({ "site": "url" }),
/// )
/// .unwrap();
/// assert!(report.valid);
/// ```
pub fn validate(input: Value, schema: Value) -> Result<Report, ConfigError> {
    Validator::new(input, schema)?.into_report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::ElementPolicy;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn errors_are_empty_before_validate() {
        let validator = Validator::new(json!({ "a": 1 }), json!({ "a": "number" })).unwrap();
        assert!(validator.errors().is_none());
    }

    #[test]
    fn validate_populates_errors() {
        let mut validator = Validator::new(json!({ "a": "x" }), json!({ "a": "number" })).unwrap();
        assert_eq!(validator.validate(), Ok(false));
        assert_eq!(
            validator.errors().and_then(|tree| tree.get("a")),
            Some(&ErrorTree::failure("must be a number"))
        );
    }

    #[test]
    fn validate_is_repeatable() {
        let mut validator = Validator::new(json!({ "a": 1 }), json!({ "a": "number" })).unwrap();
        assert_eq!(validator.validate(), Ok(true));
        assert_eq!(validator.validate(), Ok(true));
        assert_eq!(validator.errors().map(ErrorTree::to_value), Some(json!({ "a": "success" })));
    }

    #[test]
    fn extend_rejects_builtin_names() {
        let mut validator = Validator::new(json!({}), json!({})).unwrap();
        assert_eq!(
            validator.extend("email", |_, _| true, None).unwrap_err(),
            ConfigError::DuplicateRule {
                name: "email".into()
            }
        );
    }

    #[test]
    fn extend_without_message_uses_default() {
        let mut validator = Validator::new(json!({ "code": "b" }), json!({ "code": "upper" })).unwrap();
        validator
            .extend(
                "upper",
                |value, _| value.as_str().is_some_and(|s| s.chars().all(char::is_uppercase)),
                None,
            )
            .unwrap();
        assert_eq!(validator.validate(), Ok(false));
        assert_eq!(
            validator.errors().unwrap().to_value(),
            json!({ "code": "is invalid" })
        );
    }

    #[test]
    fn instances_do_not_share_registries() {
        let mut first = Validator::new(json!({ "a": 1 }), json!({ "a": "custom" })).unwrap();
        first.extend("custom", |_, _| true, None).unwrap();
        assert_eq!(first.validate(), Ok(true));

        let mut second = Validator::new(json!({ "a": 1 }), json!({ "a": "custom" })).unwrap();
        assert!(matches!(second.validate(), Err(ConfigError::UnknownRule { .. })));
    }

    #[test]
    fn config_error_clears_previous_tree() {
        let mut validator = Validator::new(json!({ "a": 1 }), json!({ "a": "late" })).unwrap();
        assert!(validator.validate().is_err());
        assert!(validator.errors().is_none());

        validator.extend("late", |_, _| true, None).unwrap();
        assert_eq!(validator.validate(), Ok(true));
        assert!(validator.errors().is_some());
    }

    #[test]
    fn config_is_applied() {
        let validator = Validator::new(json!({ "k": ["x"] }), json!({ "k": ["number"] }))
            .unwrap()
            .with_config(WalkerConfig::default().with_element_policy(ElementPolicy::Strict));
        let report = validator.into_report().unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors.to_value(), json!({ "k": ["must be a number"] }));
    }

    #[test]
    fn one_shot_validate() {
        let report = validate(json!({ "d": "31/04/2023" }), json!({ "d": "date" })).unwrap();
        assert!(!report.valid);
        assert_eq!(report.errors.to_value(), json!({ "d": "date is invalid" }));

        assert!(validate(json!({}), json!({ "d": 5 })).is_err());
    }
}
