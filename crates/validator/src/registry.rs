//! Rule registry
//!
//! An ordered set of uniquely named [`Rule`]s. Each registry is seeded with
//! the built-in rules and can be extended at startup with custom ones. Rules
//! are never removed or replaced once registered.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::formats::{FormatChecker, StandardFormats};
use crate::foundation::{ConfigError, Rule, RuleOptions};
use crate::rules;

/// Message used by custom rules registered without one.
pub const DEFAULT_MESSAGE: &str = "is invalid";

type Predicate = dyn Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync;

// ============================================================================
// CUSTOM RULE
// ============================================================================

/// A rule built from a closure and a fixed failure message.
///
/// This is what [`RuleRegistry::extend`] registers.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    predicate: Arc<Predicate>,
    message: Cow<'static, str>,
}

impl CustomRule {
    /// Creates a custom rule. Without a message, failures read `"is invalid"`.
    pub fn new<F>(name: impl Into<String>, predicate: F, message: Option<&str>) -> Self
    where
        F: Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            message: message.map_or(Cow::Borrowed(DEFAULT_MESSAGE), |m| Cow::Owned(m.to_owned())),
        }
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Rule for CustomRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &Value, options: &RuleOptions<'_>) -> Result<bool, ConfigError> {
        Ok((self.predicate)(value, options))
    }

    fn message(&self, _: &Value, _: &RuleOptions<'_>) -> Cow<'static, str> {
        self.message.clone()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Ordered collection of uniquely named rules.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::RuleRegistry;
///
/// let mut registry = RuleRegistry::new();
/// registry
///     .extend("even", |value, _| value.as_i64().is_some_and(|n| n % 2 == 0), Some("must be even"))
///     .unwrap();
///
/// assert!(registry.resolve("even").is_some());
/// assert!(registry.extend("email", |_, _| true, None).is_err());
/// ```
#[derive(Clone)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates a registry holding the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_format_checker(Arc::new(StandardFormats))
    }

    /// Creates a registry whose `email` and `url` rules use `checker`.
    pub fn with_format_checker(checker: Arc<dyn FormatChecker>) -> Self {
        Self {
            rules: rules::builtins(&checker),
        }
    }

    /// Creates a registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule.
    ///
    /// Fails when the name is empty, contains `:`, or is already taken.
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<&mut Self, ConfigError> {
        let name = rule.name();
        if name.is_empty() {
            return Err(ConfigError::EmptyRuleName);
        }
        if name.contains(':') {
            return Err(ConfigError::InvalidRuleName {
                name: name.to_owned(),
            });
        }
        if self.contains(name) {
            return Err(ConfigError::DuplicateRule {
                name: name.to_owned(),
            });
        }

        tracing::debug!(rule = name, "registered rule");
        self.rules.push(rule);
        Ok(self)
    }

    /// Registers a closure-backed rule.
    ///
    /// Without a message, failures read `"is invalid"`.
    pub fn extend<F>(
        &mut self,
        name: impl Into<String>,
        predicate: F,
        message: Option<&str>,
    ) -> Result<&mut Self, ConfigError>
    where
        F: Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync + 'static,
    {
        self.register(Arc::new(CustomRule::new(name, predicate, message)))
    }

    /// Finds the rule a type reference names.
    ///
    /// Only the text before the first `:` is matched: `"string:slug"`
    /// resolves to the `string` rule.
    #[must_use]
    pub fn resolve(&self, type_ref: &str) -> Option<&dyn Rule> {
        let name = type_ref.split_once(':').map_or(type_ref, |(name, _)| name);
        self.get(name)
    }

    /// Finds a rule by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| &**rule)
    }

    /// Returns true when a rule with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
