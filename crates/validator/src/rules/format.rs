//! Format rules delegating to a [`FormatChecker`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::formats::{FormatChecker, StandardFormats};
use crate::foundation::{ConfigError, Rule, RuleOptions};

/// Text handed to the checker. Non-string values use their JSON text.
fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

// ============================================================================
// EMAIL
// ============================================================================

/// Passes for email addresses, as judged by the configured checker.
///
/// Descriptor params are passed to the checker unchanged.
#[derive(Clone)]
pub struct EmailRule {
    checker: Arc<dyn FormatChecker>,
}

impl EmailRule {
    /// Name the schema refers to this rule by.
    pub const NAME: &'static str = "email";

    /// Creates the rule with a custom checker.
    pub fn new(checker: Arc<dyn FormatChecker>) -> Self {
        Self { checker }
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new(Arc::new(StandardFormats))
    }
}

impl fmt::Debug for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailRule").finish_non_exhaustive()
    }
}

impl Rule for EmailRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check(&self, value: &Value, options: &RuleOptions<'_>) -> Result<bool, ConfigError> {
        Ok(self
            .checker
            .is_email(&as_text(value), &options.params_or_empty()))
    }

    fn message(&self, _: &Value, _: &RuleOptions<'_>) -> Cow<'static, str> {
        Cow::Borrowed("email is invalid")
    }
}

// ============================================================================
// URL
// ============================================================================

/// Passes for URLs, as judged by the configured checker.
///
/// Descriptor params are passed to the checker unchanged.
#[derive(Clone)]
pub struct UrlRule {
    checker: Arc<dyn FormatChecker>,
}

impl UrlRule {
    /// Name the schema refers to this rule by.
    pub const NAME: &'static str = "url";

    /// Creates the rule with a custom checker.
    pub fn new(checker: Arc<dyn FormatChecker>) -> Self {
        Self { checker }
    }
}

impl Default for UrlRule {
    fn default() -> Self {
        Self::new(Arc::new(StandardFormats))
    }
}

impl fmt::Debug for UrlRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlRule").finish_non_exhaustive()
    }
}

impl Rule for UrlRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check(&self, value: &Value, options: &RuleOptions<'_>) -> Result<bool, ConfigError> {
        Ok(self.checker.is_url(&as_text(value), &options.params_or_empty()))
    }

    fn message(&self, _: &Value, _: &RuleOptions<'_>) -> Cow<'static, str> {
        Cow::Borrowed("url is invalid")
    }
}
