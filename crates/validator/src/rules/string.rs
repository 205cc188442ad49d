//! String rule with optional length bounds.

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{ConfigError, Rule, RuleOptions};

/// Default minimum length when `min` is absent, `null` or `0`.
const DEFAULT_MIN: f64 = 1.0;

/// Passes for strings whose length lies in `[min, max]`.
///
/// Length counts Unicode scalar values. `min` defaults to 1 and `max` to
/// unbounded; a `null` or `0` bound also falls back to its default. Bounds
/// that are not numbers, or `min >= max`, are configuration errors.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shapeguard_validator::foundation::{Rule, RuleOptions};
/// use shapeguard_validator::rules::StringRule;
///
/// let params = json!({ "min": 3, "max": 5 });
/// let options = RuleOptions::new("string").with_params(params.as_object());
///
/// assert_eq!(StringRule.check(&json!("abc"), &options), Ok(true));
/// assert_eq!(StringRule.check(&json!("ab"), &options), Ok(false));
/// assert_eq!(StringRule.message(&json!("ab"), &options), "must be min=3 characters.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StringRule;

impl StringRule {
    /// Name the schema refers to this rule by.
    pub const NAME: &'static str = "string";
}

/// Resolved length bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min: f64,
    max: Option<f64>,
}

impl Bounds {
    fn from_options(options: &RuleOptions<'_>) -> Result<Self, ConfigError> {
        let min = bound(options.param("min"), "min")?.unwrap_or(DEFAULT_MIN);
        let max = bound(options.param("max"), "max")?;

        if let Some(max) = max {
            if min >= max {
                return Err(ConfigError::InvalidParam {
                    rule: StringRule::NAME.into(),
                    reason: format!("param 'min' ({min}) must be less than 'max' ({max})"),
                });
            }
        }

        Ok(Self { min, max })
    }

    fn contains(self, len: f64) -> bool {
        len >= self.min && self.max.is_none_or(|max| len <= max)
    }
}

/// Reads one bound; `null` and `0` mean "use the default".
fn bound(value: Option<&Value>, name: &str) -> Result<Option<f64>, ConfigError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().filter(|v| *v != 0.0)),
        Some(_) => Err(ConfigError::InvalidParam {
            rule: StringRule::NAME.into(),
            reason: format!("param '{name}' must be a number or null"),
        }),
    }
}

fn char_len(input: &str) -> f64 {
    input.chars().count() as f64
}

impl Rule for StringRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check(&self, value: &Value, options: &RuleOptions<'_>) -> Result<bool, ConfigError> {
        let Value::String(s) = value else {
            return Ok(false);
        };
        let bounds = Bounds::from_options(options)?;
        Ok(bounds.contains(char_len(s)))
    }

    fn message(&self, value: &Value, options: &RuleOptions<'_>) -> Cow<'static, str> {
        let Value::String(s) = value else {
            return Cow::Borrowed("must be a string");
        };
        // `check` has already rejected unusable bounds.
        let Ok(bounds) = Bounds::from_options(options) else {
            return Cow::Borrowed("is invalid");
        };
        let len = char_len(s);
        if len < bounds.min {
            Cow::Owned(format!("must be min={} characters.", bounds.min))
        } else if let Some(max) = bounds.max.filter(|max| len > *max) {
            Cow::Owned(format!("must be max={max} characters."))
        } else {
            Cow::Borrowed("is invalid")
        }
    }
}
