//! Well-known string formats
//!
//! The `email` and `url` rules do not parse anything themselves; they hand
//! the value and the descriptor's params to a [`FormatChecker`]. The
//! [`StandardFormats`] checker is used unless the registry is given another.
//!
//! Option names follow the conventions of the common JavaScript `validator`
//! package so schemas written for it keep working (`require_tld`,
//! `protocols`, `allow_display_name`, ...). Unknown options are ignored.

mod email;
mod host;
mod url;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use email::{EmailOptions, is_email};
pub use self::url::{UrlOptions, is_url};

/// External format predicates used by the built-in `email` and `url` rules.
pub trait FormatChecker: Send + Sync {
    /// Returns true when `value` is an email address under `options`.
    fn is_email(&self, value: &str, options: &Map<String, Value>) -> bool;

    /// Returns true when `value` is a URL under `options`.
    fn is_url(&self, value: &str, options: &Map<String, Value>) -> bool;
}

/// The default [`FormatChecker`], backed by `regex` and the `url` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormats;

impl FormatChecker for StandardFormats {
    fn is_email(&self, value: &str, options: &Map<String, Value>) -> bool {
        is_email(value, &parse_options(options))
    }

    fn is_url(&self, value: &str, options: &Map<String, Value>) -> bool {
        is_url(value, &parse_options(options))
    }
}

/// Reads checker options from descriptor params.
///
/// Options of the wrong type leave every option at its default; the checker
/// contract returns a plain bool, so this is logged rather than surfaced.
fn parse_options<T: DeserializeOwned + Default>(params: &Map<String, Value>) -> T {
    if params.is_empty() {
        return T::default();
    }
    match serde_json::from_value(Value::Object(params.clone())) {
        Ok(options) => options,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed format options");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn standard_checker_passes_options_through() {
        let checker = StandardFormats;
        assert!(checker.is_email("user@example.com", &Map::new()));
        assert!(!checker.is_email("user@localhost", &Map::new()));
        assert!(checker.is_email("user@localhost", &params(json!({ "require_tld": false }))));

        assert!(checker.is_url("https://example.com", &Map::new()));
        assert!(!checker.is_url("example.com", &params(json!({ "require_protocol": true }))));
    }

    #[test]
    fn malformed_options_fall_back_to_defaults() {
        let checker = StandardFormats;
        let bad = params(json!({ "require_tld": "nope" }));
        assert!(!checker.is_email("user@localhost", &bad));
        assert!(checker.is_email("user@example.com", &bad));
    }
}
