//! Built-in rules
//!
//! Every registry starts with these rules, in this order:
//!
//! | name      | passes when                                        |
//! |-----------|----------------------------------------------------|
//! | `array`   | the value is a JSON array                          |
//! | `boolean` | the value is `true` or `false`                     |
//! | `date`    | the value is a `DD/MM/YYYY` string naming a real day |
//! | `email`   | the format checker accepts it as an email address  |
//! | `number`  | the value is a JSON number                         |
//! | `string`  | the value is a string within the `min`/`max` bounds |
//! | `url`     | the format checker accepts it as a URL             |

pub mod date;
pub mod format;
pub mod string;
pub mod types;

use std::sync::Arc;

use crate::formats::FormatChecker;
use crate::foundation::Rule;

pub use date::{DateRule, date, is_date};
pub use format::{EmailRule, UrlRule};
pub use string::StringRule;
pub use types::{ArrayRule, BooleanRule, NumberRule, array, boolean, number};

/// The built-in rules, with `email` and `url` backed by `checker`.
pub fn builtins(checker: &Arc<dyn FormatChecker>) -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(array()),
        Arc::new(boolean()),
        Arc::new(date()),
        Arc::new(EmailRule::new(Arc::clone(checker))),
        Arc::new(number()),
        Arc::new(StringRule),
        Arc::new(UrlRule::new(Arc::clone(checker))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::StandardFormats;

    #[test]
    fn builtins_in_documented_order() {
        let checker: Arc<dyn FormatChecker> = Arc::new(StandardFormats);
        let names: Vec<String> = builtins(&checker)
            .iter()
            .map(|rule| rule.name().to_owned())
            .collect();
        assert_eq!(
            names,
            ["array", "boolean", "date", "email", "number", "string", "url"]
        );
    }
}
