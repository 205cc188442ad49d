//! JSON type rules
//!
//! Each rule passes when the value has exactly the named JSON type. No
//! coercion is attempted: `"1"` is not a number and `0` is not a boolean.

crate::rule! {
    /// Passes for JSON arrays.
    pub ArrayRule = "array";
    check(value, _) { value.is_array() }
    message(_, _) { "must be an array" }
    fn array();
}

crate::rule! {
    /// Passes for `true` and `false`.
    pub BooleanRule = "boolean";
    check(value, _) { value.is_boolean() }
    message(_, _) { "must be a boolean" }
    fn boolean();
}

crate::rule! {
    /// Passes for any JSON number, integer or float.
    pub NumberRule = "number";
    check(value, _) { value.is_number() }
    message(_, _) { "must be a number" }
    fn number();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Rule, RuleOptions};
    use serde_json::json;

    #[test]
    fn array_rule() {
        let options = RuleOptions::new("array");
        assert_eq!(array().check(&json!([]), &options), Ok(true));
        assert_eq!(array().check(&json!({}), &options), Ok(false));
        assert_eq!(array().message(&json!("x"), &options), "must be an array");
    }

    #[test]
    fn boolean_rule_rejects_truthy_values() {
        let options = RuleOptions::new("boolean");
        assert_eq!(boolean().check(&json!(false), &options), Ok(true));
        assert_eq!(boolean().check(&json!(0), &options), Ok(false));
        assert_eq!(boolean().check(&json!("true"), &options), Ok(false));
        assert_eq!(boolean().message(&json!(0), &options), "must be a boolean");
    }

    #[test]
    fn number_rule_accepts_ints_and_floats() {
        let options = RuleOptions::new("number");
        assert_eq!(number().check(&json!(42), &options), Ok(true));
        assert_eq!(number().check(&json!(-0.5), &options), Ok(true));
        assert_eq!(number().check(&json!("42"), &options), Ok(false));
        assert_eq!(number().message(&json!("42"), &options), "must be a number");
    }
}
