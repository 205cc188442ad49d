//! Macros for declaring rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rule!`]: creates a unit rule (struct + `Rule` impl + optional factory fn)
//!
//! # Examples
//!
//! ```rust,ignore
//! use shapeguard_validator::rule;
//!
//! rule! {
//!     /// Passes for JSON `true` only.
//!     pub IsTrue = "true";
//!     check(value, _) { value.as_bool() == Some(true) }
//!     message(_, _) { "must be true" }
//!     fn is_true();
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Creates a unit rule: struct definition, `Rule` implementation, a `NAME`
/// constant and, optionally, a factory function.
///
/// `check` evaluates to `bool` and cannot fail; rules whose parameters can
/// be malformed implement [`Rule`](crate::foundation::Rule) by hand.
/// `message` evaluates to anything convertible into `Cow<'static, str>`.
///
/// Both blocks receive `(value, options)` bound to the given patterns, so
/// either may be `_` when unused.
///
/// ```rust,ignore
/// rule! {
///     pub NumberRule = "number";
///     check(value, _) { value.is_number() }
///     message(_, _) { "must be a number" }
///     fn number();
/// }
/// ```
#[macro_export]
macro_rules! rule {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $rule_name:literal;
        check($value:pat_param, $options:pat_param) $check:block
        message($mvalue:pat_param, $moptions:pat_param) $message:block
        $(fn $factory:ident();)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Name the schema refers to this rule by.
            pub const NAME: &'static str = $rule_name;
        }

        impl $crate::foundation::Rule for $name {
            fn name(&self) -> &str {
                $rule_name
            }

            fn check(
                &self,
                $value: &$crate::serde_json::Value,
                $options: &$crate::foundation::RuleOptions<'_>,
            ) -> ::std::result::Result<bool, $crate::foundation::ConfigError> {
                ::std::result::Result::Ok($check)
            }

            fn message(
                &self,
                $mvalue: &$crate::serde_json::Value,
                $moptions: &$crate::foundation::RuleOptions<'_>,
            ) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::from($message)
            }
        }

        $(
            #[must_use]
            $vis const fn $factory() -> $name {
                $name
            }
        )?
    };
}
