//! Configuration errors
//!
//! A [`ConfigError`] means the schema or the rule definitions are wrong,
//! not the data. Data that fails a rule is never reported here; it lands in
//! the [`ErrorTree`](crate::foundation::ErrorTree) as a per-field message.

/// An unrecoverable schema or rule-registration error.
///
/// Every variant names the key path or rule it concerns so the author can
/// find the offending definition. Hosts decide whether to abort on these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A rule was registered with an empty name.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// A rule name contains `:`, which is reserved for type-reference suffixes.
    #[error("rule name `{name}` must not contain ':'")]
    InvalidRuleName { name: String },

    /// A rule with the same name is already registered.
    #[error("rule `{name}` already exists")]
    DuplicateRule { name: String },

    /// A schema node references a rule that is not registered.
    #[error("{path}: type `{type_ref}` is invalid")]
    UnknownRule { path: String, type_ref: String },

    /// A key declared by the schema is absent from the input.
    #[error("{path}: key does not exist")]
    MissingKey { path: String },

    /// The input at `path` does not have the shape the schema requires.
    #[error("{path}: expected {expected}, got {actual}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A schema node has a shape that is not one of the three node kinds.
    #[error("{path}: schema is invalid: {reason}")]
    InvalidSchema { path: String, reason: String },

    /// A collection field descriptor is malformed.
    #[error("{path}: param `{field}` {reason}")]
    InvalidDescriptor {
        path: String,
        field: &'static str,
        reason: &'static str,
    },

    /// A rule parameter has the wrong type or an inconsistent value.
    #[error("rule `{rule}`: {reason}")]
    InvalidParam { rule: String, reason: String },

    /// The top-level input is not an object.
    #[error("input must be an object, got {actual}")]
    InvalidInput { actual: &'static str },

    /// A schema document could not be parsed as JSON.
    #[error("schema is not valid JSON: {0}")]
    Json(String),
}

impl ConfigError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyRuleName => "RULE_EMPTY_NAME",
            Self::InvalidRuleName { .. } => "RULE_INVALID_NAME",
            Self::DuplicateRule { .. } => "RULE_DUPLICATE",
            Self::UnknownRule { .. } => "SCHEMA_UNKNOWN_RULE",
            Self::MissingKey { .. } => "INPUT_MISSING_KEY",
            Self::ShapeMismatch { .. } => "INPUT_SHAPE_MISMATCH",
            Self::InvalidSchema { .. } => "SCHEMA_INVALID",
            Self::InvalidDescriptor { .. } => "SCHEMA_INVALID_DESCRIPTOR",
            Self::InvalidParam { .. } => "RULE_INVALID_PARAM",
            Self::InvalidInput { .. } => "INPUT_INVALID",
            Self::Json(_) => "SCHEMA_JSON",
        }
    }

    /// The key path this error concerns, if it is tied to one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnknownRule { path, .. }
            | Self::MissingKey { path }
            | Self::ShapeMismatch { path, .. }
            | Self::InvalidSchema { path, .. }
            | Self::InvalidDescriptor { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Short JSON type name used in diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
