//! Per-field outcomes and the error tree
//!
//! The walker returns an [`ErrorTree`] that mirrors the schema: one entry per
//! schema key at every object level, holding either a leaf [`Outcome`], a
//! nested object tree, or a sequence of per-element trees for collections.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The literal written for a field that passed.
pub const SUCCESS: &str = "success";

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of checking one leaf field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The field passed its rule.
    Success,
    /// The field failed; the message is meant for end users.
    Failure(Cow<'static, str>),
}

impl Outcome {
    /// Creates a failure outcome.
    pub fn failure(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Failure(message.into())
    }

    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The text written into the tree: `"success"` or the failure message.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => SUCCESS,
            Self::Failure(message) => message.as_ref(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// ERROR TREE
// ============================================================================

/// Validation output mirroring the schema's shape.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shapeguard_validator::Validator;
///
/// let mut v = Validator::new(
///     json!({ "name": "", "tags": "x" }),
///     json!({ "name": "string", "tags": "array" }),
/// )
/// .unwrap();
///
/// assert!(!v.validate().unwrap());
/// let errors = v.errors().unwrap();
/// assert_eq!(
///     errors.to_value(),
///     json!({ "name": "must be min=1 characters.", "tags": "must be an array" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorTree {
    /// Outcome of a single field.
    Leaf(Outcome),
    /// Outcomes of a nested object, keyed in schema order.
    Object(IndexMap<String, ErrorTree>),
    /// One entry per element of a validated collection.
    Sequence(Vec<ErrorTree>),
}

impl ErrorTree {
    /// A success leaf.
    #[must_use]
    pub fn success() -> Self {
        Self::Leaf(Outcome::Success)
    }

    /// A failure leaf.
    pub fn failure(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Leaf(Outcome::failure(message))
    }

    /// Returns true when every leaf in the tree is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Leaf(outcome) => outcome.is_success(),
            Self::Object(fields) => fields.values().all(Self::is_success),
            Self::Sequence(items) => items.iter().all(Self::is_success),
        }
    }

    /// The leaf outcome, if this node is a leaf.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::Leaf(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Looks up a field of an object node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ErrorTree> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Looks up an element of a sequence node.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&ErrorTree> {
        match self {
            Self::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Follows a `/`-separated pointer such as `"/items/0/name"`.
    ///
    /// Segments address object keys or, on sequences, element indices.
    /// The empty pointer returns `self`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&ErrorTree> {
        if pointer.is_empty() {
            return Some(self);
        }
        let rest = pointer.strip_prefix('/')?;
        rest.split('/').try_fold(self, |node, segment| match node {
            Self::Object(fields) => fields.get(segment),
            Self::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Self::Leaf(_) => None,
        })
    }

    /// Every failing leaf as `(path, message)`, depth-first in schema order.
    ///
    /// Paths use dots for keys and brackets for indices: `items[0].name`.
    #[must_use]
    pub fn failures(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_failures(String::new(), &mut out);
        out
    }

    fn collect_failures<'a>(&'a self, path: String, out: &mut Vec<(String, &'a str)>) {
        match self {
            Self::Leaf(Outcome::Success) => {}
            Self::Leaf(Outcome::Failure(message)) => out.push((path, message.as_ref())),
            Self::Object(fields) => {
                for (key, child) in fields {
                    child.collect_failures(join_key(&path, key), out);
                }
            }
            Self::Sequence(items) => {
                for (i, child) in items.iter().enumerate() {
                    child.collect_failures(format!("{path}[{i}]"), out);
                }
            }
        }
    }

    /// Number of failing leaves.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Leaf(outcome) => usize::from(!outcome.is_success()),
            Self::Object(fields) => fields.values().map(Self::failure_count).sum(),
            Self::Sequence(items) => items.iter().map(Self::failure_count).sum(),
        }
    }

    /// Converts the tree to plain JSON: strings at the leaves.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(outcome) => Value::String(outcome.as_str().to_owned()),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect(),
            ),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
        }
    }
}

impl From<Outcome> for ErrorTree {
    fn from(outcome: Outcome) -> Self {
        Self::Leaf(outcome)
    }
}

/// Appends an object key to a dotted path.
pub(crate) fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}
