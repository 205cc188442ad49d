//! Recursive schema walker
//!
//! The walker visits every key of a [`Schema`] against the matching input
//! object and returns a freshly built [`ErrorTree`] per level; the caller
//! slots each subtree into its parent by key. Nothing is written into the
//! input.
//!
//! Rule failures never stop the walk, so the tree is always complete. A
//! [`ConfigError`] (unknown rule, missing key, wrong input shape, unusable
//! rule params) stops it immediately.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::foundation::{ConfigError, ErrorTree, Outcome, Rule, RuleOptions, join_key, json_kind};
use crate::registry::RuleRegistry;
use crate::schema::{ElementSchema, FieldDescriptor, Schema, SchemaNode, TypeRef};

/// Message for a null value where one is required.
pub const REQUIRED_MESSAGE: &str = "is required";

/// Message for a non-object element of a collection of objects.
pub const NOT_AN_OBJECT_MESSAGE: &str = "must be an object";

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How non-object elements of a collection are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementPolicy {
    /// Non-object elements are reported as `"success"` without running any
    /// rule. A non-empty collection holding no objects at all collapses to a
    /// single `"success"` leaf. `null` and nested arrays count as non-objects.
    #[default]
    Lenient,
    /// Non-object elements are checked by the collection's descriptor, or
    /// fail with `"must be an object"` when the collection expects objects.
    /// The collection always yields one entry per element.
    Strict,
}

/// Walker settings.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::walker::{ElementPolicy, WalkerConfig};
///
/// let config: WalkerConfig = serde_json::from_str(r#"{ "element_policy": "strict" }"#).unwrap();
/// assert_eq!(config.element_policy, ElementPolicy::Strict);
/// assert_eq!(WalkerConfig::default().element_policy, ElementPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Treatment of non-object collection elements.
    pub element_policy: ElementPolicy,
}

impl WalkerConfig {
    /// Config with [`ElementPolicy::Strict`].
    #[must_use]
    pub fn strict() -> Self {
        Self {
            element_policy: ElementPolicy::Strict,
        }
    }

    /// Sets the element policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_element_policy(mut self, policy: ElementPolicy) -> Self {
        self.element_policy = policy;
        self
    }
}

// ============================================================================
// WALK RESULT
// ============================================================================

/// Verdict and error tree of one walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Walk {
    /// True when every visited field passed.
    pub valid: bool,
    /// Per-field outcomes, shaped like the schema.
    pub errors: ErrorTree,
}

/// A subtree plus whether everything in it passed.
type Checked = (bool, ErrorTree);

fn leaf(path: &str, outcome: Outcome) -> Checked {
    tracing::trace!(field = %path, outcome = %outcome, "checked field");
    (outcome.is_success(), ErrorTree::Leaf(outcome))
}

// ============================================================================
// WALKER
// ============================================================================

/// Validates input objects against schemas using a rule registry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaWalker<'r> {
    registry: &'r RuleRegistry,
    config: WalkerConfig,
}

impl<'r> SchemaWalker<'r> {
    /// Creates a walker over `registry`.
    pub fn new(registry: &'r RuleRegistry, config: WalkerConfig) -> Self {
        Self { registry, config }
    }

    /// Validates `input` against `schema`.
    ///
    /// `input` must be an object holding every key the schema declares.
    pub fn walk(&self, input: &Value, schema: &Schema) -> Result<Walk, ConfigError> {
        let Value::Object(map) = input else {
            return Err(ConfigError::InvalidInput {
                actual: json_kind(input),
            });
        };
        let (valid, errors) = self.object(map, schema, "")?;
        Ok(Walk { valid, errors })
    }

    fn object(
        &self,
        input: &Map<String, Value>,
        schema: &Schema,
        path: &str,
    ) -> Result<Checked, ConfigError> {
        let mut valid = true;
        let mut fields = IndexMap::with_capacity(schema.len());

        for (key, node) in schema.iter() {
            let field_path = join_key(path, key);
            let Some(value) = input.get(key) else {
                return Err(ConfigError::MissingKey { path: field_path });
            };

            let (ok, subtree) = match node {
                SchemaNode::TypeRef(type_ref) => self.type_ref(value, type_ref, &field_path)?,
                SchemaNode::Collection(element) => self.collection(value, element, &field_path)?,
                SchemaNode::Nested(nested) => self.nested(value, nested, &field_path)?,
            };

            valid &= ok;
            fields.insert(key.to_owned(), subtree);
        }

        Ok((valid, ErrorTree::Object(fields)))
    }

    fn resolve(&self, type_ref: &TypeRef, path: &str) -> Result<&'r dyn Rule, ConfigError> {
        self.registry
            .resolve(type_ref.as_str())
            .ok_or_else(|| ConfigError::UnknownRule {
                path: path.to_owned(),
                type_ref: type_ref.as_str().to_owned(),
            })
    }

    /// A plain type reference: null is always "is required".
    fn type_ref(&self, value: &Value, type_ref: &TypeRef, path: &str) -> Result<Checked, ConfigError> {
        let rule = self.resolve(type_ref, path)?;
        if value.is_null() {
            return Ok(leaf(path, Outcome::failure(REQUIRED_MESSAGE)));
        }

        let options = RuleOptions::new(type_ref.as_str());
        let outcome = if rule.check(value, &options)? {
            Outcome::Success
        } else {
            Outcome::Failure(rule.message(value, &options))
        };
        Ok(leaf(path, outcome))
    }

    /// A scalar checked through a field descriptor.
    fn descriptor(
        &self,
        value: &Value,
        descriptor: &FieldDescriptor,
        path: &str,
    ) -> Result<Checked, ConfigError> {
        let rule = self.resolve(descriptor.type_ref(), path)?;
        if value.is_null() {
            let outcome = if descriptor.required() {
                Outcome::failure(REQUIRED_MESSAGE)
            } else {
                Outcome::Success
            };
            return Ok(leaf(path, outcome));
        }

        let options = RuleOptions::new(descriptor.type_ref().as_str()).with_params(descriptor.params());
        let outcome = if rule.check(value, &options)? {
            Outcome::Success
        } else if let Some(message) = descriptor.error_message() {
            Outcome::failure(message.to_owned())
        } else {
            Outcome::Failure(rule.message(value, &options))
        };
        Ok(leaf(path, outcome))
    }

    fn collection(
        &self,
        value: &Value,
        element: &ElementSchema,
        path: &str,
    ) -> Result<Checked, ConfigError> {
        let Value::Array(items) = value else {
            return match element {
                ElementSchema::Descriptor(descriptor) => self.descriptor(value, descriptor, path),
                ElementSchema::Object(_) => Err(ConfigError::ShapeMismatch {
                    path: path.to_owned(),
                    expected: "array",
                    actual: json_kind(value),
                }),
            };
        };

        let lenient = self.config.element_policy == ElementPolicy::Lenient;
        if lenient && !items.is_empty() && !items.iter().any(Value::is_object) {
            return Ok(leaf(path, Outcome::Success));
        }

        let mut valid = true;
        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{index}]");
            let (ok, subtree) = match (item, element) {
                (Value::Object(map), ElementSchema::Object(schema)) => {
                    self.object(map, schema, &item_path)?
                }
                (Value::Object(map), ElementSchema::Descriptor(descriptor)) => {
                    let schema = descriptor_schema(descriptor, path)?;
                    self.object(map, &schema, &item_path)?
                }
                _ if lenient => leaf(&item_path, Outcome::Success),
                (_, ElementSchema::Descriptor(descriptor)) => {
                    self.descriptor(item, descriptor, &item_path)?
                }
                (_, ElementSchema::Object(_)) => {
                    leaf(&item_path, Outcome::failure(NOT_AN_OBJECT_MESSAGE))
                }
            };
            valid &= ok;
            entries.push(subtree);
        }

        Ok((valid, ErrorTree::Sequence(entries)))
    }

    fn nested(&self, value: &Value, schema: &Schema, path: &str) -> Result<Checked, ConfigError> {
        match value {
            Value::Object(map) => self.object(map, schema, path),
            other => Err(ConfigError::ShapeMismatch {
                path: path.to_owned(),
                expected: "object",
                actual: json_kind(other),
            }),
        }
    }
}

/// Reads a descriptor as the object schema `{ "type": <type_ref> }`, for
/// object elements of a descriptor collection.
///
/// `required: false`, `params` and `errorMessage` are not schema nodes, so a
/// descriptor carrying any of them cannot describe an object.
fn descriptor_schema(descriptor: &FieldDescriptor, path: &str) -> Result<Schema, ConfigError> {
    let field = if descriptor.params().is_some() {
        Some("params")
    } else if descriptor.error_message().is_some() {
        Some("errorMessage")
    } else if descriptor.required() {
        None
    } else {
        Some("required")
    };

    match field {
        Some(field) => Err(ConfigError::InvalidSchema {
            path: path.to_owned(),
            reason: format!("descriptor param `{field}` is not a schema node for object elements"),
        }),
        None => Ok(Schema::new().field("type", descriptor.type_ref().clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn walk_with(config: WalkerConfig, input: Value, schema: Value) -> Result<Walk, ConfigError> {
        let registry = RuleRegistry::new();
        let schema = Schema::from_value(&schema)?;
        SchemaWalker::new(&registry, config).walk(&input, &schema)
    }

    fn walk(input: Value, schema: Value) -> Result<Walk, ConfigError> {
        walk_with(WalkerConfig::default(), input, schema)
    }

    #[test]
    fn all_passing_fields_are_success() {
        let result = walk(
            json!({ "name": "Ada", "age": 36, "admin": false }),
            json!({ "name": "string", "age": "number", "admin": "boolean" }),
        )
        .unwrap();
        assert!(result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({ "name": "success", "age": "success", "admin": "success" })
        );
    }

    #[test]
    fn failures_do_not_stop_the_walk() {
        let result = walk(
            json!({ "a": 1, "b": "x", "c": null }),
            json!({ "a": "string", "b": "number", "c": "date" }),
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({ "a": "must be a string", "b": "must be a number", "c": "is required" })
        );
    }

    #[test]
    fn tree_holds_only_schema_keys() {
        let result = walk(json!({ "a": "x", "extra": 1 }), json!({ "a": "string" })).unwrap();
        assert_eq!(result.errors.to_value(), json!({ "a": "success" }));
    }

    #[test]
    fn nested_failure_propagates_up() {
        let result = walk(
            json!({ "user": { "contact": { "email": "nope" } }, "ok": true }),
            json!({ "user": { "contact": { "email": "email" } }, "ok": "boolean" }),
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.pointer("/user/contact/email"),
            Some(&ErrorTree::failure("email is invalid"))
        );
        assert_eq!(result.errors.get("ok"), Some(&ErrorTree::success()));
    }

    #[test]
    fn suffix_resolves_to_prefix_rule() {
        let result = walk(json!({ "slug": "abc" }), json!({ "slug": "string:slug" })).unwrap();
        assert!(result.valid);
    }

    #[test]
    fn type_refs_run_rules_without_params() {
        // Plain type references see rule defaults, so min is 1 here.
        let result = walk(json!({ "s": "" }), json!({ "s": "string" })).unwrap();
        assert_eq!(result.errors.to_value(), json!({ "s": "must be min=1 characters." }));
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = walk(json!({ "a": 1 }), json!({ "a": "number", "b": "number" })).unwrap_err();
        assert_eq!(err, ConfigError::MissingKey { path: "b".into() });

        let err = walk(json!({ "u": {} }), json!({ "u": { "name": "string" } })).unwrap_err();
        assert_eq!(err, ConfigError::MissingKey { path: "u.name".into() });
    }

    #[test]
    fn unknown_rule_is_config_error_even_for_null() {
        let err = walk(json!({ "a": null }), json!({ "a": "slug" })).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownRule {
                path: "a".into(),
                type_ref: "slug".into()
            }
        );
    }

    #[test]
    fn non_object_input_is_config_error() {
        assert_eq!(
            walk(json!([1]), json!({})).unwrap_err(),
            ConfigError::InvalidInput { actual: "array" }
        );
        assert!(matches!(
            walk(json!({ "u": "x" }), json!({ "u": { "a": "string" } })),
            Err(ConfigError::ShapeMismatch { expected: "object", actual: "string", .. })
        ));
    }

    #[test]
    fn rule_param_errors_abort() {
        let err = walk(
            json!({ "s": "abc" }),
            json!({ "s": [{ "type": "string", "params": { "min": 4, "max": 2 } }] }),
        )
        .unwrap_err();
        assert_eq!(err.code(), "RULE_INVALID_PARAM");
    }

    #[test]
    fn scalar_against_descriptor() {
        let schema = json!({
            "title": [{ "type": "string", "params": { "min": 3, "max": 5 } }],
            "note": [{ "type": "string", "required": false }],
            "code": [{ "type": "number", "errorMessage": "code must be numeric" }],
            "must": [{ "type": "number" }],
        });
        let result = walk(
            json!({ "title": "ab", "note": null, "code": "x", "must": null }),
            schema,
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({
                "title": "must be min=3 characters.",
                "note": "success",
                "code": "code must be numeric",
                "must": "is required",
            })
        );
    }

    #[test]
    fn lenient_non_object_elements_are_success() {
        let result = walk(
            json!({ "key": [1, "x", 3] }),
            json!({ "key": [{ "type": "number", "required": true }] }),
        )
        .unwrap();
        assert!(result.valid);
        assert_eq!(result.errors.to_value(), json!({ "key": "success" }));

        let mixed = walk(
            json!({ "key": [null, [1, 2], "x"] }),
            json!({ "key": [{ "type": "number" }] }),
        )
        .unwrap();
        assert!(mixed.valid);
        assert_eq!(mixed.errors.to_value(), json!({ "key": "success" }));
    }

    #[test]
    fn empty_collection_is_empty_sequence() {
        for config in [WalkerConfig::default(), WalkerConfig::strict()] {
            let result =
                walk_with(config, json!({ "key": [] }), json!({ "key": [{ "type": "number" }] }))
                    .unwrap();
            assert!(result.valid);
            assert_eq!(result.errors.get("key"), Some(&ErrorTree::Sequence(Vec::new())));
            assert_eq!(result.errors.to_value(), json!({ "key": [] }));
        }
    }

    #[test]
    fn strict_non_object_elements_are_checked() {
        let result = walk_with(
            WalkerConfig::strict(),
            json!({ "key": [1, "x", null] }),
            json!({ "key": [{ "type": "number" }] }),
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({ "key": ["success", "must be a number", "is required"] })
        );
    }

    #[test]
    fn collection_of_objects() {
        let schema = json!({ "items": [{ "sku": "string", "qty": "number" }] });
        let result = walk(
            json!({ "items": [{ "sku": "A1", "qty": 2 }, { "sku": "", "qty": "two" }, 7] }),
            schema.clone(),
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({
                "items": [
                    { "sku": "success", "qty": "success" },
                    { "sku": "must be min=1 characters.", "qty": "must be a number" },
                    "success",
                ]
            })
        );

        let strict = walk_with(WalkerConfig::strict(), json!({ "items": [7] }), schema.clone())
            .unwrap();
        assert_eq!(strict.errors.to_value(), json!({ "items": ["must be an object"] }));

        let err = walk(json!({ "items": "A1" }), schema).unwrap_err();
        assert!(matches!(err, ConfigError::ShapeMismatch { expected: "array", .. }));
    }

    #[test]
    fn element_paths_reach_missing_keys() {
        let err = walk(
            json!({ "items": [{ "sku": "A" }, { "qty": 1 }] }),
            json!({ "items": [{ "sku": "string" }] }),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingKey { path: "items[1].sku".into() });
    }

    #[test]
    fn object_element_against_descriptor_recurses_on_type_key() {
        let result = walk(
            json!({ "items": [{ "type": "a" }, { "type": 5 }] }),
            json!({ "items": [{ "type": "string" }] }),
        )
        .unwrap();
        assert!(!result.valid);
        assert_eq!(
            result.errors.to_value(),
            json!({ "items": [{ "type": "success" }, { "type": "must be a string" }] })
        );
    }

    #[test]
    fn object_element_against_descriptor_is_config_error() {
        let err = walk(json!({ "key": [{ "a": 1 }] }), json!({ "key": [{ "type": "number" }] }))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingKey { path: "key[0].type".into() });

        let err = walk(
            json!({ "key": [{ "type": 1 }] }),
            json!({ "key": [{ "type": "number", "errorMessage": "bad" }] }),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema { ref path, .. } if path == "key"));

        let err = walk_with(
            WalkerConfig::strict(),
            json!({ "key": [1, { "type": 1 }] }),
            json!({ "key": [{ "type": "number", "required": false }] }),
        )
        .unwrap_err();
        assert_eq!(err.code(), "SCHEMA_INVALID");
    }
}
