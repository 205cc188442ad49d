//! Schema model
//!
//! A schema is an ordered map from field name to [`SchemaNode`]. Each node is
//! one of three kinds:
//!
//! - [`SchemaNode::TypeRef`]: a rule name, optionally with a `:suffix`
//!   (`"email"`, `"string:slug"`);
//! - [`SchemaNode::Nested`]: a sub-schema for an embedded object;
//! - [`SchemaNode::Collection`]: a homogeneous list, described either by a
//!   [`FieldDescriptor`] or by an element [`Schema`].
//!
//! Schemas are usually parsed from JSON ([`Schema::from_value`]) but can be
//! built in code:
//!
//! ```
//! use shapeguard_validator::schema::{FieldDescriptor, Schema, SchemaNode};
//! use serde_json::json;
//!
//! let built = Schema::new()
//!     .field("email", "email")
//!     .field("address", Schema::new().field("city", "string"))
//!     .field("tags", FieldDescriptor::new("string").optional())
//!     .field("items", SchemaNode::list_of(Schema::new().field("sku", "string")));
//!
//! let parsed = Schema::from_value(&json!({
//!     "email": "email",
//!     "address": { "city": "string" },
//!     "tags": [{ "type": "string", "required": false }],
//!     "items": [{ "sku": "string" }],
//! }))
//! .unwrap();
//!
//! assert_eq!(built, parsed);
//! ```

mod parse;

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::foundation::ConfigError;

// ============================================================================
// TYPE REFERENCE
// ============================================================================

/// A rule name with an optional `:suffix`.
///
/// The suffix is reserved: it is carried to the rule through
/// [`RuleOptions::suffix`](crate::foundation::RuleOptions::suffix) but no
/// built-in rule reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(String);

impl TypeRef {
    /// Wraps a type string.
    pub fn new(type_ref: impl Into<String>) -> Self {
        Self(type_ref.into())
    }

    /// The full string, suffix included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The rule name: everything before the first `:`.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(name, _)| name)
    }

    /// Everything after the first `:`, if present.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, suffix)| suffix)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// Scalar description of a collection field: rule, requiredness, rule
/// params and an optional literal failure message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    type_ref: TypeRef,
    required: bool,
    params: Option<Map<String, Value>>,
    error_message: Option<String>,
}

impl FieldDescriptor {
    /// A required field checked by `type_ref`, with no params.
    pub fn new(type_ref: impl Into<TypeRef>) -> Self {
        Self {
            type_ref: type_ref.into(),
            required: true,
            params: None,
            error_message: None,
        }
    }

    /// Allows `null`: a null value passes without running the rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets whether `null` is rejected.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the params handed to the rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Replaces the rule's failure message with a fixed one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// The rule reference.
    #[must_use]
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Whether `null` is rejected with `"is required"`.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Rule params, if any.
    #[must_use]
    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.params.as_ref()
    }

    /// Literal failure message override, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

// ============================================================================
// NODES
// ============================================================================

/// What each element of a collection must look like.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSchema {
    /// Elements are scalars checked by a rule.
    Descriptor(FieldDescriptor),
    /// Elements are objects checked against a sub-schema.
    Object(Schema),
}

impl From<FieldDescriptor> for ElementSchema {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<Schema> for ElementSchema {
    fn from(schema: Schema) -> Self {
        Self::Object(schema)
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A leaf checked by the named rule.
    TypeRef(TypeRef),
    /// A homogeneous list.
    Collection(ElementSchema),
    /// An embedded object.
    Nested(Schema),
}

impl SchemaNode {
    /// A collection whose elements are described by `element`.
    pub fn list_of(element: impl Into<ElementSchema>) -> Self {
        Self::Collection(element.into())
    }
}

impl From<&str> for SchemaNode {
    fn from(value: &str) -> Self {
        Self::TypeRef(TypeRef::new(value))
    }
}

impl From<String> for SchemaNode {
    fn from(value: String) -> Self {
        Self::TypeRef(TypeRef(value))
    }
}

impl From<TypeRef> for SchemaNode {
    fn from(value: TypeRef) -> Self {
        Self::TypeRef(value)
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        Self::Nested(schema)
    }
}

impl From<FieldDescriptor> for SchemaNode {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Collection(ElementSchema::Descriptor(descriptor))
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// An object schema: field names mapped to nodes, in declaration order.
///
/// Deserializes from the JSON schema form, so it can be embedded in host
/// configuration files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Schema {
    fields: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// An empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Adds or replaces a field in place.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<SchemaNode>) {
        self.fields.insert(name.into(), node.into());
    }

    /// Parses the JSON form of a schema.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        parse::schema(value)
    }

    /// Parses a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Looks up a field's node.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for Schema {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl TryFrom<&Value> for Schema {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_ref_parts() {
        let plain = TypeRef::new("email");
        assert_eq!(plain.rule_name(), "email");
        assert_eq!(plain.suffix(), None);

        let suffixed = TypeRef::new("string:slug");
        assert_eq!(suffixed.rule_name(), "string");
        assert_eq!(suffixed.suffix(), Some("slug"));
        assert_eq!(suffixed.to_string(), "string:slug");
    }

    #[test]
    fn descriptor_builder_defaults() {
        let descriptor = FieldDescriptor::new("number");
        assert!(descriptor.required());
        assert_eq!(descriptor.params(), None);
        assert_eq!(descriptor.error_message(), None);

        let params = json!({ "min": 2 }).as_object().cloned().unwrap();
        let descriptor = descriptor
            .optional()
            .with_params(params.clone())
            .with_error_message("bad");
        assert!(!descriptor.required());
        assert_eq!(descriptor.params(), Some(&params));
        assert_eq!(descriptor.error_message(), Some("bad"));
    }

    #[test]
    fn fields_keep_declaration_order() {
        let schema = Schema::new().field("b", "string").field("a", "number");
        let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("a"), Some(&SchemaNode::from("number")));
    }

    #[test]
    fn deserializes_through_serde() {
        let schema: Schema = serde_json::from_value(json!({ "name": "string" })).unwrap();
        assert_eq!(schema, Schema::new().field("name", "string"));

        let err = serde_json::from_value::<Schema>(json!({ "name": 5 })).unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
