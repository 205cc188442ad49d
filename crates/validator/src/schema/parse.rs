//! Parsing schemas from their JSON form.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{ElementSchema, FieldDescriptor, Schema, SchemaNode, TypeRef};
use crate::foundation::{ConfigError, join_key, json_kind};

/// Path reported for errors at the schema root.
const ROOT: &str = "$";

/// Keys a collection field descriptor may carry.
const DESCRIPTOR_KEYS: [&str; 4] = ["type", "required", "params", "errorMessage"];

pub(super) fn schema(value: &Value) -> Result<Schema, ConfigError> {
    match value {
        Value::Object(map) => object(map, ""),
        other => Err(ConfigError::InvalidSchema {
            path: ROOT.into(),
            reason: format!("schema must be an object, got {}", json_kind(other)),
        }),
    }
}

fn object(map: &Map<String, Value>, path: &str) -> Result<Schema, ConfigError> {
    let mut fields = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        let field_path = join_key(path, key);
        fields.insert(key.clone(), node(value, &field_path)?);
    }
    Ok(Schema { fields })
}

fn node(value: &Value, path: &str) -> Result<SchemaNode, ConfigError> {
    match value {
        Value::String(type_ref) => Ok(SchemaNode::TypeRef(TypeRef::new(type_ref.as_str()))),
        Value::Object(map) => Ok(SchemaNode::Nested(object(map, path)?)),
        Value::Array(items) => match items.as_slice() {
            [element] => Ok(SchemaNode::Collection(element_schema(element, path)?)),
            _ => Err(ConfigError::InvalidSchema {
                path: path.into(),
                reason: format!(
                    "collection schema must hold exactly one element, got {}",
                    items.len()
                ),
            }),
        },
        other => Err(ConfigError::InvalidSchema {
            path: path.into(),
            reason: format!(
                "expected a type name, object or single-element array, got {}",
                json_kind(other)
            ),
        }),
    }
}

fn element_schema(value: &Value, path: &str) -> Result<ElementSchema, ConfigError> {
    match value {
        // `["number"]` is shorthand for `[{ "type": "number" }]`.
        Value::String(type_ref) => Ok(ElementSchema::Descriptor(FieldDescriptor::new(
            type_ref.as_str(),
        ))),
        Value::Object(map) if is_descriptor(map) => {
            Ok(ElementSchema::Descriptor(descriptor(map, path)?))
        }
        Value::Object(map) => Ok(ElementSchema::Object(object(map, path)?)),
        other => Err(ConfigError::InvalidSchema {
            path: path.into(),
            reason: format!(
                "collection element must be a type name or an object, got {}",
                json_kind(other)
            ),
        }),
    }
}

/// An object is a descriptor when it has `type` and only descriptor keys.
fn is_descriptor(map: &Map<String, Value>) -> bool {
    map.contains_key("type") && map.keys().all(|key| DESCRIPTOR_KEYS.contains(&key.as_str()))
}

fn descriptor(map: &Map<String, Value>, path: &str) -> Result<FieldDescriptor, ConfigError> {
    let invalid = |field: &'static str, reason: &'static str| ConfigError::InvalidDescriptor {
        path: path.into(),
        field,
        reason,
    };

    let Some(Value::String(type_ref)) = map.get("type") else {
        return Err(invalid("type", "must be a string"));
    };

    let required = match map.get("required") {
        None => true,
        Some(Value::Bool(required)) => *required,
        Some(_) => return Err(invalid("required", "must be a boolean")),
    };

    let params = match map.get("params") {
        None | Some(Value::Null) => None,
        Some(Value::Object(params)) => Some(params.clone()),
        Some(_) => return Err(invalid("params", "must be an object")),
    };

    let error_message = match map.get("errorMessage") {
        None | Some(Value::Null) => None,
        Some(Value::String(message)) => Some(message.clone()),
        Some(_) => return Err(invalid("errorMessage", "must be a string")),
    };

    Ok(FieldDescriptor {
        type_ref: TypeRef::new(type_ref.as_str()),
        required,
        params,
        error_message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_all_node_kinds() {
        let parsed = schema(&json!({
            "name": "string:slug",
            "address": { "zip": "number" },
            "scores": [{ "type": "number", "required": false, "params": { "min": 1 }, "errorMessage": "bad" }],
            "tags": ["string"],
            "items": [{ "sku": "string" }],
        }))
        .unwrap();

        let expected = Schema::new()
            .field("name", "string:slug")
            .field("address", Schema::new().field("zip", "number"))
            .field(
                "scores",
                FieldDescriptor::new("number")
                    .optional()
                    .with_params(json!({ "min": 1 }).as_object().cloned().unwrap())
                    .with_error_message("bad"),
            )
            .field("tags", FieldDescriptor::new("string"))
            .field("items", SchemaNode::list_of(Schema::new().field("sku", "string")));

        assert_eq!(parsed, expected);
    }

    #[test]
    fn object_with_extra_keys_is_element_schema() {
        let parsed = schema(&json!({ "rows": [{ "type": "string", "label": "string" }] })).unwrap();
        assert_eq!(
            parsed.get("rows"),
            Some(&SchemaNode::list_of(
                Schema::new().field("type", "string").field("label", "string")
            ))
        );
    }

    #[test]
    fn root_must_be_object() {
        let err = schema(&json!(["string"])).unwrap_err();
        assert_eq!(err.path(), Some("$"));
    }

    #[test]
    fn invalid_node_shapes() {
        let err = schema(&json!({ "a": { "b": null } })).unwrap_err();
        assert_eq!(err.path(), Some("a.b"));
        assert_eq!(err.code(), "SCHEMA_INVALID");

        let err = schema(&json!({ "a": [] })).unwrap_err();
        assert!(err.to_string().contains("exactly one element"));

        let err = schema(&json!({ "a": ["string", "number"] })).unwrap_err();
        assert!(err.to_string().contains("got 2"));

        let err = schema(&json!({ "a": [5] })).unwrap_err();
        assert_eq!(err.path(), Some("a"));
    }

    #[test]
    fn descriptor_preconditions() {
        let cases = [
            (json!({ "a": [{ "type": 5 }] }), "type"),
            (json!({ "a": [{ "type": "number", "required": "yes" }] }), "required"),
            (json!({ "a": [{ "type": "number", "params": [1] }] }), "params"),
            (json!({ "a": [{ "type": "number", "errorMessage": 3 }] }), "errorMessage"),
        ];
        for (input, field) in cases {
            match schema(&input) {
                Err(ConfigError::InvalidDescriptor { field: got, path, .. }) => {
                    assert_eq!(got, field);
                    assert_eq!(path, "a");
                }
                other => panic!("expected descriptor error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn null_params_and_message_are_absent() {
        let parsed =
            schema(&json!({ "a": [{ "type": "number", "params": null, "errorMessage": null }] }))
                .unwrap();
        assert_eq!(parsed.get("a"), Some(&SchemaNode::from(FieldDescriptor::new("number"))));
    }
}
