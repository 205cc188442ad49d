//! Validating an HTTP-style request body against a schema loaded from JSON.
//!
//! Run with `RUST_LOG=shapeguard_validator=trace` to see every leaf verdict.

use serde_json::json;
use shapeguard_validator::{Schema, Validator, WalkerConfig};
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"{
    "customer": {
        "email": "email",
        "name": "string",
        "website": [{ "type": "url", "required": false, "params": { "require_protocol": true } }]
    },
    "delivery": [{ "type": "date", "errorMessage": "delivery must be DD/MM/YYYY" }],
    "gift": "boolean",
    "lines": [{
        "sku": [{ "type": "sku", "errorMessage": "unknown SKU format" }],
        "quantity": "number",
        "note": [{ "type": "string", "required": false, "params": { "max": 40 } }]
    }]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let body = json!({
        "customer": {
            "email": "ada@example",
            "name": "Ada",
            "website": null
        },
        "delivery": "31/06/2025",
        "gift": false,
        "lines": [
            { "sku": "AB-1234", "quantity": 2, "note": null },
            { "sku": "banana", "quantity": "two", "note": "leave at the door, ring twice, then wait" }
        ]
    });

    let schema = Schema::from_json_str(SCHEMA)?;
    let config: WalkerConfig = serde_json::from_value(json!({ "element_policy": "strict" }))?;

    let mut validator = Validator::from_schema(body, schema).with_config(config);
    validator.extend(
        "sku",
        |value, _| {
            value.as_str().is_some_and(|sku| {
                sku.split_once('-').is_some_and(|(prefix, digits)| {
                    prefix.len() == 2
                        && prefix.chars().all(|c| c.is_ascii_uppercase())
                        && digits.len() == 4
                        && digits.chars().all(|c| c.is_ascii_digit())
                })
            })
        },
        None,
    )?;

    let valid = validator.validate()?;
    println!("valid: {valid}");

    if let Some(errors) = validator.errors() {
        println!("{}", serde_json::to_string_pretty(errors)?);
        for (path, message) in errors.failures() {
            println!("  {path}: {message}");
        }
    }

    Ok(())
}
