//! crates/sr_io/src/schema.rs
//! Embedded JSON Schema (draft-07) for the report input, and the validator.
//!
//! The schema only checks shape. Cross-record rules (unique cluster ids,
//! finite weights) live in `loader::check_structure`.

use serde_json::Value;

use crate::IoError;

pub const REPORT_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "scatter report input",
  "type": "object",
  "required": ["config", "clusters"],
  "properties": {
    "config": {
      "type": "object",
      "required": ["name", "question"],
      "properties": {
        "name": { "type": "string" },
        "question": { "type": "string" },
        "intro": { "type": ["string", "null"] },
        "translation": {
          "type": "object",
          "properties": {
            "languages": { "type": "array", "items": { "type": "string" } }
          }
        }
      }
    },
    "overview": { "type": "string" },
    "clusters": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["cluster", "cluster_id", "arguments"],
        "properties": {
          "cluster": { "type": "string" },
          "cluster_id": { "type": "string", "minLength": 1 },
          "takeaways": { "type": "string" },
          "arguments": {
            "type": "array",
            "items": {
              "type": "object",
              "required": ["argument", "p"],
              "properties": {
                "arg_id": { "type": "string" },
                "argument": { "type": "string" },
                "comment_id": { "type": ["string", "null"] },
                "x": { "type": "number" },
                "y": { "type": "number" },
                "p": { "type": "number" }
              }
            }
          }
        }
      }
    },
    "translations": {
      "type": "object",
      "additionalProperties": {
        "anyOf": [
          { "type": "string" },
          { "type": "array", "items": { "type": "string" } }
        ]
      }
    }
  }
}"##;

/// Validate a parsed report against `REPORT_SCHEMA`. Reports the first failure.
#[cfg(feature = "schemaval")]
pub fn validate_report_value(instance: &Value) -> Result<(), IoError> {
    use jsonschema::{Draft, JSONSchema};

    let schema: Value = serde_json::from_str(REPORT_SCHEMA)?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| IoError::Schema { pointer: e.schema_path.to_string(), msg: e.to_string() })?;

    let first = match compiled.validate(instance) {
        Ok(()) => None,
        Err(mut errors) => errors
            .next()
            .map(|e| (e.instance_path.to_string(), e.to_string())),
    };
    match first {
        None => Ok(()),
        Some((pointer, msg)) => Err(IoError::Schema {
            pointer: if pointer.is_empty() { "/".into() } else { pointer },
            msg,
        }),
    }
}

#[cfg(not(feature = "schemaval"))]
pub fn validate_report_value(_instance: &Value) -> Result<(), IoError> {
    Ok(())
}

#[cfg(all(test, feature = "schemaval"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_minimal_report() {
        let v = json!({
            "config": {"name": "n", "question": "q"},
            "clusters": []
        });
        assert!(validate_report_value(&v).is_ok());
    }

    #[test]
    fn rejects_non_numeric_weight_with_pointer() {
        let v = json!({
            "config": {"name": "n", "question": "q"},
            "clusters": [{"cluster": "c", "cluster_id": "0",
                          "arguments": [{"argument": "a", "p": "high"}]}]
        });
        match validate_report_value(&v) {
            Err(IoError::Schema { pointer, .. }) => assert_eq!(pointer, "/clusters/0/arguments/0/p"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn translations_accept_string_or_columns() {
        let v = json!({
            "config": {"name": "n", "question": "q"},
            "clusters": [],
            "translations": {"a": "b", "c": ["d", "e"]}
        });
        assert!(validate_report_value(&v).is_ok());
        let bad = json!({
            "config": {"name": "n", "question": "q"},
            "clusters": [],
            "translations": {"a": 3}
        });
        assert!(validate_report_value(&bad).is_err());
    }
}
