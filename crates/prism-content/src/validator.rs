//! JSON Schema validation for content payloads
//!
//! Wraps the `jsonschema` crate with the configuration the content store
//! needs: draft 2020-12, format assertions on, and a nesting-depth
//! pre-check so adversarial payloads fail cheaply before schema
//! evaluation runs.

use crate::error::{ContentError, ContentResult, Violation};
use serde_json::Value;

/// Maximum nesting depth accepted in a content payload.
const MAX_DEPTH: usize = 128;

/// Compiled validator for one content definition's schema.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a validator from a definition's JSON Schema.
    ///
    /// Fails with [`ContentError::InvalidSchema`] when the schema itself is
    /// not a valid JSON Schema.
    pub fn new(block: &str, schema: &Value) -> ContentResult<Self> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| ContentError::invalid_schema(block, e.to_string()))?;

        Ok(Self { validator })
    }

    /// Validate a payload against the schema.
    ///
    /// All violations are collected and returned together so callers can
    /// report every offending field in one round trip. A failed validation
    /// means nothing gets written.
    pub fn validate(&self, block: &str, payload: &Value) -> ContentResult<()> {
        check_depth(block, payload)?;

        let violations: Vec<Violation> = self
            .validator
            .iter_errors(payload)
            .map(|err| Violation::new(err.instance_path.to_string(), err.to_string()))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContentError::validation(block, violations))
        }
    }
}

/// Reject payloads nested deeper than [`MAX_DEPTH`] levels.
fn check_depth(block: &str, payload: &Value) -> ContentResult<()> {
    fn depth_of(value: &Value) -> usize {
        match value {
            Value::Object(map) => 1 + map.values().map(depth_of).max().unwrap_or(0),
            Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
            _ => 0,
        }
    }

    if depth_of(payload) > MAX_DEPTH {
        return Err(ContentError::validation(
            block,
            vec![Violation::new(
                "",
                format!("payload exceeds maximum nesting depth of {MAX_DEPTH}"),
            )],
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn guest_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "phone_number": {"type": "string"},
                "passPhrase": {"type": "string"}
            },
            "required": ["name", "phone_number", "passPhrase"],
            "additionalProperties": false
        })
    }

    #[test]
    fn test_valid_payload_passes() {
        let validator = SchemaValidator::new("Guest", &guest_schema()).unwrap();
        let payload = json!({"name": "A", "phone_number": "555", "passPhrase": "x"});
        assert!(validator.validate("Guest", &payload).is_ok());
    }

    #[test]
    fn test_missing_required_fields_collected() {
        let validator = SchemaValidator::new("Guest", &guest_schema()).unwrap();
        let err = validator.validate("Guest", &json!({"name": "A"})).unwrap_err();
        // Both missing fields are reported, not just the first.
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let validator = SchemaValidator::new("Guest", &guest_schema()).unwrap();
        let payload = json!({
            "name": "A", "phone_number": "555", "passPhrase": "x",
            "extra": true
        });
        let err = validator.validate("Guest", &payload).unwrap_err();
        assert!(!err.violations().is_empty());
    }

    #[test]
    fn test_violation_carries_instance_path() {
        let validator = SchemaValidator::new("Guest", &guest_schema()).unwrap();
        let payload = json!({"name": 7, "phone_number": "555", "passPhrase": "x"});
        let err = validator.validate("Guest", &payload).unwrap_err();
        assert!(err.violations().iter().any(|v| v.path == "/name"));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let bad = json!({"type": "not-a-type"});
        let err = SchemaValidator::new("Guest", &bad).unwrap_err();
        assert!(matches!(err, ContentError::InvalidSchema { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let validator = SchemaValidator::new("Deep", &json!({"type": "object"})).unwrap();
        let mut payload = json!({});
        for _ in 0..200 {
            payload = json!({"next": payload});
        }
        let err = validator.validate("Deep", &payload).unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.message.contains("nesting depth")));
    }
}
