//! The fixed itinerary schema.
//!
//! One table drives the prompt text, the key-set check in the validator and
//! the JSON Schema handed to providers that accept one.

use crate::error::ExpectedShape;
use serde_json::{json, Map, Value};

/// A required itinerary key and the shape its value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: ExpectedShape,
}

/// Every key an itinerary object must have, in validation order.
pub const ITINERARY_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "destination",
        shape: ExpectedShape::Text,
    },
    FieldSpec {
        name: "price_range",
        shape: ExpectedShape::Text,
    },
    FieldSpec {
        name: "ideal_visit_times",
        shape: ExpectedShape::SequenceOfText,
    },
    FieldSpec {
        name: "top_attractions",
        shape: ExpectedShape::SequenceOfText,
    },
];

impl ExpectedShape {
    /// TypeScript-like notation used in the system prompt
    pub fn prompt_notation(&self) -> &'static str {
        match self {
            ExpectedShape::Text => "string",
            ExpectedShape::SequenceOfText => "string[]",
        }
    }

    /// JSON Schema fragment for this shape
    pub fn json_schema(&self) -> Value {
        match self {
            ExpectedShape::Text => json!({ "type": "string" }),
            ExpectedShape::SequenceOfText => json!({
                "type": "array",
                "items": { "type": "string" }
            }),
        }
    }
}

/// Check whether `key` is one of the required itinerary keys.
pub fn is_required_key(key: &str) -> bool {
    ITINERARY_FIELDS.iter().any(|f| f.name == key)
}

/// JSON Schema describing an itinerary object.
///
/// All keys are required and no others are allowed.
pub fn itinerary_json_schema() -> Value {
    let properties: Map<String, Value> = ITINERARY_FIELDS
        .iter()
        .map(|f| (f.name.to_string(), f.shape.json_schema()))
        .collect();
    let required: Vec<&str> = ITINERARY_FIELDS.iter().map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_requires_every_field() {
        let schema = itinerary_json_schema();

        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(
            schema["required"],
            json!(["destination", "price_range", "ideal_visit_times", "top_attractions"])
        );
        assert_eq!(
            schema["properties"]["top_attractions"]["items"]["type"],
            json!("string")
        );
        assert_eq!(schema["properties"]["price_range"]["type"], json!("string"));
    }

    #[test]
    fn test_is_required_key() {
        assert!(is_required_key("ideal_visit_times"));
        assert!(!is_required_key("budget"));
        assert!(!is_required_key("Destination"));
    }

    #[cfg(feature = "schema")]
    #[test]
    fn test_derived_schema_matches_field_table() {
        let derived = serde_json::to_value(schemars::schema_for!(crate::types::Itinerary)).unwrap();
        for field in ITINERARY_FIELDS {
            assert!(derived["properties"].get(field.name).is_some());
        }
    }
}
