//! Response validation.
//!
//! Turns untrusted model output into an [`Itinerary`] or a categorized error.
//! The stages run in a fixed order and each one fails with its own category:
//!
//! 1. parse → [`AiError::MalformedResponse`]
//! 2. top-level object check → [`AiError::MalformedResponse`]
//! 3. exact key set → [`AiError::SchemaViolation`]
//! 4. per-field types → [`AiError::TypeViolation`]

use crate::error::{AiError, ExpectedShape};
use crate::schema::{is_required_key, ITINERARY_FIELDS};
use crate::types::Itinerary;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Validate raw response text as an itinerary.
///
/// Leading and trailing whitespace is ignored. On a parse or shape failure the
/// error carries `raw` exactly as it was passed in.
pub fn validate(raw: &str) -> Result<Itinerary, AiError> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| AiError::malformed(raw, e.to_string()))?;

    match value {
        Value::Object(fields) => validate_object(fields),
        other => Err(AiError::malformed(raw, not_an_object(&other))),
    }
}

/// Validate an already parsed JSON value as an itinerary.
pub fn validate_value(value: Value) -> Result<Itinerary, AiError> {
    match value {
        Value::Object(fields) => validate_object(fields),
        other => Err(AiError::malformed(other.to_string(), not_an_object(&other))),
    }
}

fn validate_object(mut fields: Map<String, Value>) -> Result<Itinerary, AiError> {
    check_key_set(&fields)?;

    Ok(Itinerary {
        destination: take_text(&mut fields, "destination")?,
        price_range: take_text(&mut fields, "price_range")?,
        ideal_visit_times: take_text_sequence(&mut fields, "ideal_visit_times")?,
        top_attractions: take_text_sequence(&mut fields, "top_attractions")?,
    })
}

fn check_key_set(fields: &Map<String, Value>) -> Result<(), AiError> {
    let missing: BTreeSet<String> = ITINERARY_FIELDS
        .iter()
        .filter(|f| !fields.contains_key(f.name))
        .map(|f| f.name.to_string())
        .collect();
    let extra: BTreeSet<String> = fields
        .keys()
        .filter(|k| !is_required_key(k))
        .cloned()
        .collect();

    if missing.is_empty() && extra.is_empty() {
        Ok(())
    } else {
        Err(AiError::SchemaViolation { missing, extra })
    }
}

fn take_text(fields: &mut Map<String, Value>, name: &str) -> Result<String, AiError> {
    match fields.remove(name) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(AiError::type_violation(name, ExpectedShape::Text)),
    }
}

fn take_text_sequence(fields: &mut Map<String, Value>, name: &str) -> Result<Vec<String>, AiError> {
    let violation = || AiError::type_violation(name, ExpectedShape::SequenceOfText);

    match fields.remove(name) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(violation()),
            })
            .collect(),
        _ => Err(violation()),
    }
}

fn not_an_object(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("expected a JSON object, found {kind}")
}

impl FromStr for Itinerary {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl<'de> Deserialize<'de> for Itinerary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        validate_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn well_formed() -> Value {
        json!({
            "destination": "Paris",
            "price_range": "$$",
            "ideal_visit_times": ["Spring", "Fall"],
            "top_attractions": ["Eiffel Tower", "Louvre"]
        })
    }

    #[test]
    fn test_valid_itinerary() {
        let raw = r#"{"destination":"Paris","price_range":"$$","ideal_visit_times":["Spring","Fall"],"top_attractions":["Eiffel Tower","Louvre"]}"#;

        let itinerary = validate(raw).unwrap();

        assert_eq!(itinerary.destination, "Paris");
        assert_eq!(itinerary.price_range, "$$");
        assert_eq!(itinerary.ideal_visit_times, vec!["Spring", "Fall"]);
        assert_eq!(itinerary.top_attractions, vec!["Eiffel Tower", "Louvre"]);
    }

    #[test]
    fn test_array_order_is_preserved() {
        let raw = r#"{
            "top_attractions": ["Zoo", "Aquarium", "Botanic Garden"],
            "ideal_visit_times": ["October", "April", "January"],
            "price_range": "moderate",
            "destination": "Singapore"
        }"#;

        let itinerary = validate(raw).unwrap();

        assert_eq!(itinerary.ideal_visit_times, vec!["October", "April", "January"]);
        assert_eq!(
            itinerary.top_attractions,
            vec!["Zoo", "Aquarium", "Botanic Garden"]
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let raw = format!("\n\t  {}  \n", well_formed());
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_empty_arrays_and_strings_are_accepted() {
        let raw = r#"{"destination":"","price_range":"","ideal_visit_times":[],"top_attractions":[]}"#;

        let itinerary = validate(raw).unwrap();

        assert!(itinerary.destination.is_empty());
        assert!(itinerary.ideal_visit_times.is_empty());
    }

    #[test]
    fn test_not_json_carries_raw_text() {
        let err = validate("not json at all").unwrap_err();

        match err {
            AiError::MalformedResponse { raw, .. } => assert_eq!(raw, "not json at all"),
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_is_always_malformed() {
        let inputs = [
            "",
            "   ",
            "{",
            "```json\n{\"destination\": \"Paris\"}\n```",
            "Sure! Here is your itinerary: {}",
            r#"{"destination": "Paris",}"#,
            r#"{"destination": "Paris"} trailing"#,
            "{'destination': 'Paris'}",
        ];

        for input in inputs {
            let err = validate(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponse, "input: {input:?}");
        }
    }

    #[test]
    fn test_non_object_json_is_malformed() {
        for input in [r#"["Paris"]"#, r#""Paris""#, "42", "true", "null"] {
            match validate(input).unwrap_err() {
                AiError::MalformedResponse { raw, reason } => {
                    assert_eq!(raw, input);
                    assert!(reason.starts_with("expected a JSON object"), "{reason}");
                }
                other => panic!("Expected MalformedResponse for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_only_destination_reports_other_keys_missing() {
        match validate(r#"{"destination": "Kyoto"}"#).unwrap_err() {
            AiError::SchemaViolation { missing, extra } => {
                assert_eq!(
                    missing,
                    set(&["price_range", "ideal_visit_times", "top_attractions"])
                );
                assert!(extra.is_empty());
            }
            other => panic!("Expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_extra_keys_are_both_reported() {
        let raw = r#"{
            "destination": "Rome",
            "price_range": "$$$",
            "ideal_visit_times": ["May"],
            "attractions": ["Colosseum"],
            "notes": "bring water"
        }"#;

        match validate(raw).unwrap_err() {
            AiError::SchemaViolation { missing, extra } => {
                assert_eq!(missing, set(&["top_attractions"]));
                assert_eq!(extra, set(&["attractions", "notes"]));
            }
            other => panic!("Expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object_reports_all_keys_missing() {
        match validate("{}").unwrap_err() {
            AiError::SchemaViolation { missing, extra } => {
                assert_eq!(missing.len(), 4);
                assert!(extra.is_empty());
            }
            other => panic!("Expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_key_set_is_checked_before_types() {
        // price_range is mistyped, but the extra key is reported first
        let mut value = well_formed();
        value["price_range"] = json!(3);
        value["rating"] = json!(5);

        assert_eq!(
            validate_value(value).unwrap_err().kind(),
            ErrorKind::SchemaViolation
        );
    }

    #[test]
    fn test_ideal_visit_times_as_string() {
        let raw = r#"{"destination":"Paris","price_range":"$$","ideal_visit_times":"Spring","top_attractions":["Eiffel Tower"]}"#;

        match validate(raw).unwrap_err() {
            AiError::TypeViolation { field, expected } => {
                assert_eq!(field, "ideal_visit_times");
                assert_eq!(expected, ExpectedShape::SequenceOfText);
            }
            other => panic!("Expected TypeViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_each_mistyped_field_is_named() {
        let cases = [
            ("destination", json!(null), ExpectedShape::Text),
            ("destination", json!(["Paris"]), ExpectedShape::Text),
            ("price_range", json!(2), ExpectedShape::Text),
            ("price_range", json!({"min": 1}), ExpectedShape::Text),
            ("ideal_visit_times", json!(["Spring", 4]), ExpectedShape::SequenceOfText),
            ("ideal_visit_times", json!([["Spring"]]), ExpectedShape::SequenceOfText),
            ("top_attractions", json!("Louvre"), ExpectedShape::SequenceOfText),
            ("top_attractions", json!([null]), ExpectedShape::SequenceOfText),
        ];

        for (name, bad, shape) in cases {
            let mut value = well_formed();
            value[name] = bad.clone();

            match validate_value(value).unwrap_err() {
                AiError::TypeViolation { field, expected } => {
                    assert_eq!(field, name, "bad value: {bad}");
                    assert_eq!(expected, shape);
                }
                other => panic!("Expected TypeViolation for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_mistyped_field_in_order_is_reported() {
        let mut value = well_formed();
        value["top_attractions"] = json!(1);
        value["price_range"] = json!(1);

        match validate_value(value).unwrap_err() {
            AiError::TypeViolation { field, .. } => assert_eq!(field, "price_range"),
            other => panic!("Expected TypeViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_value_non_object_renders_raw() {
        match validate_value(json!(["Paris"])).unwrap_err() {
            AiError::MalformedResponse { raw, .. } => assert_eq!(raw, r#"["Paris"]"#),
            other => panic!("Expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str_and_serialize() {
        let itinerary: Itinerary = well_formed().to_string().parse().unwrap();

        assert_eq!(serde_json::to_value(&itinerary).unwrap(), well_formed());
    }

    #[test]
    fn test_out_of_range_number_is_a_type_violation() {
        let raw = r#"{"destination":"P","price_range":1e400,"ideal_visit_times":[],"top_attractions":[]}"#;

        match validate(raw).unwrap_err() {
            AiError::TypeViolation { field, expected } => {
                assert_eq!(field, "price_range");
                assert_eq!(expected, ExpectedShape::Text);
            }
            other => panic!("Expected TypeViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_lone_surrogate_is_malformed() {
        let raw = r#"{"destination":"\ud800","price_range":"$","ideal_visit_times":[],"top_attractions":[]}"#;
        assert_eq!(validate(raw).unwrap_err().kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_deserialize_enforces_key_set() {
        let raw = r#"{"destination":"Paris","price_range":"$$","ideal_visit_times":[],"top_attractions":[],"rating":5}"#;

        let err = serde_json::from_str::<Itinerary>(raw).unwrap_err();
        assert!(err.to_string().contains("Extra={\"rating\"}"), "{err}");
    }

    #[test]
    fn test_deserialize_accepts_valid_itinerary() {
        let itinerary: Itinerary = serde_json::from_value(well_formed()).unwrap();
        assert_eq!(itinerary, validate_value(well_formed()).unwrap());
    }
}
