use serde_json::Value;

use super::dto::NutritionEstimate;
use crate::error::AnalysisError;

const FALLBACK_NAME: &str = "Unidentified food item";
const FALLBACK_DESCRIPTION: &str = "Analysis complete";

/// Turn a raw model reply into a normalized estimate.
///
/// Generative replies are not guaranteed well-formed, so this is tolerant:
/// the JSON object may be wrapped in prose, and individual fields may be
/// missing or of the wrong type. Once a JSON object parses, normalization
/// always succeeds.
pub fn parse_model_reply(content: Option<&str>) -> Result<NutritionEstimate, AnalysisError> {
    let text = match content {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AnalysisError::EmptyResponse),
    };

    let region = extract_json_region(text).ok_or(AnalysisError::MalformedResponse)?;
    let value: Value =
        serde_json::from_str(region).map_err(|_| AnalysisError::MalformedResponse)?;

    Ok(normalize(&value))
}

/// The outermost `{...}` span: first `{` through last `}`. A stray brace in
/// surrounding prose makes the span unparsable and the reply is rejected as
/// malformed, which is the documented contract.
fn extract_json_region(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn normalize(value: &Value) -> NutritionEstimate {
    NutritionEstimate {
        name: string_field(value, "name", FALLBACK_NAME),
        calories: int_field(value, "calories"),
        protein: int_field(value, "protein"),
        carbs: int_field(value, "carbs"),
        fat: int_field(value, "fat"),
        description: string_field(value, "description", FALLBACK_DESCRIPTION),
    }
}

fn string_field(value: &Value, key: &str, fallback: &str) -> String {
    match value.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

/// Integer coercion with a 0 default on failure. Numbers truncate toward
/// zero; strings contribute their leading signed-digit prefix, matching how
/// the web original coerced these fields.
fn int_field(value: &Value, key: &str) -> i64 {
    match value.get(key) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
            }
        }
        Some(Value::String(s)) => leading_int(s),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .last();
    match end {
        Some(end) => digits[..end].parse::<i64>().map(|v| sign * v).unwrap_or(0),
        None => 0,
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn extracts_object_wrapped_in_prose() {
        let reply = concat!(
            "Sure! Here is the nutritional breakdown you asked for:\n",
            r#"{"name":"Grilled salmon","calories":412,"protein":38,"carbs":2,"fat":28,"#,
            r#""description":"A grilled salmon fillet with herbs."}"#,
            "\nLet me know if you need anything else."
        );
        let estimate = parse_model_reply(Some(reply)).unwrap();
        assert_eq!(estimate.name, "Grilled salmon");
        assert_eq!(estimate.calories, 412);
        assert_eq!(estimate.protein, 38);
        assert_eq!(estimate.carbs, 2);
        assert_eq!(estimate.fat, 28);
        assert_eq!(estimate.description, "A grilled salmon fillet with herbs.");
    }

    #[test]
    fn empty_reply_is_empty_response() {
        assert!(matches!(
            parse_model_reply(None),
            Err(AnalysisError::EmptyResponse)
        ));
        assert!(matches!(
            parse_model_reply(Some("")),
            Err(AnalysisError::EmptyResponse)
        ));
    }

    #[test]
    fn reply_without_object_is_malformed() {
        assert!(matches!(
            parse_model_reply(Some("I cannot see any food in this image.")),
            Err(AnalysisError::MalformedResponse)
        ));
        // Closing brace before the opening one.
        assert!(matches!(
            parse_model_reply(Some("} nonsense {")),
            Err(AnalysisError::MalformedResponse)
        ));
    }

    #[test]
    fn unparsable_region_is_malformed() {
        assert!(matches!(
            parse_model_reply(Some("{name: Soup, calories: lots}")),
            Err(AnalysisError::MalformedResponse)
        ));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let estimate = parse_model_reply(Some(r#"{"name":"Soup"}"#)).unwrap();
        assert_eq!(estimate.name, "Soup");
        assert_eq!(estimate.calories, 0);
        assert_eq!(estimate.protein, 0);
        assert_eq!(estimate.carbs, 0);
        assert_eq!(estimate.fat, 0);
        assert_eq!(estimate.description, "Analysis complete");
    }

    #[test]
    fn non_numeric_field_defaults_to_zero() {
        let estimate =
            parse_model_reply(Some(r#"{"name":"Cake","calories":"lots","fat":true}"#)).unwrap();
        assert_eq!(estimate.calories, 0);
        assert_eq!(estimate.fat, 0);
    }

    #[test]
    fn numeric_strings_and_fractions_coerce_like_parse_int() {
        let estimate = parse_model_reply(Some(
            r#"{"calories":"250 kcal","protein":31.9,"carbs":"-3","fat":"+4"}"#,
        ))
        .unwrap();
        assert_eq!(estimate.calories, 250);
        assert_eq!(estimate.protein, 31);
        assert_eq!(estimate.carbs, -3);
        assert_eq!(estimate.fat, 4);
        assert_eq!(estimate.name, "Unidentified food item");
    }

    #[test]
    fn normalized_output_reparses_identically() {
        let first = parse_model_reply(Some(
            r#"{"name":"Caesar salad","calories":320,"protein":12,"carbs":14,"fat":24,"description":"A bowl of Caesar salad."}"#,
        ))
        .unwrap();
        let reserialized = serde_json::to_string(&first).unwrap();
        let second = parse_model_reply(Some(&reserialized)).unwrap();
        assert_eq!(first, second);
    }
}
