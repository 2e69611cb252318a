//! Pulls a JSON object out of free-form model output.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Finds the JSON object in a model reply.
///
/// Takes the span from the first `{` to the last `}` and parses it; failing
/// that, parses the whole text. Anything unparseable yields an empty object,
/// never an error.
#[must_use]
pub fn extract_json(text: &str) -> Value {
    let span = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => Some(&text[start..=end]),
        _ => None,
    };

    if let Some(span) = span {
        match serde_json::from_str(span) {
            Ok(value) => return value,
            Err(e) => debug!(error = %e, "Braced span is not valid JSON"),
        }
    }

    serde_json::from_str(text.trim()).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// [`extract_json`] followed by a lenient conversion into `T`.
///
/// Falls back to `T::default()` if the extracted value does not fit.
#[must_use]
pub fn extract_as<T: DeserializeOwned + Default>(text: &str) -> T {
    serde_json::from_value(extract_json(text)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_inside_prose() {
        let text = r#"Here you go: {"notes":"x","items":[1,2]} enjoy"#;
        assert_eq!(extract_json(text), json!({"notes": "x", "items": [1, 2]}));
    }

    #[test]
    fn test_code_fenced_reply() {
        let text = "```json\n{\"color\": \"red\"}\n```";
        assert_eq!(extract_json(text), json!({"color": "red"}));
    }

    #[test]
    fn test_no_braces_is_empty_object() {
        assert_eq!(extract_json("no json here"), json!({}));
        assert_eq!(extract_json(""), json!({}));
    }

    #[test]
    fn test_bare_json_without_braces_still_parses() {
        assert_eq!(extract_json(" [1, 2] "), json!([1, 2]));
    }

    #[test]
    fn test_greedy_span_across_two_objects_fails_soft() {
        // First '{' to last '}' covers both objects, which is not valid JSON
        assert_eq!(extract_json(r#"{"a":1} and {"b":2}"#), json!({}));
    }

    #[test]
    fn test_reversed_braces() {
        assert_eq!(extract_json("} oops {"), json!({}));
    }

    #[test]
    fn test_extract_as_defaults_on_mismatch() {
        #[derive(Debug, Default, PartialEq, serde::Deserialize)]
        struct Shape {
            count: u32,
        }
        assert_eq!(extract_as::<Shape>(r#"{"count":"many"}"#), Shape::default());
        assert_eq!(extract_as::<Shape>(r#"ok {"count":3}"#), Shape { count: 3 });
    }
}
