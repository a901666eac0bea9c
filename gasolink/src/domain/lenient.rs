//! Deserializers for fields the backend sends as either strings or numbers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a JSON string or number as a trimmed string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Read an optional JSON string or number as `f64`.
///
/// `null`, missing, and unparseable strings all become `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "opt_f64")]
        lat: Option<f64>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn ids_from_strings_and_numbers() {
        assert_eq!(probe(r#"{"id": " 7 "}"#).id, "7");
        assert_eq!(probe(r#"{"id": 7}"#).id, "7");
        assert!(serde_json::from_str::<Probe>(r#"{"id": null}"#).is_err());
    }

    #[test]
    fn coordinates_from_strings_and_numbers() {
        assert_eq!(probe(r#"{"id": 1, "lat": "40,4168"}"#).lat, Some(40.4168));
        assert_eq!(probe(r#"{"id": 1, "lat": -3.7038}"#).lat, Some(-3.7038));
        assert_eq!(probe(r#"{"id": 1, "lat": null}"#).lat, None);
        assert_eq!(probe(r#"{"id": 1, "lat": "unknown"}"#).lat, None);
        assert_eq!(probe(r#"{"id": 1}"#).lat, None);
    }
}
