//! Tolerant field deserializers for form-originated JSON.
//!
//! Browser forms post select values and number inputs as strings, and send
//! untouched inputs as `""`. These helpers accept either a JSON number or a
//! numeric string, and treat `null` and blank strings as absent so the
//! required-field checks report them as missing.
//!
//! Use with `#[serde(default, deserialize_with = "...")]`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

fn non_blank(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// Integer given as a number or a numeric string.
pub fn optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match non_blank(Option::<Value>::deserialize(deserializer)?) {
        Some(v) => v,
        None => return Ok(None),
    };

    let parsed = match &value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", value)))
}

/// Decimal amount given as a number or a numeric string. A decimal comma
/// (`"12,50"`) is accepted.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match non_blank(Option::<Value>::deserialize(deserializer)?) {
        Some(v) => v,
        None => return Ok(None),
    };

    let text = match &value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', "."),
        _ => String::new(),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| D::Error::custom(format!("expected a decimal number, got {}", value)))
}

/// String with blanks treated as absent. Surrounding whitespace is trimmed.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_blank(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected a string, got {}", other))),
    }
}

/// Calendar date as `YYYY-MM-DD`; a full timestamp is truncated to its date.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_blank(Option::<Value>::deserialize(deserializer)?) {
        None => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            let date_part = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a date (YYYY-MM-DD), got \"{}\"", s)))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a date (YYYY-MM-DD), got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "optional_i32")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "optional_decimal")]
        amount: Option<Decimal>,
        #[serde(default, deserialize_with = "optional_string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "optional_date")]
        day: Option<NaiveDate>,
    }

    fn parse(json: &str) -> Result<Form, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_numbers_and_numeric_strings_accepted() {
        let form = parse(r#"{"id": "7", "amount": "12,50"}"#).unwrap();
        assert_eq!(form.id, Some(7));
        assert_eq!(form.amount, Some(Decimal::new(1250, 2)));

        let form = parse(r#"{"id": 7, "amount": 100.25}"#).unwrap();
        assert_eq!(form.id, Some(7));
        assert_eq!(form.amount, Some(Decimal::new(10025, 2)));
    }

    #[test]
    fn test_blank_and_null_are_absent() {
        let form = parse(r#"{"id": "", "amount": null, "label": "   ", "day": ""}"#).unwrap();
        assert!(form.id.is_none());
        assert!(form.amount.is_none());
        assert!(form.label.is_none());
        assert!(form.day.is_none());

        let form = parse("{}").unwrap();
        assert!(form.id.is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(parse(r#"{"id": "abc"}"#).is_err());
        assert!(parse(r#"{"id": 2.5}"#).is_err());
        assert!(parse(r#"{"amount": "ten"}"#).is_err());
        assert!(parse(r#"{"label": {"nested": true}}"#).is_err());
        assert!(parse(r#"{"day": "01/05/2024"}"#).is_err());
    }

    #[test]
    fn test_dates_accept_timestamps() {
        let form = parse(r#"{"day": "2024-05-01T00:00:00.000Z"}"#).unwrap();
        assert_eq!(form.day, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_strings_trimmed() {
        let form = parse(r#"{"label": "  Arroz  "}"#).unwrap();
        assert_eq!(form.label.as_deref(), Some("Arroz"));
    }
}
