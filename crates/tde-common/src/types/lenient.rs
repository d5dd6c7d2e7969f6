//! Forgiving `deserialize_with` helpers for backend fields

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a backend timestamp
///
/// Accepts RFC 3339, naive ISO-8601 date-times (taken as UTC, which is what
/// the backend stores), and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Timestamp field; unparsable values become `None`
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_timestamp))
}

/// Any JSON scalar rendered as text; `null` becomes the empty string
pub fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A JSON number, or `None` for anything else (strings included)
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// A number that may arrive as a JSON number or numeric string; otherwise 0
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// A non-negative count; `null`, negatives and non-numbers become 0
///
/// Fractional counts are rounded to the nearest whole number.
pub fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => match n.as_u64() {
            Some(count) => return Ok(count),
            None => n.as_f64(),
        },
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(value
        .filter(|count| count.is_finite() && *count > 0.0)
        .map(|count| count.round() as u64)
        .unwrap_or(0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 8, 16, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-08-16T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-08-16T20:00:00+10:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-08-16T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-08-16 10:00:00"), Some(expected));
        assert!(parse_timestamp("2024-08-16T10:00:00.123456").is_some());
        assert_eq!(
            parse_timestamp("2024-08-16"),
            Some(Utc.with_ymd_and_hms(2024, 8, 16, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_counts_are_lenient() {
        #[derive(Deserialize)]
        struct Counts {
            #[serde(deserialize_with = "count_or_zero")]
            n: u64,
        }

        let count = |json: &str| serde_json::from_str::<Counts>(json).unwrap().n;
        assert_eq!(count(r#"{"n": 12}"#), 12);
        assert_eq!(count(r#"{"n": null}"#), 0);
        assert_eq!(count(r#"{"n": 2.6}"#), 3);
        assert_eq!(count(r#"{"n": -4}"#), 0);
        assert_eq!(count(r#"{"n": " 7 "}"#), 7);
        assert_eq!(count(r#"{"n": "many"}"#), 0);
        assert_eq!(count(r#"{"n": [1]}"#), 0);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("16 Aug, 2024"), None);
    }
}
