//! Lenient decoding for loosely-validated upstream records.
//!
//! Records come from a store that does not enforce types. Values that cannot
//! be understood decode as `None` instead of failing the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Time;

/// Parse an instant from RFC 3339, a naive `YYYY-MM-DD HH:MM:SS` timestamp
/// (read as UTC) or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_time(s: &str) -> Option<Time> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserialize an optional integer, accepting numbers and numeric strings.
///
/// Fractions are truncated. Anything else (booleans, garbage strings,
/// objects) becomes `None`.
pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| as_count(&v)))
}

/// Deserialize an optional instant using [`parse_time`].
pub fn time<'de, D>(deserializer: D) -> Result<Option<Time>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_time(&s),
        _ => None,
    })
}

fn as_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "count")]
        words: Option<i64>,
        #[serde(default, deserialize_with = "time")]
        deadline: Option<Time>,
    }

    #[test]
    fn test_parse_time_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 3, 14, 30, 0).unwrap();
        assert_eq!(parse_time("2024-05-03T14:30:00Z"), Some(expected));
        assert_eq!(parse_time("2024-05-03T16:30:00+02:00"), Some(expected));
        assert_eq!(parse_time("2024-05-03 14:30:00"), Some(expected));
        assert_eq!(
            parse_time("2024-05-03"),
            Some(Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("next friday"), None);
        assert_eq!(parse_time("2024-13-45"), None);
    }

    #[test]
    fn test_count_accepts_numeric_strings() {
        let r: Record = serde_json::from_str(r#"{"words": "1200"}"#).unwrap();
        assert_eq!(r.words, Some(1200));

        let r: Record = serde_json::from_str(r#"{"words": 99.7}"#).unwrap();
        assert_eq!(r.words, Some(99));
    }

    #[test]
    fn test_unparseable_values_become_none() {
        let r: Record =
            serde_json::from_str(r#"{"words": "lots", "deadline": "soon"}"#).unwrap();
        assert_eq!(r.words, None);
        assert_eq!(r.deadline, None);

        let r: Record = serde_json::from_str(r#"{"words": null, "deadline": 17}"#).unwrap();
        assert_eq!(r.words, None);
        assert_eq!(r.deadline, None);

        let r: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(r.words, None);
    }
}
