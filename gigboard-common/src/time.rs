//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Get current UTC timestamp
///
/// Handlers call this once per request and pass the value down, so every
/// classification inside one request shares the same boundary.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format as ISO 8601 with a `Z` suffix, e.g. `2019-05-21T21:30:00Z`
pub fn to_iso8601(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a show start time
///
/// Accepts RFC 3339 (any offset, normalized to UTC) or a naive
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
pub fn parse_start_time(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("start_time is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidInput(format!("Unrecognized start_time: {}", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_iso8601_uses_z_suffix() {
        let t = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(to_iso8601(&t), "2019-05-21T21:30:00Z");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_offset() {
        let parsed = parse_start_time("2035-04-01T22:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_formats_as_utc() {
        let expected = Utc.with_ymd_and_hms(2019, 6, 15, 23, 0, 0).unwrap();
        assert_eq!(parse_start_time("2019-06-15 23:00:00").unwrap(), expected);
        assert_eq!(parse_start_time("2019-06-15 23:00").unwrap(), expected);
        assert_eq!(parse_start_time("2019-06-15T23:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage_and_blank() {
        assert!(matches!(parse_start_time("next tuesday"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_start_time("   "), Err(Error::InvalidInput(_))));
    }
}
