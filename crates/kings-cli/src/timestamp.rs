//! Timestamp and duration parsing for game records and analog game notes.

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("cannot parse timestamp '{0}'")]
    Timestamp(String),
    #[error("cannot parse duration '{0}' (expected HH:MM:SS)")]
    Duration(String),
}

/// Parse an ISO 8601 timestamp. A trailing `Z` or explicit offset is
/// honoured; timestamps without an offset are taken as UTC. A space may
/// stand in for the `T` separator.
pub fn parse_timestamp(raw: &str) -> Result<OffsetDateTime, TimestampError> {
    let text = raw.trim();
    let normalized = match text.char_indices().nth(10) {
        Some((i, ' ')) => format!("{}T{}", &text[..i], &text[i + 1..]),
        _ => text.to_string(),
    };

    if let Ok(parsed) = OffsetDateTime::parse(&normalized, &Rfc3339) {
        return Ok(parsed);
    }

    let naive = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    PrimitiveDateTime::parse(&normalized, naive)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| TimestampError::Timestamp(raw.to_string()))
}

/// Parse `HH:MM:SS`. Hours may exceed 23.
pub fn parse_duration(raw: &str) -> Result<Duration, TimestampError> {
    let err = || TimestampError::Duration(raw.to_string());
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(err());
    };
    let hours: i64 = hours.parse().map_err(|_| err())?;
    let minutes: i64 = minutes.parse().map_err(|_| err())?;
    let seconds: i64 = seconds.parse().map_err(|_| err())?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(err());
    }
    let total = hours
        .checked_mul(3600)
        .and_then(|s| s.checked_add(minutes * 60 + seconds))
        // Keep the span representable in milliseconds.
        .filter(|s| *s <= i64::MAX / 1000)
        .ok_or_else(err)?;
    Ok(Duration::seconds(total))
}

/// Whole milliseconds from `start` to `at`, truncated.
pub fn delta_ms(start: OffsetDateTime, at: OffsetDateTime) -> i64 {
    (at - start).whole_milliseconds() as i64
}
