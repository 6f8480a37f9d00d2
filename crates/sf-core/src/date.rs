//! Date normalization for SimpleFIN query parameters
//!
//! The bridge filters transactions with `start-date` / `end-date` given as
//! whole seconds since the Unix epoch. Callers hand us whatever they have on
//! hand: a chrono value, a millisecond timestamp or an ISO-like string.
//!
//! Strings without a zone designator (`2025-11-09`, `2025-11-09T08:00`) are
//! read as UTC, and so are naive chrono values.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// Naive date-time layouts tried after RFC 3339 fails
const NAIVE_FORMATS: [&str; 4] =
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// A point in time in any of the shapes accepted by [`to_unix_epoch`]
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
  /// A resolved instant
  DateTime(DateTime<Utc>),
  /// Milliseconds since the Unix epoch
  Millis(i64),
  /// An ISO-like date or date-time literal, parsed on demand
  Text(String),
}

impl DateInput {
  /// Whole seconds since the Unix epoch, floored, as a string.
  pub fn to_unix_epoch(&self) -> Result<String> {
    let seconds = match self {
      DateInput::DateTime(dt) => dt.timestamp(),
      DateInput::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)
        .ok_or_else(|| Error::InvalidArgument(format!("Invalid date value: {}", ms)))?
        .timestamp(),
      DateInput::Text(raw) => parse_text(raw)
        .ok_or_else(|| Error::InvalidArgument(format!("Invalid date value: {}", raw)))?
        .timestamp(),
    };

    Ok(seconds.to_string())
  }
}

/// Convert a date value into the epoch-seconds string the bridge expects
///
/// # Examples
///
/// ```
/// use sf_core::to_unix_epoch;
///
/// assert_eq!(to_unix_epoch(1_762_923_296_999_i64).unwrap(), "1762923296");
/// assert_eq!(to_unix_epoch("2025-11-09T12:34:56Z").unwrap(), "1762691696");
/// assert!(to_unix_epoch("invalid-date").is_err());
/// ```
pub fn to_unix_epoch(date: impl Into<DateInput>) -> Result<String> {
  date.into().to_unix_epoch()
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }

  // ISO 8601 offsets without the colon, e.g. +0530
  if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
    return Some(dt.with_timezone(&Utc));
  }

  for format in NAIVE_FORMATS {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
      return Some(naive.and_utc());
    }
  }

  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
  }

  DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.with_timezone(&Utc))
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
  fn from(value: DateTime<Tz>) -> Self {
    DateInput::DateTime(value.with_timezone(&Utc))
  }
}

impl From<NaiveDateTime> for DateInput {
  fn from(value: NaiveDateTime) -> Self {
    DateInput::DateTime(value.and_utc())
  }
}

impl From<NaiveDate> for DateInput {
  fn from(value: NaiveDate) -> Self {
    DateInput::DateTime(value.and_time(chrono::NaiveTime::MIN).and_utc())
  }
}

impl From<i64> for DateInput {
  fn from(value: i64) -> Self {
    DateInput::Millis(value)
  }
}

impl From<&str> for DateInput {
  fn from(value: &str) -> Self {
    DateInput::Text(value.to_string())
  }
}

impl From<String> for DateInput {
  fn from(value: String) -> Self {
    DateInput::Text(value)
  }
}

impl fmt::Display for DateInput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DateInput::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
      DateInput::Millis(ms) => write!(f, "{}", ms),
      DateInput::Text(raw) => f.write_str(raw),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::FixedOffset;

  #[test]
  fn test_datetime_to_epoch() {
    let dt = Utc.with_ymd_and_hms(2025, 11, 9, 12, 34, 56).unwrap();
    assert_eq!(to_unix_epoch(dt).unwrap(), "1762691696");
  }

  #[test]
  fn test_offset_datetime_is_normalized() {
    let offset = FixedOffset::east_opt(5 * 3600).unwrap();
    let dt = offset.with_ymd_and_hms(2025, 11, 9, 17, 34, 56).unwrap();
    assert_eq!(to_unix_epoch(dt).unwrap(), "1762691696");
  }

  #[test]
  fn test_millis_floor_division() {
    let ts: i64 = 1_762_923_296_000;
    assert_eq!(to_unix_epoch(ts).unwrap(), (ts / 1000).to_string());
    assert_eq!(to_unix_epoch(1_762_923_296_999_i64).unwrap(), "1762923296");
    assert_eq!(to_unix_epoch(0_i64).unwrap(), "0");
    // floor, not truncation, for instants before the epoch
    assert_eq!(to_unix_epoch(-1_i64).unwrap(), "-1");
    assert_eq!(to_unix_epoch(-1_000_i64).unwrap(), "-1");
  }

  #[test]
  fn test_millis_outside_chrono_range_are_rejected() {
    let err = to_unix_epoch(i64::MAX).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains(&format!("Invalid date value: {}", i64::MAX)));

    assert!(matches!(to_unix_epoch(i64::MIN), Err(Error::InvalidArgument(_))));
  }

  #[test]
  fn test_iso_strings() {
    assert_eq!(to_unix_epoch("2025-11-09T12:34:56Z").unwrap(), "1762691696");
    assert_eq!(to_unix_epoch("2025-11-09T12:34:56.789Z").unwrap(), "1762691696");
    assert_eq!(to_unix_epoch("2025-11-09T14:34:56+02:00").unwrap(), "1762691696");
    assert_eq!(to_unix_epoch("2025-11-09T14:34:56+0200").unwrap(), "1762691696");
  }

  #[test]
  fn test_strings_without_zone_are_utc() {
    assert_eq!(to_unix_epoch("2025-11-09").unwrap(), "1762646400");
    assert_eq!(to_unix_epoch("2025-11-09T12:34:56").unwrap(), "1762691696");
    assert_eq!(to_unix_epoch("2025-11-09 12:34:56").unwrap(), "1762691696");
    assert_eq!(to_unix_epoch("2025-11-09T12:34").unwrap(), "1762691640");
  }

  #[test]
  fn test_naive_chrono_values_are_utc() {
    let date = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
    assert_eq!(to_unix_epoch(date).unwrap(), "1762646400");
    assert_eq!(to_unix_epoch(date.and_hms_opt(12, 34, 56).unwrap()).unwrap(), "1762691696");
  }

  #[test]
  fn test_rfc2822_string() {
    assert_eq!(to_unix_epoch("Sun, 09 Nov 2025 12:34:56 +0000").unwrap(), "1762691696");
  }

  #[test]
  fn test_invalid_date_names_the_literal() {
    let err = to_unix_epoch("invalid-date").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("Invalid date value: invalid-date"));

    assert!(to_unix_epoch("").is_err());
    assert!(to_unix_epoch("2025-13-40").is_err());
  }
}
