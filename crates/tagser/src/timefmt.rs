// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RFC3339 timestamps with nanoseconds.
//!
//! Formatting trims trailing fractional zeros (no fraction at all for whole
//! seconds) and writes `Z` for a zero offset. Parsing accepts any RFC3339
//! timestamp.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use std::fmt::Write;

/// Wire tag introducing a timestamp inside a struct payload.
pub(crate) const TIME_TAG: &[u8; 4] = b"time";

/// Format a timestamp for the wire.
pub fn format_rfc3339_nano(time: &DateTime<FixedOffset>) -> Result<String> {
    if !(0..=9999).contains(&time.year()) {
        return Err(Error::MalformedTimestamp(format!(
            "year {} outside 0000-9999",
            time.year()
        )));
    }

    let mut out = time.format("%Y-%m-%dT%H:%M:%S").to_string();

    // Leap seconds are carried as nanos >= 1e9 and already show up as :60.
    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    let offset = time.offset().local_minus_utc();
    if offset == 0 {
        out.push('Z');
    } else {
        let sign = if offset < 0 { '-' } else { '+' };
        let minutes = offset.unsigned_abs() / 60;
        let _ = write!(out, "{}{:02}:{:02}", sign, minutes / 60, minutes % 60);
    }
    Ok(out)
}

/// Parse a wire timestamp.
pub fn parse_rfc3339_nano(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .map_err(|e| Error::MalformedTimestamp(format!("{:?}: {}", text, e)))
}

/// Zero value of a timestamp slot: 0001-01-01T00:00:00Z.
pub fn zero_time() -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).expect("valid timestamp")
    }

    #[test]
    fn test_format_trims_fraction() {
        let t = parse("2024-03-05T10:20:30.123400000Z");
        assert_eq!(format_rfc3339_nano(&t).unwrap(), "2024-03-05T10:20:30.1234Z");

        let t = parse("2024-03-05T10:20:30Z");
        assert_eq!(format_rfc3339_nano(&t).unwrap(), "2024-03-05T10:20:30Z");

        let t = parse("2024-03-05T10:20:30.000000001Z");
        assert_eq!(
            format_rfc3339_nano(&t).unwrap(),
            "2024-03-05T10:20:30.000000001Z"
        );
    }

    #[test]
    fn test_format_offsets() {
        let t = parse("2024-03-05T10:20:30.5+02:00");
        assert_eq!(format_rfc3339_nano(&t).unwrap(), "2024-03-05T10:20:30.5+02:00");

        let t = parse("2024-03-05T10:20:30-05:30");
        assert_eq!(format_rfc3339_nano(&t).unwrap(), "2024-03-05T10:20:30-05:30");
    }

    #[test]
    fn test_roundtrip_keeps_nanoseconds() {
        let t = parse("1999-12-31T23:59:59.987654321+01:00");
        let text = format_rfc3339_nano(&t).unwrap();
        let back = parse_rfc3339_nano(&text).unwrap();
        assert_eq!(back, t);
        assert_eq!(back.nanosecond(), 987_654_321);
        assert_eq!(back.offset(), t.offset());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_rfc3339_nano("x"),
            Err(Error::MalformedTimestamp(_))
        ));
        assert!(parse_rfc3339_nano("2024-13-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_zero_time() {
        let zero = zero_time();
        assert_eq!(format_rfc3339_nano(&zero).unwrap(), "0001-01-01T00:00:00Z");
    }
}
