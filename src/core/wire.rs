//! Timestamp formats spoken by the transparency platform.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Compact request boundary format: `YYYYMMDDHHmm`, always UTC.
const WIRE_FORMAT: &str = "%Y%m%d%H%M";

/// Minute-precision ISO 8601 used in `timeInterval` elements, for example `2025-01-05T23:00Z`.
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Render the instant as a request boundary.
///
/// Seconds and their fractions are dropped, never rounded.
#[must_use]
pub fn format_wire_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(WIRE_FORMAT).to_string()
}

/// Parse a document instant, accepting both the minute-precision form and full RFC 3339.
#[must_use]
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|instant| instant.to_utc())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, MINUTE_FORMAT).map(|instant| instant.and_utc())
        })
        .ok()
}
