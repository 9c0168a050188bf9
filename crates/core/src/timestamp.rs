//! ISO-8601 timestamps as the remote store keeps them.
//!
//! Dates are written in UTC with millisecond precision and a `Z` suffix
//! (`2023-01-01T00:00:00.000Z`). Any RFC 3339 timestamp is accepted on read.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Render `at` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_iso(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

/// Parse an RFC 3339 timestamp.
pub fn parse_iso(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(text, &Rfc3339)
}
