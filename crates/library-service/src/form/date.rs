//! ISO-8601 date handling for optional date fields.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use validator::ValidationError;

/// Parse an ISO-8601 calendar date, date-time, or RFC 3339 timestamp.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// `validator` rule for ISO-8601 dates.
pub(crate) fn iso_date(value: &str) -> Result<(), ValidationError> {
    match parse_iso_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601").with_message(Cow::Borrowed("Invalid date"))),
    }
}
