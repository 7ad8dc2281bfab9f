//! ISO calendar date parsing and formatting.
//!
//! Every boundary that carries a date as text uses `YYYY-MM-DD`. Parsing is
//! strict: an unparsable value is an error, never a zero date.

use chrono::NaiveDate;

use crate::error::CoreError;

/// `chrono` format string for `YYYY-MM-DD`.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO date, reporting the offending `field` on failure.
///
/// `chrono` alone accepts short years, unpadded components, a sign and
/// leading whitespace, so the exact `YYYY-MM-DD` shape is checked first.
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, CoreError> {
    let malformed = || CoreError::MalformedDate {
        field,
        value: value.to_string(),
    };

    if !has_iso_shape(value) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| malformed())
}

/// Ten ASCII bytes: four digits, `-`, two digits, `-`, two digits.
fn has_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
