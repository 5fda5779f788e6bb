//! Calendar-date normalization for catalog date strings.
//!
//! Catalog records mix US-order (`MM/DD/YYYY`) and ISO-order (`YYYY-MM-DD`)
//! dates. The delimiter present in a three-part numeric string picks the
//! interpretation; anything that is not a three-part numeric string goes
//! through a short list of long-form formats.
//!
//! Dates are timezone-naive. No time-of-day is kept, so two events on the
//! same calendar day always compare equal.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::DateParseError;

/// Calendar date used throughout the core.
pub type CalendarDate = NaiveDate;

/// Date substituted for empty or malformed input.
///
/// Sorts below every real catalog date, which pushes such records into the
/// past bucket instead of failing the comparison.
pub const EPOCH_SENTINEL: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(date) => date,
    None => panic!("1970-01-01 is a valid date"),
};

/// Long-form layouts tried when the input is not a numeric triple.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%A, %B %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a catalog date, degrading to [`EPOCH_SENTINEL`] on empty or
/// malformed input.
pub fn parse_date(text: &str) -> CalendarDate {
    match try_parse_date(text) {
        Ok(date) => date,
        Err(DateParseError::Empty) => EPOCH_SENTINEL,
        Err(err) => {
            tracing::debug!(input = text, error = %err, "date fell back to epoch sentinel");
            EPOCH_SENTINEL
        }
    }
}

/// Parse a catalog date, reporting why it was rejected.
///
/// # Errors
/// Returns [`DateParseError`] when the input is blank, uses an unsupported
/// delimiter, names an impossible day, or matches no known layout.
pub fn try_parse_date(text: &str) -> Result<CalendarDate, DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Some((delimiter, parts)) = split_numeric_triple(text) {
        return match delimiter {
            '/' => from_parts(text, parts[2], parts[0], parts[1]),
            '-' => from_parts(text, parts[0], parts[1], parts[2]),
            other => Err(DateParseError::UnsupportedDelimiter {
                input: text.to_string(),
                delimiter: other,
            }),
        };
    }

    parse_fallback(text)
}

/// Split `text` into three all-digit tokens around a single repeated
/// delimiter. Returns `None` when the input has any other shape.
fn split_numeric_triple(text: &str) -> Option<(char, [&str; 3])> {
    let delimiter = text.chars().find(|c| !c.is_ascii_alphanumeric())?;
    let mut tokens = text.split(delimiter);
    let parts = [tokens.next()?, tokens.next()?, tokens.next()?];
    if tokens.next().is_some() {
        return None;
    }
    let numeric = parts
        .iter()
        .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    numeric.then_some((delimiter, parts))
}

fn from_parts(input: &str, year: &str, month: &str, day: &str) -> Result<CalendarDate, DateParseError> {
    let invalid = || DateParseError::InvalidDate(input.to_string());
    if year.len() != 4 || month.len() > 2 || day.len() > 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_fallback(text: &str) -> Result<CalendarDate, DateParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(date);
        }
    }
    Err(DateParseError::Unrecognized(text.to_string()))
}
