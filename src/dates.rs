//! Calendar date handling for observation queries.
//!
//! Stored dates are plain `YYYY-MM-DD` strings with no time or timezone.
//! Everything that compares or shifts dates goes through [`NaiveDate`] so the
//! arithmetic stays correct across month and year boundaries; dates are only
//! turned back into strings at the SQL boundary.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{Result, SurfsupError};

/// Format used by the store and accepted on the API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window, fixed at 365 days regardless of leap years
pub const TRAILING_WINDOW_DAYS: u64 = 365;

/// Parse a caller-supplied date, rejecting anything that is not strictly `YYYY-MM-DD`.
///
/// `param` names the argument in the resulting error.
pub fn parse_date(param: &str, text: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| {
        SurfsupError::invalid_argument(
            param,
            format!("'{}' is not a valid YYYY-MM-DD date ({})", text, e),
        )
    })?;

    // chrono accepts unpadded fields such as 2020-2-3
    if format_date(date) != text {
        return Err(SurfsupError::invalid_argument(
            param,
            format!("'{}' is not a valid YYYY-MM-DD date", text),
        ));
    }

    Ok(date)
}

/// Parse a date read back from the store.
///
/// A bad value here means the dataset itself is corrupt, so it is reported as a
/// storage fault instead of a caller error.
pub fn parse_stored_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| SurfsupError::Storage {
        message: format!("Stored date '{}' is not YYYY-MM-DD: {}", text, e),
    })
}

/// Render a date the way the store keeps it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Exclusive lower bound of the trailing year ending at `most_recent`
pub fn trailing_cutoff(most_recent: NaiveDate) -> Result<NaiveDate> {
    most_recent
        .checked_sub_days(Days::new(TRAILING_WINDOW_DAYS))
        .ok_or_else(|| SurfsupError::Storage {
            message: format!("Cannot compute trailing window before {}", most_recent),
        })
}

/// An inclusive date window with an optional upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, failing when `end` falls before `start`
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = end {
            if end < start {
                return Err(SurfsupError::invalid_argument(
                    "end",
                    format!("end date {} is before start date {}", end, start),
                ));
            }
        }
        Ok(Self { start, end })
    }

    /// Parse and validate a range from raw path segments
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_date("start", start)?;
        let end = end.map(|e| parse_date("end", e)).transpose()?;
        Self::new(start, end)
    }
}
