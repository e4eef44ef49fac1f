//! Date-password parsing.
//!
//! Free-form input is reduced to its digits, so `"01.11.2025"`,
//! `"01 11 2025"` and `"01112025"` all parse the same. Only 6-digit
//! (`DDMMYY`, year offset +2000) and 8-digit (`DDMMYYYY`) sequences are
//! accepted, and the result must denote a real calendar date within
//! [2000, 2099].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GateError;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2099;

/// A parsed, calendar-validated date candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCandidate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateCandidate {
    /// Canonical `DDMMYYYY` digit form.
    pub fn normalized(&self) -> String {
        format!("{:02}{:02}{}", self.day, self.month, self.year)
    }

    /// Date-only comparison against the configured target.
    pub fn matches(&self, target: NaiveDate) -> bool {
        use chrono::Datelike;
        self.day == target.day() && self.month == target.month() && self.year == target.year()
    }
}

/// Parse a raw submission into a [`DateCandidate`].
///
/// # Errors
/// [`GateError::Format`] when the digit count is not 6 or 8,
/// [`GateError::InvalidDate`] when the digits do not denote a real
/// calendar date in the accepted year range.
pub fn parse_date_password(raw: &str) -> Result<DateCandidate, GateError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() != 6 && digits.len() != 8 {
        return Err(GateError::Format);
    }

    // Lengths checked above; the slices are pure ASCII digits.
    let day: u32 = digits[0..2].parse().map_err(|_| GateError::Format)?;
    let month: u32 = digits[2..4].parse().map_err(|_| GateError::Format)?;
    let mut year: i32 = digits[4..].parse().map_err(|_| GateError::Format)?;
    if digits.len() == 6 {
        year += 2000;
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(GateError::InvalidDate);
    }
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(GateError::InvalidDate);
    }

    Ok(DateCandidate { day, month, year })
}
