//! Calendar-date interval primitives.
//!
//! A [`Stay`] is a closed, inclusive range of calendar dates. Dates carry no
//! time-of-day or offset, so two dates compare exactly as calendar days and no
//! daylight-saving transition can shift a count.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};

/// Interchange format for calendar dates (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated stay: `entry <= exit`, both days counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stay {
    pub entry: NaiveDate,
    pub exit: NaiveDate,
}

/// An unvalidated stay as read from storage or a form.
///
/// Both fields hold whatever the caller had; nothing is checked until the
/// record passes through [`normalize_stays`](crate::normalize_stays).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStay {
    pub entry: String,
    pub exit: String,
}

impl RawStay {
    pub fn new(entry: impl Into<String>, exit: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            exit: exit.into(),
        }
    }
}

impl Stay {
    /// Build a stay from two dates.
    ///
    /// # Errors
    /// Returns [`StayError::InvertedRange`] if `exit` is before `entry`. The
    /// range is never clamped.
    pub fn new(entry: NaiveDate, exit: NaiveDate) -> Result<Self> {
        if exit < entry {
            return Err(StayError::InvertedRange {
                entry: entry.format(ISO_DATE_FORMAT).to_string(),
                exit: exit.format(ISO_DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { entry, exit })
    }

    /// Parse a stay from two ISO date strings.
    ///
    /// # Errors
    /// [`StayError::InvalidDate`] when either side does not parse,
    /// [`StayError::InvertedRange`] when both parse but are out of order.
    pub fn parse(entry: &str, exit: &str) -> Result<Self> {
        let invalid = || StayError::InvalidDate {
            entry: entry.to_string(),
            exit: exit.to_string(),
        };
        let entry_date = parse_iso_date(entry).map_err(|_| invalid())?;
        let exit_date = parse_iso_date(exit).map_err(|_| invalid())?;

        if exit_date < entry_date {
            return Err(StayError::InvertedRange {
                entry: entry.to_string(),
                exit: exit.to_string(),
            });
        }
        Ok(Self {
            entry: entry_date,
            exit: exit_date,
        })
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        inclusive_day_count(self.entry, self.exit)
    }

    /// Every calendar day of the stay, in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let exit = self.exit;
        self.entry.iter_days().take_while(move |day| *day <= exit)
    }

    /// Convert back to the interchange record.
    pub fn to_raw(&self) -> RawStay {
        RawStay {
            entry: format_iso_date(self.entry),
            exit: format_iso_date(self.exit),
        }
    }
}

impl From<Stay> for RawStay {
    fn from(stay: Stay) -> Self {
        stay.to_raw()
    }
}

/// Inclusive number of days from `a` to `b`.
///
/// Returns 0 when `b` is before `a`; the count is used arithmetically by the
/// callers, so a reversed pair is simply an empty range.
pub fn inclusive_day_count(a: NaiveDate, b: NaiveDate) -> i64 {
    if b < a {
        return 0;
    }
    b.signed_duration_since(a).num_days() + 1
}

/// True when `b` starts no later than the day after `a` ends.
///
/// Expects `a.entry <= b.entry`; ordering the pair is the caller's job.
pub fn are_adjacent_or_overlapping(a: &Stay, b: &Stay) -> bool {
    b.entry <= add_days(a.exit, 1)
}

/// Parse a strict `YYYY-MM-DD` date. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`StayError::InvalidDateValue`] for anything else, including
/// impossible dates such as `2025-02-29`.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields and signed years; the interchange format does not.
    let well_shaped = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(StayError::InvalidDateValue(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| StayError::InvalidDateValue(s.to_string()))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Shift a date by a signed number of days, saturating at the representable range.
pub(crate) fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    match date.checked_add_signed(Duration::days(days)) {
        Some(shifted) => shifted,
        None if days >= 0 => NaiveDate::MAX,
        None => NaiveDate::MIN,
    }
}
