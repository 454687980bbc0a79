//! Observation date value object
//!
//! Calendar date of a station reading, stored by the observation store as
//! `YYYY-MM-DD` text. Because the text form is zero-padded, lexical order of
//! the stored strings equals chronological order, which lets range filters run
//! as plain string comparisons.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::ObservationDate;
//!
//! let latest = ObservationDate::parse("2017-08-23").expect("valid date");
//! assert_eq!(latest.trailing_window_start().to_string(), "2016-08-23");
//!
//! assert!(ObservationDate::parse("2017/08/23").is_err());
//! ```

use std::{fmt, str::FromStr};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// `strftime` pattern of the stored and accepted date text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window used by "recent" queries, in calendar days
pub const TRAILING_WINDOW_DAYS: u64 = 365;

/// A calendar date in the `YYYY-MM-DD` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    /// Parse a strict `YYYY-MM-DD` string
    ///
    /// Only the zero-padded ten character shape is accepted, so `2017-8-3`,
    /// `2017/08/23` or surrounding whitespace are all rejected even where a
    /// lenient parser would take them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateFormat` carrying the rejected input.
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::value_objects::ObservationDate;
    ///
    /// assert!(ObservationDate::parse("2016-02-29").is_ok());
    /// assert!(ObservationDate::parse("2017-02-29").is_err());
    /// assert!(ObservationDate::parse("2017-8-3").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if !has_date_shape(input) {
            return Err(DomainError::InvalidDateFormat(input.to_string()));
        }

        NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DomainError::InvalidDateFormat(input.to_string()))
    }

    /// Wrap an existing `NaiveDate`
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Get the underlying `NaiveDate`
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Date `days` calendar days earlier, or `None` before the supported range
    #[must_use]
    pub fn days_before(self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }

    /// First date of the trailing window that ends at this date
    ///
    /// Plain day subtraction: leap days inside the window are not compensated,
    /// so the window always spans exactly [`TRAILING_WINDOW_DAYS`] days back.
    #[must_use]
    pub fn trailing_window_start(self) -> Self {
        self.days_before(TRAILING_WINDOW_DAYS)
            .unwrap_or(Self(NaiveDate::MIN))
    }
}

/// Check the `DDDD-DD-DD` shape before handing the input to chrono
fn has_date_shape(input: &str) -> bool {
    input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ObservationDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ObservationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObservationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
