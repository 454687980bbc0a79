//! Inclusive date range used by temperature statistics

use serde::{Deserialize, Serialize};

use super::ObservationDate;
use crate::DomainError;

/// Inclusive range of observation dates with an optional upper bound
///
/// A range whose end precedes its start is valid but matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: ObservationDate,
    end: Option<ObservationDate>,
}

impl DateRange {
    /// Open-ended range: every date on or after `start`
    #[must_use]
    pub const fn starting_at(start: ObservationDate) -> Self {
        Self { start, end: None }
    }

    /// Closed range from `start` through `end`
    #[must_use]
    pub const fn between(start: ObservationDate, end: ObservationDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Parse both bounds with the strict `YYYY-MM-DD` rules
    ///
    /// # Errors
    ///
    /// Returns the first `DomainError::InvalidDateFormat` encountered,
    /// checking `start` before `end`.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, DomainError> {
        let start = ObservationDate::parse(start)?;
        match end {
            Some(end) => Ok(Self::between(start, ObservationDate::parse(end)?)),
            None => Ok(Self::starting_at(start)),
        }
    }

    #[must_use]
    pub const fn start(&self) -> ObservationDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<ObservationDate> {
        self.end
    }

    /// True when the upper bound precedes the lower bound
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end.is_some_and(|end| end < self.start)
    }
}
