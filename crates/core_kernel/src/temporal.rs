//! Coverage periods and age arithmetic
//!
//! Insurance coverage is tracked in whole calendar days. A coverage period
//! starts on its effective date and, when terminated, ends on its
//! termination date; both bounds are inclusive.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: termination {end} precedes effective date {start}")]
    InvalidPeriod {
        start: String,
        end: String,
    },
}

/// Which side of a coverage period a date falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodBoundary {
    /// The date precedes the effective date
    BeforeStart,
    /// The date follows the termination date
    AfterEnd,
}

impl PeriodBoundary {
    /// Human-readable phrase used in alert descriptions
    pub fn describe(&self) -> &'static str {
        match self {
            PeriodBoundary::BeforeStart => "before coverage start",
            PeriodBoundary::AfterEnd => "after coverage end",
        }
    }
}

/// The span of days a policy provides coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// First covered day (inclusive)
    pub effective_date: NaiveDate,
    /// Last covered day (inclusive), None means still active
    pub termination_date: Option<NaiveDate>,
}

impl CoveragePeriod {
    /// Creates a new coverage period
    pub fn new(
        effective_date: NaiveDate,
        termination_date: Option<NaiveDate>,
    ) -> Result<Self, TemporalError> {
        if let Some(end) = termination_date {
            if end < effective_date {
                return Err(TemporalError::InvalidPeriod {
                    start: effective_date.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self {
            effective_date,
            termination_date,
        })
    }

    /// Returns true if the date falls within the period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.effective_date && self.termination_date.map_or(true, |end| date <= end)
    }

    /// Locates a date outside the period
    ///
    /// Returns the side it falls on and the number of days between it and
    /// the nearest bound, or None when the date is covered.
    pub fn outside(&self, date: NaiveDate) -> Option<(PeriodBoundary, i64)> {
        if date < self.effective_date {
            return Some((
                PeriodBoundary::BeforeStart,
                (self.effective_date - date).num_days(),
            ));
        }
        match self.termination_date {
            Some(end) if date > end => Some((PeriodBoundary::AfterEnd, (date - end).num_days())),
            _ => None,
        }
    }
}

/// Age in completed years on the given date
///
/// Dates before the birth date yield zero.
pub fn age_on(date_of_birth: NaiveDate, date: NaiveDate) -> u32 {
    if date < date_of_birth {
        return 0;
    }
    let mut age = date.year() - date_of_birth.year();
    if (date.month(), date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
