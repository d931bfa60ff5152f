//! Inclusive date range model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed range of calendar dates, inclusive of both ends.
///
/// # Example
///
/// ```
/// use two_part_tariff::models::DateRange;
/// use chrono::NaiveDate;
///
/// let april = DateRange {
///     start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
/// };
///
/// assert_eq!(april.days(), 30);
/// assert!(april.contains(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of the range (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the range (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two ends.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Returns `true` if the range ends before it starts.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Number of days in the range, counting both ends.
    ///
    /// A single-day range has one day.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Checks if a date falls within the range (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Returns the days common to both ranges, if there are any.
    pub fn intersection(&self, other: &DateRange) -> Option<DateRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(DateRange {
            start_date: self.start_date.max(other.start_date),
            end_date: self.end_date.min(other.end_date),
        })
    }
}
