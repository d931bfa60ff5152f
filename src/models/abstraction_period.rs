//! Recurring abstraction period model.
//!
//! An abstraction period is a day/month window that repeats every year, such
//! as 1 April to 31 October, or 1 November to 31 March when it wraps the
//! calendar year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A recurring day/month window during which abstraction is permitted.
///
/// # Example
///
/// ```
/// use two_part_tariff::models::AbstractionPeriod;
/// use chrono::NaiveDate;
///
/// let winter = AbstractionPeriod {
///     start_day: 1,
///     start_month: 11,
///     end_day: 31,
///     end_month: 3,
/// };
///
/// assert!(winter.is_within(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert!(!winter.is_within(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbstractionPeriod {
    /// Day of month the window opens.
    pub start_day: u32,
    /// Month the window opens (1-12).
    pub start_month: u32,
    /// Day of month the window closes.
    pub end_day: u32,
    /// Month the window closes (1-12).
    pub end_month: u32,
}

impl AbstractionPeriod {
    /// The whole year, 1 January to 31 December.
    pub const ALL_YEAR: AbstractionPeriod = AbstractionPeriod {
        start_day: 1,
        start_month: 1,
        end_day: 31,
        end_month: 12,
    };

    /// Checks whether a date falls inside this recurring window.
    ///
    /// Both boundaries are inclusive. When the start is later in the year
    /// than the end, the window wraps over the new year.
    pub fn is_within(&self, date: NaiveDate) -> bool {
        let day_of_year = (date.month(), date.day());
        let start = (self.start_month, self.start_day);
        let end = (self.end_month, self.end_day);

        if start <= end {
            day_of_year >= start && day_of_year <= end
        } else {
            day_of_year >= start || day_of_year <= end
        }
    }

    /// Returns a description of the first impossible boundary, if any.
    ///
    /// 29 February is accepted as a boundary.
    pub fn validate(&self) -> Result<(), String> {
        check_boundary("start", self.start_day, self.start_month)?;
        check_boundary("end", self.end_day, self.end_month)
    }
}

fn check_boundary(label: &str, day: u32, month: u32) -> Result<(), String> {
    // 2000 is a leap year so 29 February validates
    if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
        return Err(format!(
            "abstraction period {} day {} of month {} is not a calendar date",
            label, day, month
        ));
    }
    Ok(())
}

/// Checks whether a date falls inside a recurring abstraction window.
///
/// Free-function form of [`AbstractionPeriod::is_within`].
pub fn is_within_abstraction_period(date: NaiveDate, period: &AbstractionPeriod) -> bool {
    period.is_within(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn summer() -> AbstractionPeriod {
        AbstractionPeriod {
            start_day: 1,
            start_month: 4,
            end_day: 31,
            end_month: 10,
        }
    }

    fn winter() -> AbstractionPeriod {
        AbstractionPeriod {
            start_day: 1,
            start_month: 11,
            end_day: 31,
            end_month: 3,
        }
    }

    #[test]
    fn test_summer_window_contains_midsummer() {
        assert!(summer().is_within(make_date("2025-07-15")));
    }

    #[test]
    fn test_summer_window_boundaries_are_inclusive() {
        assert!(summer().is_within(make_date("2025-04-01")));
        assert!(summer().is_within(make_date("2025-10-31")));
        assert!(!summer().is_within(make_date("2025-03-31")));
        assert!(!summer().is_within(make_date("2025-11-01")));
    }

    #[test]
    fn test_winter_window_wraps_year_end() {
        assert!(winter().is_within(make_date("2025-11-01")));
        assert!(winter().is_within(make_date("2025-12-31")));
        assert!(winter().is_within(make_date("2026-01-01")));
        assert!(winter().is_within(make_date("2026-03-31")));
        assert!(!winter().is_within(make_date("2026-04-01")));
        assert!(!winter().is_within(make_date("2025-10-31")));
    }

    #[test]
    fn test_all_year_contains_every_boundary() {
        assert!(AbstractionPeriod::ALL_YEAR.is_within(make_date("2025-01-01")));
        assert!(AbstractionPeriod::ALL_YEAR.is_within(make_date("2025-12-31")));
        assert!(AbstractionPeriod::ALL_YEAR.is_within(make_date("2024-02-29")));
    }

    #[test]
    fn test_single_day_window() {
        let period = AbstractionPeriod {
            start_day: 5,
            start_month: 6,
            end_day: 5,
            end_month: 6,
        };
        assert!(period.is_within(make_date("2025-06-05")));
        assert!(!period.is_within(make_date("2025-06-06")));
    }

    #[test]
    fn test_free_function_matches_method() {
        let date = make_date("2026-02-10");
        assert_eq!(
            is_within_abstraction_period(date, &winter()),
            winter().is_within(date)
        );
    }

    #[test]
    fn test_validate_accepts_leap_day() {
        let period = AbstractionPeriod {
            start_day: 29,
            start_month: 2,
            end_day: 31,
            end_month: 3,
        };
        assert!(period.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_impossible_dates() {
        let bad_month = AbstractionPeriod {
            start_day: 1,
            start_month: 13,
            end_day: 31,
            end_month: 3,
        };
        assert!(bad_month.validate().is_err());

        let bad_day = AbstractionPeriod {
            start_day: 1,
            start_month: 4,
            end_day: 31,
            end_month: 4,
        };
        let message = bad_day.validate().unwrap_err();
        assert!(message.contains("end day 31 of month 4"));
    }

    #[test]
    fn test_deserialize_abstraction_period() {
        let json = r#"{"start_day": 1, "start_month": 11, "end_day": 31, "end_month": 3}"#;
        let period: AbstractionPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period, winter());
    }
}
