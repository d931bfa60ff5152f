//! Abstraction return models.
//!
//! A return is a licence holder's own report of how much water they
//! abstracted over a period, broken down into lines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AbstractionPeriod, DateRange};

/// Where a return is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    /// Not yet submitted.
    Due,
    /// Submitted but not yet finalised.
    Received,
    /// Submitted and finalised.
    Completed,
}

/// A purpose declared on a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReturnPurpose {
    /// Tertiary code of the purpose of use.
    pub tertiary_code: u32,
}

/// One reported sub-period of a return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLine {
    /// First day of the reported sub-period.
    pub start_date: NaiveDate,
    /// Last day of the reported sub-period.
    pub end_date: NaiveDate,
    /// Reported quantity in cubic metres, absent if nothing was entered.
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

impl ReturnLine {
    /// The sub-period covered by this line.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// A licence holder's abstraction return for one period.
///
/// # Example
///
/// ```
/// use two_part_tariff::models::{AbstractionPeriod, ReturnPurpose, ReturnRecord, ReturnStatus};
/// use chrono::NaiveDate;
///
/// let ret = ReturnRecord {
///     id: "v1:1:01/123:1234:2025-04-01:2026-03-31".to_string(),
///     status: ReturnStatus::Due,
///     due_date: NaiveDate::from_ymd_opt(2026, 4, 28).unwrap(),
///     received_date: None,
///     under_query: false,
///     abstraction_period: AbstractionPeriod::ALL_YEAR,
///     purposes: vec![ReturnPurpose { tertiary_code: 400 }],
///     lines: Some(vec![]),
/// };
///
/// assert!(ret.has_purpose(400));
/// assert!(!ret.has_purpose(380));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// Unique identifier for the return.
    pub id: String,
    /// Submission status.
    pub status: ReturnStatus,
    /// Date the return must be submitted by.
    pub due_date: NaiveDate,
    /// Date the return was received, if it has been.
    #[serde(default)]
    pub received_date: Option<NaiveDate>,
    /// Whether the return has been flagged for query.
    #[serde(default)]
    pub under_query: bool,
    /// The return's own recurring abstraction window.
    pub abstraction_period: AbstractionPeriod,
    /// Purposes declared on the return.
    pub purposes: Vec<ReturnPurpose>,
    /// Reported lines; `None` when no line data was loaded at all.
    #[serde(default)]
    pub lines: Option<Vec<ReturnLine>>,
}

impl ReturnRecord {
    /// Checks whether the return declares a purpose with the given tertiary code.
    pub fn has_purpose(&self, tertiary_code: u32) -> bool {
        self.purposes.iter().any(|p| p.tertiary_code == tertiary_code)
    }

    /// Checks whether the return declares any of the given tertiary codes.
    pub fn has_any_purpose(&self, tertiary_codes: &[u32]) -> bool {
        tertiary_codes.iter().any(|code| self.has_purpose(*code))
    }
}
