//! Charge element model and related types.
//!
//! A charge element is one billable entitlement on a licence for a billing
//! period, derived upstream from the licence's charge version.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AbstractionPeriod, DateRange};

/// The water source a charge element abstracts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Supported source.
    Supported,
    /// Unsupported source.
    Unsupported,
    /// Tidal water.
    Tidal,
    /// Kielder water transfer scheme.
    Kielder,
}

/// The season a charge element is billed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// Summer abstraction.
    Summer,
    /// Winter abstraction.
    Winter,
    /// Abstraction throughout the year.
    AllYear,
}

/// A charge element as supplied by charge-version processing.
///
/// Elements carrying a `time_limited_period` are sub-elements; elements
/// without one are base elements.
///
/// # Example
///
/// ```
/// use two_part_tariff::models::{AbstractionPeriod, ChargeElement, Season, Source};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let element = ChargeElement {
///     id: Uuid::new_v4(),
///     source: Source::Unsupported,
///     season: Season::Summer,
///     purpose_tertiary_code: 400,
///     is_two_part_tariff: true,
///     start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
///     abstraction_period: AbstractionPeriod::ALL_YEAR,
///     time_limited_period: None,
///     authorised_annual_quantity: Decimal::new(50, 0),
///     billable_annual_quantity: Some(Decimal::new(40, 0)),
///     total_days: 365,
///     billable_days: 365,
/// };
///
/// assert_eq!(element.annual_quantity(), Decimal::new(40, 0));
/// assert!(!element.is_time_limited());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeElement {
    /// Unique identifier for the charge element.
    pub id: Uuid,
    /// The water source.
    pub source: Source,
    /// The billing season.
    pub season: Season,
    /// Tertiary code of the element's purpose of use.
    pub purpose_tertiary_code: u32,
    /// Whether the element's purpose is billed under two-part tariff.
    pub is_two_part_tariff: bool,
    /// First day the element is effective in this billing period.
    pub start_date: NaiveDate,
    /// Last day the element is effective in this billing period.
    pub end_date: NaiveDate,
    /// The recurring window during which abstraction is authorised.
    pub abstraction_period: AbstractionPeriod,
    /// The time-limited sub-period, present only on sub-elements.
    #[serde(default)]
    pub time_limited_period: Option<DateRange>,
    /// Authorised annual quantity in megalitres.
    pub authorised_annual_quantity: Decimal,
    /// Billable annual quantity in megalitres, overriding the authorised one.
    #[serde(default)]
    pub billable_annual_quantity: Option<Decimal>,
    /// Days billable in a full year once the abstraction period is applied.
    pub total_days: u32,
    /// Days actually billable once the effective date range is applied.
    pub billable_days: u32,
}

impl ChargeElement {
    /// The annual quantity used for billing.
    ///
    /// The billable quantity takes precedence over the authorised quantity
    /// when present.
    pub fn annual_quantity(&self) -> Decimal {
        self.billable_annual_quantity
            .unwrap_or(self.authorised_annual_quantity)
    }

    /// Returns `true` for time-limited sub-elements.
    pub fn is_time_limited(&self) -> bool {
        self.time_limited_period.is_some()
    }

    /// The effective date range of the element in this billing period.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}
