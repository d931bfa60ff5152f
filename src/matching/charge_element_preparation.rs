//! Charge element preparation.
//!
//! Filters charge elements down to those billed under two-part tariff,
//! derives their pro-rata authorised quantity, and fixes the priority order
//! used by both line matching and reallocation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChargeElement, MatchResult, StatusCode};

use super::quantity::round_quantity;

/// A charge element with the running quantities used during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedChargeElement {
    /// The element as supplied.
    pub element: ChargeElement,
    /// `annual_quantity × billable_days / total_days`, rounded to 3 places.
    pub pro_rata_authorised_quantity: Decimal,
    /// Quantity matched from returns so far.
    pub actual_return_quantity: Decimal,
    /// The most this element could claim from the lines it overlaps.
    pub max_possible_return_quantity: Decimal,
}

impl PreparedChargeElement {
    fn new(element: &ChargeElement) -> EngineResult<Self> {
        validate_charge_element(element)?;

        let pro_rata = element.annual_quantity() * Decimal::from(element.billable_days)
            / Decimal::from(element.total_days);

        Ok(Self {
            element: element.clone(),
            pro_rata_authorised_quantity: round_quantity(pro_rata),
            actual_return_quantity: Decimal::ZERO,
            max_possible_return_quantity: Decimal::ZERO,
        })
    }

    /// The null-volume result reported when billing cannot use returns.
    pub fn null_billing_result(&self, error: StatusCode) -> MatchResult {
        MatchResult {
            charge_element_id: self.element.id,
            pro_rata_authorised_quantity: self.pro_rata_authorised_quantity,
            actual_return_quantity: None,
            error: Some(error),
        }
    }
}

/// Prepared charge elements in matching priority order.
///
/// Elements are ordered by ascending `billable_days`, ties keeping their input
/// order. The order decides which element a shared return line fills first
/// and which element of a group receives quantity first, so the only way to
/// obtain this type is [`prepare_charge_elements`], and nothing can reorder it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritisedChargeElements(Vec<PreparedChargeElement>);

impl PrioritisedChargeElements {
    /// Iterates the elements in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, PreparedChargeElement> {
        self.0.iter()
    }

    /// Iterates the elements mutably, in priority order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PreparedChargeElement> {
        self.0.iter_mut()
    }

    /// The number of prepared elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no element qualified for two-part tariff.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Null-volume results for every element, in priority order.
    pub fn null_billing_results(&self, error: StatusCode) -> Vec<MatchResult> {
        self.0.iter().map(|e| e.null_billing_result(error)).collect()
    }
}

/// Prepares charge elements for matching.
///
/// Keeps only two-part tariff elements, computes each one's pro-rata
/// authorised quantity, zeroes the running quantities and sorts by ascending
/// `billable_days`.
///
/// # Errors
///
/// Returns `InvalidChargeElement` for a two-part tariff element with zero
/// `total_days`, an inverted date range or time-limited period, an impossible
/// abstraction period, or a negative annual quantity.
///
/// # Example
///
/// ```
/// use two_part_tariff::matching::prepare_charge_elements;
/// use two_part_tariff::models::{AbstractionPeriod, ChargeElement, Season, Source};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let element = ChargeElement {
///     id: Uuid::new_v4(),
///     source: Source::Unsupported,
///     season: Season::AllYear,
///     purpose_tertiary_code: 400,
///     is_two_part_tariff: true,
///     start_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
///     abstraction_period: AbstractionPeriod::ALL_YEAR,
///     time_limited_period: None,
///     authorised_annual_quantity: Decimal::new(365, 0),
///     billable_annual_quantity: None,
///     total_days: 365,
///     billable_days: 183,
/// };
///
/// let prepared = prepare_charge_elements(&[element]).unwrap();
/// let first = prepared.iter().next().unwrap();
/// assert_eq!(first.pro_rata_authorised_quantity.to_string(), "183.000");
/// ```
pub fn prepare_charge_elements(
    charge_elements: &[ChargeElement],
) -> EngineResult<PrioritisedChargeElements> {
    let mut prepared = charge_elements
        .iter()
        .filter(|e| e.is_two_part_tariff)
        .map(PreparedChargeElement::new)
        .collect::<EngineResult<Vec<_>>>()?;

    // sort_by_key is stable, so equal billable_days keep input order
    prepared.sort_by_key(|e| e.element.billable_days);

    Ok(PrioritisedChargeElements(prepared))
}

fn validate_charge_element(element: &ChargeElement) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidChargeElement {
        charge_element_id: element.id,
        message,
    };

    if element.total_days == 0 {
        return Err(invalid("total_days must be greater than zero".to_string()));
    }
    if element.date_range().is_inverted() {
        return Err(invalid(format!(
            "end date {} is before start date {}",
            element.end_date, element.start_date
        )));
    }
    if let Some(period) = element.time_limited_period
        && period.is_inverted()
    {
        return Err(invalid(format!(
            "time-limited period ends {} before it starts {}",
            period.end_date, period.start_date
        )));
    }
    if element.annual_quantity() < Decimal::ZERO {
        return Err(invalid(format!(
            "annual quantity {} is negative",
            element.annual_quantity()
        )));
    }
    element.abstraction_period.validate().map_err(invalid)
}
