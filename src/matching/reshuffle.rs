//! Group reallocation ("reshuffle").
//!
//! Charge elements that share billing factors form a group of one base
//! element and its time-limited sub-elements. The quantity matched across a
//! group is redistributed in priority order: each element is filled up to
//! the smaller of its authorised quantity and what it could have claimed from
//! the return lines. Anything left over is placed on the base element, which
//! then carries `OVER_ABSTRACTION` when the group took more than it is
//! authorised for.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AbstractionPeriod, MatchOutcome, MatchResult, StatusCode};

use super::charge_element_preparation::{PreparedChargeElement, PrioritisedChargeElements};
use super::quantity::round_quantity;

/// A base element and the time-limited sub-elements that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementGroup<'a> {
    /// The element without a time-limited period.
    pub base_element: &'a PreparedChargeElement,
    /// Matching sub-elements, in priority order.
    pub sub_elements: Vec<&'a PreparedChargeElement>,
}

impl<'a> ElementGroup<'a> {
    /// The group's elements in fill order: base first, then sub-elements.
    pub fn elements(&self) -> impl Iterator<Item = &'a PreparedChargeElement> + '_ {
        std::iter::once(self.base_element).chain(self.sub_elements.iter().copied())
    }
}

/// The reallocated results for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAllocation {
    /// One result per group element, base first.
    pub results: Vec<MatchResult>,
    /// `OVER_ABSTRACTION` if the group's matched total exceeds its authorised total.
    pub error: Option<StatusCode>,
}

/// Checks whether `sub` is a time-limited sub-element of `base`.
///
/// Source, season and purpose must match, and both ends of the sub-element's
/// abstraction period, placed in the year the sub-element starts, must fall
/// inside the base element's abstraction period.
pub fn is_sub_element_of(base: &PreparedChargeElement, sub: &PreparedChargeElement) -> bool {
    let (base, sub) = (&base.element, &sub.element);

    if sub.source != base.source
        || sub.season != base.season
        || sub.purpose_tertiary_code != base.purpose_tertiary_code
    {
        return false;
    }

    let (start, end) = match reference_dates(&sub.abstraction_period, sub.start_date.year()) {
        Some(dates) => dates,
        None => return false,
    };
    base.abstraction_period.is_within(start) && base.abstraction_period.is_within(end)
}

/// The abstraction period's boundaries as dates in the given year.
///
/// A 29 February boundary falls back to 28 February in non-leap years.
fn reference_dates(period: &AbstractionPeriod, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        date_in_year(year, period.start_month, period.start_day)?,
        date_in_year(year, period.end_month, period.end_day)?,
    ))
}

fn date_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

/// Groups matched elements into base elements and their sub-elements.
///
/// Groups follow the priority order of their base elements. A sub-element is
/// added to every base it matches; one that matches no base is left out of
/// reallocation altogether.
pub fn group_charge_elements(elements: &PrioritisedChargeElements) -> Vec<ElementGroup<'_>> {
    let (subs, bases): (Vec<_>, Vec<_>) = elements
        .iter()
        .partition(|e| e.element.is_time_limited());

    let groups: Vec<ElementGroup<'_>> = bases
        .into_iter()
        .map(|base| ElementGroup {
            base_element: base,
            sub_elements: subs
                .iter()
                .copied()
                .filter(|sub| is_sub_element_of(base, sub))
                .collect(),
        })
        .collect();

    for orphan in subs
        .iter()
        .filter(|sub| !groups.iter().any(|g| g.sub_elements.contains(*sub)))
    {
        warn!(
            charge_element_id = %orphan.element.id,
            actual_return_quantity = %orphan.actual_return_quantity,
            "Time-limited charge element matches no base element; excluded from reallocation"
        );
    }

    groups
}

/// Redistributes a group's matched quantity in fill order.
///
/// # Example
///
/// With a base element authorised for 100 and two sub-elements authorised
/// for 50 each, matched at 75, 50 and 100, the group has 225 against 200
/// authorised. The fill gives 100, 50 and 50, and the 25 left over is added
/// to the base element, which reports 125 with `OVER_ABSTRACTION`.
pub fn reallocate_group(group: &ElementGroup<'_>) -> GroupAllocation {
    let total_billable: Decimal = group.elements().map(|e| e.pro_rata_authorised_quantity).sum();
    let total_actual: Decimal = group.elements().map(|e| e.actual_return_quantity).sum();

    let error = (total_actual > total_billable).then_some(StatusCode::OverAbstraction);

    let mut remaining = total_actual;
    let mut allocations: Vec<Decimal> = group
        .elements()
        .map(|e| {
            let allocation = remaining
                .min(e.pro_rata_authorised_quantity)
                .min(e.max_possible_return_quantity);
            remaining -= allocation;
            allocation
        })
        .collect();

    let mut first_error = None;
    if remaining > Decimal::ZERO {
        allocations[0] += remaining;
        first_error = error;
    }

    let results = group
        .elements()
        .zip(allocations)
        .enumerate()
        .map(|(index, (element, allocation))| MatchResult {
            charge_element_id: element.element.id,
            pro_rata_authorised_quantity: element.pro_rata_authorised_quantity,
            actual_return_quantity: Some(round_quantity(allocation)),
            error: if index == 0 { first_error } else { None },
        })
        .collect();

    GroupAllocation { results, error }
}

/// Groups and reallocates matched elements into the engine's outcome.
///
/// Results are flattened in group order. The outcome's error is the first
/// group error found, in group order.
pub fn reshuffle_quantities(elements: &PrioritisedChargeElements) -> MatchOutcome {
    let mut error = None;
    let mut data = Vec::with_capacity(elements.len());

    for group in group_charge_elements(elements) {
        let allocation = reallocate_group(&group);
        error = error.or(allocation.error);
        data.extend(allocation.results);
    }

    MatchOutcome {
        error,
        data: Some(data),
    }
}
