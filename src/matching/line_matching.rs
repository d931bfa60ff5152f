//! Return line to charge element matching.
//!
//! Each charge element, in priority order, walks every line of every return
//! that shares its purpose. Where a line overlaps the element, the element
//! takes the line's pro-rata share for the overlapping days.
//!
//! ## Shared lines
//!
//! One line can overlap several elements, typically a base element and its
//! time-limited sub-elements. `quantity_allocated` on the line records how
//! much has already been handed out, so a later element only receives what is
//! still unallocated, capped at its own pro-rata share. The element's
//! `max_possible_return_quantity` always grows by the full pro-rata share, so
//! reallocation knows what each element could have claimed.
//!
//! Allocation is tracked per line, not per day. Two elements covering the
//! same days of a longer line can therefore take more than those days' share
//! between them: the second receives what the first left, up to its own
//! pro-rata share, even when that remainder came from days it does not cover.

use rust_decimal::Decimal;

use crate::models::DateRange;

use super::charge_element_preparation::{PreparedChargeElement, PrioritisedChargeElements};
use super::return_preparation::{PreparedReturn, PreparedReturnLine};

/// Matches prepared return lines onto prepared charge elements.
///
/// Consumes the elements and hands them back with their running quantities
/// updated, still in priority order. The lines' `quantity_allocated` values
/// are updated in place; both belong to this one matching run.
pub fn match_returns(
    mut elements: PrioritisedChargeElements,
    returns: &mut [PreparedReturn],
) -> PrioritisedChargeElements {
    for element in elements.iter_mut() {
        let purpose = element.element.purpose_tertiary_code;

        for ret in returns.iter_mut().filter(|r| r.has_purpose(purpose)) {
            for line in ret.lines.iter_mut() {
                match_line(element, line);
            }
        }
    }
    elements
}

/// Checks whether a line can contribute to an element.
///
/// The date ranges must share at least one day, and the line must start or
/// end inside the element's abstraction period.
pub fn line_overlaps_element(element: &PreparedChargeElement, line: &PreparedReturnLine) -> bool {
    let period = &element.element.abstraction_period;

    element.element.date_range().overlaps(&line.date_range())
        && (period.is_within(line.start_date) || period.is_within(line.end_date))
}

/// The part of a line's quantity that falls inside a date range, by days.
///
/// `quantity × overlapping days / line days`, unrounded. Zero when the
/// ranges do not overlap.
pub fn pro_rata_line_quantity(range: &DateRange, line: &PreparedReturnLine) -> Decimal {
    let line_range = line.date_range();

    match range.intersection(&line_range) {
        Some(overlap) => {
            line.quantity * Decimal::from(overlap.days()) / Decimal::from(line_range.days())
        }
        None => Decimal::ZERO,
    }
}

fn match_line(element: &mut PreparedChargeElement, line: &mut PreparedReturnLine) {
    if !line_overlaps_element(element, line) {
        return;
    }

    let pro_rata = pro_rata_line_quantity(&element.element.date_range(), line);
    element.max_possible_return_quantity += pro_rata;

    if line.quantity > line.quantity_allocated {
        let allocation = pro_rata.min(line.unallocated_quantity());
        element.actual_return_quantity += allocation;
        line.quantity_allocated += allocation;
    }
}
