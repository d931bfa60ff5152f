//! Two-part tariff returns matching.
//!
//! This module contains the matching pipeline, one stage per submodule:
//! - Return validation and the billing status it implies
//! - Charge element preparation and priority ordering
//! - Return line preparation and unit conversion
//! - Line to element matching
//! - Group reallocation ("reshuffle") and rounding
//!
//! [`match_returns_to_charge_elements`] runs the stages in order for one
//! invoice licence.

mod charge_element_preparation;
mod engine;
mod line_matching;
mod quantity;
mod reshuffle;
mod return_preparation;
mod return_validation;

pub use charge_element_preparation::{
    PreparedChargeElement, PrioritisedChargeElements, prepare_charge_elements,
};
pub use engine::match_returns_to_charge_elements;
pub use line_matching::{line_overlaps_element, match_returns, pro_rata_line_quantity};
pub use quantity::{QUANTITY_DECIMAL_PLACES, round_quantity};
pub use reshuffle::{
    ElementGroup, GroupAllocation, group_charge_elements, is_sub_element_of, reallocate_group,
    reshuffle_quantities,
};
pub use return_preparation::{PreparedReturn, PreparedReturnLine, prepare_returns};
pub use return_validation::{
    ReturnsAssessment, assess_returns, evaluate_returns, filter_two_part_tariff_returns,
};
