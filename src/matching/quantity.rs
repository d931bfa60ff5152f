//! Quantity rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits every reported quantity carries.
pub const QUANTITY_DECIMAL_PLACES: u32 = 3;

/// Rounds a quantity to three decimal places, halves away from zero.
///
/// The result always carries exactly three fractional digits, so `12`
/// becomes `12.000`.
///
/// # Example
///
/// ```
/// use two_part_tariff::matching::round_quantity;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_quantity(Decimal::from_str("1.2345").unwrap()).to_string(), "1.235");
/// assert_eq!(round_quantity(Decimal::from(12)).to_string(), "12.000");
/// ```
pub fn round_quantity(quantity: Decimal) -> Decimal {
    let mut rounded = quantity
        .round_dp_with_strategy(QUANTITY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(QUANTITY_DECIMAL_PLACES);
    rounded
}
