//! Return line preparation.
//!
//! Strips return lines down to the ones that can be billed and converts their
//! quantities to billing units.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::MatchingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, ReturnRecord};

/// A return line ready for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedReturnLine {
    /// First day of the reported sub-period.
    pub start_date: NaiveDate,
    /// Last day of the reported sub-period.
    pub end_date: NaiveDate,
    /// Reported quantity in billing units.
    pub quantity: Decimal,
    /// How much of `quantity` has been handed to charge elements so far.
    /// Only ever increases, and never exceeds `quantity`.
    pub quantity_allocated: Decimal,
}

impl PreparedReturnLine {
    /// The sub-period covered by this line.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Quantity not yet handed to any charge element.
    pub fn unallocated_quantity(&self) -> Decimal {
        self.quantity - self.quantity_allocated
    }
}

/// A return reduced to what matching needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedReturn {
    /// The return's identifier.
    pub return_id: String,
    /// Tertiary codes of the return's declared purposes.
    pub purpose_codes: Vec<u32>,
    /// Lines that survived preparation, in their original order.
    pub lines: Vec<PreparedReturnLine>,
}

impl PreparedReturn {
    /// Checks whether the return declares the given purpose.
    pub fn has_purpose(&self, tertiary_code: u32) -> bool {
        self.purpose_codes.contains(&tertiary_code)
    }
}

/// Prepares returns for matching.
///
/// Keeps lines with a positive quantity whose start or end date falls inside
/// the return's own abstraction period, divides each quantity by the
/// configured divisor, and starts every line with nothing allocated.
///
/// # Errors
///
/// Returns `InvalidConfig` when the configuration fails validation, and
/// `InvalidReturn` when a return's abstraction period is impossible or one of
/// its lines ends before it starts.
pub fn prepare_returns(
    returns: &[&ReturnRecord],
    config: &MatchingConfig,
) -> EngineResult<Vec<PreparedReturn>> {
    config.validate()?;

    returns.iter().map(|r| prepare_return(r, config)).collect()
}

fn prepare_return(ret: &ReturnRecord, config: &MatchingConfig) -> EngineResult<PreparedReturn> {
    ret.abstraction_period
        .validate()
        .map_err(|message| EngineError::InvalidReturn {
            return_id: ret.id.clone(),
            message,
        })?;

    let divisor = Decimal::from(config.return_quantity_divisor);
    let mut lines = Vec::new();

    for line in ret.lines.iter().flatten() {
        if line.date_range().is_inverted() {
            return Err(EngineError::InvalidReturn {
                return_id: ret.id.clone(),
                message: format!(
                    "line ends {} before it starts {}",
                    line.end_date, line.start_date
                ),
            });
        }

        let Some(quantity) = line.quantity.filter(|q| *q > Decimal::ZERO) else {
            continue;
        };

        let in_period = ret.abstraction_period.is_within(line.start_date)
            || ret.abstraction_period.is_within(line.end_date);
        if !in_period {
            continue;
        }

        lines.push(PreparedReturnLine {
            start_date: line.start_date,
            end_date: line.end_date,
            quantity: quantity / divisor,
            quantity_allocated: Decimal::ZERO,
        });
    }

    Ok(PreparedReturn {
        return_id: ret.id.clone(),
        purpose_codes: ret.purposes.iter().map(|p| p.tertiary_code).collect(),
        lines,
    })
}
