//! The returns matching entry point.

use tracing::{debug, info, warn};

use crate::config::MatchingConfig;
use crate::error::EngineResult;
use crate::models::{ChargeElement, MatchOutcome, ReturnRecord};

use super::charge_element_preparation::prepare_charge_elements;
use super::line_matching::match_returns;
use super::reshuffle::reshuffle_quantities;
use super::return_preparation::prepare_returns;
use super::return_validation::{ReturnsAssessment, assess_returns, filter_two_part_tariff_returns};

/// Matches a licence's returns to its charge elements.
///
/// Runs the full pipeline for one invoice licence:
/// 1. keep the returns with a two-part tariff purpose and validate them
/// 2. prepare the two-part tariff charge elements in priority order
/// 3. stop with a blocking status, or report null-volume results for a
///    null-billing status
/// 4. otherwise prepare the return lines, match them to the elements and
///    reallocate quantities within each element group
///
/// Every call works on its own copies of the elements and lines, so calls
/// for different invoice licences may run concurrently.
///
/// # Errors
///
/// Returns an error only for input that cannot be processed at all, such as
/// a configuration that fails [`MatchingConfig::validate`], a charge element
/// with zero `total_days` or a return line that ends before it starts.
/// Billing conditions are reported in the outcome instead.
///
/// # Example
///
/// ```
/// use two_part_tariff::config::MatchingConfig;
/// use two_part_tariff::matching::match_returns_to_charge_elements;
/// use two_part_tariff::models::StatusCode;
///
/// let outcome = match_returns_to_charge_elements(&[], &[], &MatchingConfig::default()).unwrap();
/// assert_eq!(outcome.error, Some(StatusCode::NoReturnsForMatching));
/// assert!(outcome.data.is_none());
/// ```
pub fn match_returns_to_charge_elements(
    charge_elements: &[ChargeElement],
    returns: &[ReturnRecord],
    config: &MatchingConfig,
) -> EngineResult<MatchOutcome> {
    config.validate()?;

    let tpt_returns = filter_two_part_tariff_returns(returns, config);
    let assessment = assess_returns(&tpt_returns, config);
    let elements = prepare_charge_elements(charge_elements)?;

    debug!(
        charge_elements = charge_elements.len(),
        tpt_charge_elements = elements.len(),
        returns = returns.len(),
        tpt_returns = tpt_returns.len(),
        "Matching returns to charge elements"
    );

    match assessment {
        ReturnsAssessment::Blocked(status) => {
            warn!(status = ?status, "Returns block two-part tariff matching");
            Ok(MatchOutcome::blocked(status))
        }
        ReturnsAssessment::NullBilling(status) => {
            warn!(status = ?status, "Returns require null-volume billing");
            Ok(MatchOutcome {
                error: Some(status),
                data: Some(elements.null_billing_results(status)),
            })
        }
        ReturnsAssessment::Proceed => {
            let mut prepared_returns = prepare_returns(&tpt_returns, config)?;
            let matched = match_returns(elements, &mut prepared_returns);
            let outcome = reshuffle_quantities(&matched);

            info!(
                results = outcome.data.as_ref().map_or(0, Vec::len),
                status = ?outcome.error,
                "Returns matched to charge elements"
            );
            Ok(outcome)
        }
    }
}
