//! Return validation.
//!
//! Decides whether a licence's returns can be matched at all. The checks run
//! in a fixed priority order and only the first status found is reported.
//!
//! | Order | Condition                                        | Status                    |
//! |-------|--------------------------------------------------|---------------------------|
//! | 1     | no relevant returns, or a return has no lines    | `NO_RETURNS_FOR_MATCHING` |
//! | 2     | all / some returns due                           | `NO_RETURNS_SUBMITTED` / `SOME_RETURNS_DUE` |
//! | 3     | a return received after the grace period         | `LATE_RETURNS`            |
//! | 4     | a return under query                             | `UNDER_QUERY`             |
//! | 5     | a return received but not completed              | `RECEIVED_NO_DATA`        |

use chrono::Days;

use crate::config::MatchingConfig;
use crate::models::{ReturnRecord, ReturnStatus, StatusCategory, StatusCode};

/// A single validation rule over the relevant returns.
type ReturnCheck = fn(&[&ReturnRecord], &MatchingConfig) -> Option<StatusCode>;

/// Validation rules in priority order.
const RETURN_CHECKS: [ReturnCheck; 5] = [
    check_returns_available,
    check_due_returns,
    check_late_returns,
    check_under_query,
    check_received_returns,
];

/// What the returns allow the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnsAssessment {
    /// Matching cannot run and no per-element results are produced.
    Blocked(StatusCode),
    /// Every element is billed at null volume with this status.
    NullBilling(StatusCode),
    /// Returns can be matched to charge elements.
    Proceed,
}

/// Keeps the returns that declare a two-part tariff purpose.
pub fn filter_two_part_tariff_returns<'a>(
    returns: &'a [ReturnRecord],
    config: &MatchingConfig,
) -> Vec<&'a ReturnRecord> {
    returns
        .iter()
        .filter(|r| r.has_any_purpose(&config.two_part_tariff_purpose_codes))
        .collect()
}

/// Runs the validation rules in order and returns the first status found.
///
/// `returns` should already be filtered to two-part tariff returns.
///
/// # Example
///
/// ```
/// use two_part_tariff::config::MatchingConfig;
/// use two_part_tariff::matching::evaluate_returns;
/// use two_part_tariff::models::StatusCode;
///
/// let status = evaluate_returns(&[], &MatchingConfig::default());
/// assert_eq!(status, Some(StatusCode::NoReturnsForMatching));
/// ```
pub fn evaluate_returns(
    returns: &[&ReturnRecord],
    config: &MatchingConfig,
) -> Option<StatusCode> {
    RETURN_CHECKS
        .iter()
        .find_map(|check| check(returns, config))
}

/// Classifies the returns by the first status found.
pub fn assess_returns(returns: &[&ReturnRecord], config: &MatchingConfig) -> ReturnsAssessment {
    match evaluate_returns(returns, config) {
        None => ReturnsAssessment::Proceed,
        Some(status) if status.category() == StatusCategory::Blocking => {
            ReturnsAssessment::Blocked(status)
        }
        Some(status) => ReturnsAssessment::NullBilling(status),
    }
}

fn check_returns_available(
    returns: &[&ReturnRecord],
    _config: &MatchingConfig,
) -> Option<StatusCode> {
    if returns.is_empty() || returns.iter().any(|r| r.lines.is_none()) {
        return Some(StatusCode::NoReturnsForMatching);
    }
    None
}

fn check_due_returns(returns: &[&ReturnRecord], _config: &MatchingConfig) -> Option<StatusCode> {
    let due = returns
        .iter()
        .filter(|r| r.status == ReturnStatus::Due)
        .count();

    match due {
        0 => None,
        n if n == returns.len() => Some(StatusCode::NoReturnsSubmitted),
        _ => Some(StatusCode::SomeReturnsDue),
    }
}

/// The cutoff is anchored on the first return's due date, not each return's
/// own. Billing has always worked this way; changing it changes which
/// licences get null-billed.
fn check_late_returns(returns: &[&ReturnRecord], config: &MatchingConfig) -> Option<StatusCode> {
    let first = returns.first()?;
    let grace_days = u64::try_from(config.late_return_grace_period_days).unwrap_or(0);
    let cutoff = first.due_date.checked_add_days(Days::new(grace_days))?;

    returns
        .iter()
        .filter_map(|r| r.received_date)
        .any(|received| received > cutoff)
        .then_some(StatusCode::LateReturns)
}

fn check_under_query(returns: &[&ReturnRecord], _config: &MatchingConfig) -> Option<StatusCode> {
    returns
        .iter()
        .any(|r| r.under_query)
        .then_some(StatusCode::UnderQuery)
}

fn check_received_returns(
    returns: &[&ReturnRecord],
    _config: &MatchingConfig,
) -> Option<StatusCode> {
    returns
        .iter()
        .any(|r| r.status == ReturnStatus::Received)
        .then_some(StatusCode::ReceivedNoData)
}
