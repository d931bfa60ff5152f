//! Match result models.
//!
//! This module contains the [`StatusCode`] taxonomy and the [`MatchOutcome`]
//! returned by the engine for one invoice licence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a status code affects billing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// No per-element results are produced; the item waits for a later run.
    Blocking,
    /// Every qualifying element is billed with a null volume.
    NullBilling,
    /// Billing proceeds; the status flags the invoice for review.
    Advisory,
}

/// A two-part tariff status attached to an outcome or a single element.
///
/// # Example
///
/// ```
/// use two_part_tariff::models::{StatusCategory, StatusCode};
///
/// assert_eq!(StatusCode::LateReturns.code(), 50);
/// assert_eq!(StatusCode::LateReturns.category(), StatusCategory::NullBilling);
/// assert_eq!(
///     serde_json::to_string(&StatusCode::OverAbstraction).unwrap(),
///     "\"OVER_ABSTRACTION\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    /// Every relevant return is still due.
    NoReturnsSubmitted,
    /// A relevant return is under query.
    UnderQuery,
    /// A relevant return has been received but not finalised.
    ReceivedNoData,
    /// Some relevant returns are still due.
    SomeReturnsDue,
    /// A relevant return was received after the grace period.
    LateReturns,
    /// A group's returned quantity exceeds its authorised quantity.
    OverAbstraction,
    /// There are no relevant returns, or a return has no line data.
    NoReturnsForMatching,
}

impl StatusCode {
    /// The numeric code stored against billing transactions.
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::NoReturnsSubmitted => 10,
            StatusCode::UnderQuery => 20,
            StatusCode::ReceivedNoData => 30,
            StatusCode::SomeReturnsDue => 40,
            StatusCode::LateReturns => 50,
            StatusCode::OverAbstraction => 60,
            StatusCode::NoReturnsForMatching => 70,
        }
    }

    /// How this status affects billing.
    pub fn category(&self) -> StatusCategory {
        match self {
            StatusCode::NoReturnsForMatching
            | StatusCode::UnderQuery
            | StatusCode::ReceivedNoData => StatusCategory::Blocking,
            StatusCode::NoReturnsSubmitted
            | StatusCode::SomeReturnsDue
            | StatusCode::LateReturns => StatusCategory::NullBilling,
            StatusCode::OverAbstraction => StatusCategory::Advisory,
        }
    }

    /// Returns `true` if no per-element results are produced for this status.
    pub fn is_blocking(&self) -> bool {
        self.category() == StatusCategory::Blocking
    }
}

/// The billable quantity computed for one charge element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The charge element this result belongs to.
    pub charge_element_id: Uuid,
    /// The element's pro-rata authorised quantity (3 decimal places).
    pub pro_rata_authorised_quantity: Decimal,
    /// The quantity to bill (3 decimal places), `None` under null billing.
    pub actual_return_quantity: Option<Decimal>,
    /// A status specific to this element.
    pub error: Option<StatusCode>,
}

/// The engine's result for one invoice licence.
///
/// `data` is `None` when a blocking status stops matching altogether.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// The overall status for the invocation.
    pub error: Option<StatusCode>,
    /// Per-element results, absent when blocked.
    pub data: Option<Vec<MatchResult>>,
}

impl MatchOutcome {
    /// An outcome with no per-element results.
    pub fn blocked(error: StatusCode) -> Self {
        Self {
            error: Some(error),
            data: None,
        }
    }

    /// Returns `true` if no per-element results were produced.
    pub fn is_blocked(&self) -> bool {
        self.data.is_none()
    }

    /// Looks up the result for a charge element.
    pub fn result_for(&self, charge_element_id: Uuid) -> Option<&MatchResult> {
        self.data
            .as_ref()?
            .iter()
            .find(|r| r.charge_element_id == charge_element_id)
    }
}
