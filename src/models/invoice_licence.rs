//! Invoice licence and billing transaction models.
//!
//! These are the records the orchestrator writes match results onto. Loading
//! and persisting them belongs to the surrounding billing platform.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StatusCode;

/// A billing line for one charge element on an invoice licence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction.
    pub id: Uuid,
    /// The charge element this transaction bills.
    pub charge_element_id: Uuid,
    /// The volume to bill, `None` when billing at null volume.
    #[serde(default)]
    pub volume: Option<Decimal>,
    /// The volume the engine calculated, kept even when not billed.
    #[serde(default)]
    pub calculated_volume: Option<Decimal>,
    /// The two-part tariff status attached to this transaction.
    #[serde(default)]
    pub two_part_tariff_status: Option<StatusCode>,
    /// Whether a two-part tariff status is present.
    #[serde(default)]
    pub two_part_tariff_error: bool,
}

impl Transaction {
    /// Creates an unprocessed transaction for a charge element.
    pub fn new(charge_element_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            charge_element_id,
            volume: None,
            calculated_volume: None,
            two_part_tariff_status: None,
            two_part_tariff_error: false,
        }
    }
}

/// One licence's share of an invoice in a billing batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLicence {
    /// Unique identifier for the invoice licence.
    pub id: Uuid,
    /// The licence reference, e.g. "01/123/R01".
    pub licence_ref: String,
    /// Billing lines on the invoice licence.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
