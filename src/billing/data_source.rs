//! The boundary to the billing platform's record store.

use crate::error::EngineResult;
use crate::models::{ChargeElement, InvoiceLicence, ReturnRecord};

/// Supplies the charge elements and returns for an invoice licence.
///
/// Implementations wrap whatever store holds charge versions and returns.
/// They are called from blocking worker threads, one call per invoice
/// licence, so they must be shareable across threads.
///
/// Errors should be reported as [`EngineError::DataSource`] naming the
/// invoice licence.
///
/// [`EngineError::DataSource`]: crate::error::EngineError::DataSource
pub trait BillingDataSource: Send + Sync {
    /// Charge elements in force for the invoice licence's billing period.
    fn charge_elements(
        &self,
        invoice_licence: &InvoiceLicence,
    ) -> EngineResult<Vec<ChargeElement>>;

    /// Returns for the invoice licence's licence and billing period.
    fn returns(&self, invoice_licence: &InvoiceLicence) -> EngineResult<Vec<ReturnRecord>>;
}
