//! Orchestration of two-part tariff matching across invoice licences.
//!
//! This module connects the matching engine to billing records:
//! - [`BillingDataSource`] supplies charge elements and returns
//! - [`apply_match_outcome`] writes results onto transactions
//! - [`process_batch`] runs a batch of invoice licences concurrently

mod batch;
mod data_source;
mod transactions;

pub use batch::{ProcessedInvoiceLicence, process_batch, process_invoice_licence};
pub use data_source::BillingDataSource;
pub use transactions::apply_match_outcome;
