//! Core data models for the two-part tariff matching engine.
//!
//! This module contains all the domain models used throughout the engine.

mod abstraction_period;
mod charge_element;
mod date_range;
mod invoice_licence;
mod match_result;
mod return_record;

pub use abstraction_period::{AbstractionPeriod, is_within_abstraction_period};
pub use charge_element::{ChargeElement, Season, Source};
pub use date_range::DateRange;
pub use invoice_licence::{InvoiceLicence, Transaction};
pub use match_result::{MatchOutcome, MatchResult, StatusCategory, StatusCode};
pub use return_record::{ReturnLine, ReturnPurpose, ReturnRecord, ReturnStatus};
