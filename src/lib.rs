//! Two-part tariff returns matching engine for water abstraction billing.
//!
//! This crate reconciles a licence's authorised abstraction, split into
//! charge elements, against the abstraction returns the licence holder
//! submitted, and works out the volume to bill for each charge element.

#![warn(missing_docs)]

pub mod billing;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
