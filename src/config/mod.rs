//! Configuration loading and management for the matching engine.
//!
//! This module loads the returns matching settings from a YAML file: which
//! purposes are billed under two-part tariff, how long the late-return grace
//! period is, and how return quantities convert to billing units.
//!
//! # Example
//!
//! ```no_run
//! use two_part_tariff::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/two_part_tariff").unwrap();
//! println!("Purposes: {:?}", config.config().two_part_tariff_purpose_codes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_LATE_RETURN_GRACE_PERIOD_DAYS, DEFAULT_RETURN_QUANTITY_DIVISOR,
    DEFAULT_TWO_PART_TARIFF_PURPOSE_CODES, MatchingConfig,
};
