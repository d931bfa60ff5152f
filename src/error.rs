//! Error types for the two-part tariff matching engine.
//!
//! Domain outcomes such as late returns or over-abstraction are not errors:
//! they travel as [`StatusCode`](crate::models::StatusCode) values inside a
//! [`MatchOutcome`](crate::models::MatchOutcome). The types here cover input
//! that cannot be matched at all, configuration problems and collaborator
//! failures.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the matching engine.
///
/// # Example
///
/// ```
/// use two_part_tariff::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/matching.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/matching.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot work with.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// A charge element was invalid or contained inconsistent data.
    #[error("Invalid charge element '{charge_element_id}': {message}")]
    InvalidChargeElement {
        /// The ID of the invalid charge element.
        charge_element_id: Uuid,
        /// A description of what made the element invalid.
        message: String,
    },

    /// A return was invalid or contained inconsistent data.
    #[error("Invalid return '{return_id}': {message}")]
    InvalidReturn {
        /// The ID of the invalid return.
        return_id: String,
        /// A description of what made the return invalid.
        message: String,
    },

    /// An external collaborator failed to supply data for an invoice licence.
    #[error("Data source failed for invoice licence '{invoice_licence_id}': {message}")]
    DataSource {
        /// The invoice licence being loaded.
        invoice_licence_id: Uuid,
        /// A description of the failure.
        message: String,
    },

    /// A batch worker task did not complete.
    #[error("Batch task failed: {message}")]
    BatchTask {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
