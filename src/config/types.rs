//! Configuration types for returns matching.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from the YAML configuration file.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Purpose tertiary codes billed under two-part tariff.
pub const DEFAULT_TWO_PART_TARIFF_PURPOSE_CODES: [u32; 5] = [380, 390, 400, 410, 420];

/// Days after a return's due date before it counts as late.
pub const DEFAULT_LATE_RETURN_GRACE_PERIOD_DAYS: i64 = 21;

/// Divisor converting return quantities (cubic metres) to billing units (megalitres).
pub const DEFAULT_RETURN_QUANTITY_DIVISOR: u32 = 1000;

/// Settings that control returns matching.
///
/// # Example
///
/// ```
/// use two_part_tariff::config::MatchingConfig;
///
/// let config = MatchingConfig::default();
/// assert!(config.is_two_part_tariff_purpose(400));
/// assert!(!config.is_two_part_tariff_purpose(160));
/// assert_eq!(config.late_return_grace_period_days, 21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Purpose tertiary codes that make a return relevant to two-part tariff.
    #[serde(default = "default_purpose_codes")]
    pub two_part_tariff_purpose_codes: Vec<u32>,
    /// Grace period after the due date, in days.
    #[serde(default = "default_grace_period_days")]
    pub late_return_grace_period_days: i64,
    /// Divisor applied to every return line quantity.
    #[serde(default = "default_quantity_divisor")]
    pub return_quantity_divisor: u32,
}

fn default_purpose_codes() -> Vec<u32> {
    DEFAULT_TWO_PART_TARIFF_PURPOSE_CODES.to_vec()
}

fn default_grace_period_days() -> i64 {
    DEFAULT_LATE_RETURN_GRACE_PERIOD_DAYS
}

fn default_quantity_divisor() -> u32 {
    DEFAULT_RETURN_QUANTITY_DIVISOR
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            two_part_tariff_purpose_codes: default_purpose_codes(),
            late_return_grace_period_days: default_grace_period_days(),
            return_quantity_divisor: default_quantity_divisor(),
        }
    }
}

impl MatchingConfig {
    /// Checks whether a purpose tertiary code is billed under two-part tariff.
    pub fn is_two_part_tariff_purpose(&self, tertiary_code: u32) -> bool {
        self.two_part_tariff_purpose_codes.contains(&tertiary_code)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.two_part_tariff_purpose_codes.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "two_part_tariff_purpose_codes must not be empty".to_string(),
            });
        }
        if self.late_return_grace_period_days < 0 {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "late_return_grace_period_days must not be negative, got {}",
                    self.late_return_grace_period_days
                ),
            });
        }
        if self.return_quantity_divisor == 0 {
            return Err(EngineError::InvalidConfig {
                message: "return_quantity_divisor must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MatchingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: MatchingConfig = serde_yaml::from_str("late_return_grace_period_days: 28").unwrap();
        assert_eq!(config.late_return_grace_period_days, 28);
        assert_eq!(config.two_part_tariff_purpose_codes, vec![380, 390, 400, 410, 420]);
        assert_eq!(config.return_quantity_divisor, 1000);
    }

    #[test]
    fn test_zero_divisor_is_invalid() {
        let config = MatchingConfig {
            return_quantity_divisor: 0,
            ..MatchingConfig::default()
        };
        match config.validate() {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("return_quantity_divisor"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_purpose_codes_are_invalid() {
        let config = MatchingConfig {
            two_part_tariff_purpose_codes: vec![],
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_grace_period_is_invalid() {
        let config = MatchingConfig {
            late_return_grace_period_days: -1,
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
