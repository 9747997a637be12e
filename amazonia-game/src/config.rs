//! Tunables for the time and tax engine.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CRITICAL_VITAL_RATIO, HUNGER_TAX, HUNGRY_HP_TAX, TIRED_HP_TAX};
use crate::range::Range;

/// Errors raised when tax configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must not be negative (got {value})")]
    NegativeTax { field: &'static str, value: Range },
}

/// Per-hour taxes applied whenever the clock advances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeTaxConfig {
    /// Energy or hunger strictly below this share of its maximum costs HP.
    #[serde(default = "TimeTaxConfig::default_critical_ratio")]
    pub critical_ratio: f64,
    #[serde(default = "TimeTaxConfig::default_tired_hp_tax")]
    pub tired_hp_tax: Range,
    #[serde(default = "TimeTaxConfig::default_hungry_hp_tax")]
    pub hungry_hp_tax: Range,
    #[serde(default = "TimeTaxConfig::default_hunger_tax")]
    pub hunger_tax: Range,
}

impl TimeTaxConfig {
    const fn default_critical_ratio() -> f64 {
        CRITICAL_VITAL_RATIO
    }

    const fn default_tired_hp_tax() -> Range {
        TIRED_HP_TAX
    }

    const fn default_hungry_hp_tax() -> Range {
        HUNGRY_HP_TAX
    }

    const fn default_hunger_tax() -> Range {
        HUNGER_TAX
    }

    #[must_use]
    pub const fn default_config() -> Self {
        Self {
            critical_ratio: CRITICAL_VITAL_RATIO,
            tired_hp_tax: TIRED_HP_TAX,
            hungry_hp_tax: HUNGRY_HP_TAX,
            hunger_tax: HUNGER_TAX,
        }
    }

    /// Load tax configuration from a JSON string; omitted fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates its documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.critical_ratio) {
            return Err(ConfigError::RangeViolation {
                field: "critical_ratio",
                min: 0.0,
                max: 1.0,
                value: self.critical_ratio,
            });
        }
        for (field, value) in [
            ("tired_hp_tax", self.tired_hp_tax),
            ("hungry_hp_tax", self.hungry_hp_tax),
            ("hunger_tax", self.hunger_tax),
        ] {
            if value.min() < 0.0 {
                return Err(ConfigError::NegativeTax { field, value });
            }
        }
        Ok(())
    }
}

impl Default for TimeTaxConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
