//! Valuation configuration.
//!
//! The two user-tunable rates of the DCF model. Everything else (growth cap,
//! stable-stage growth) is a model constant.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Supported discount rate range.
pub const DISCOUNT_RATE_RANGE: RangeInclusive<f64> = 0.01..=0.20;

/// Supported terminal growth rate range.
pub const TERMINAL_GROWTH_RANGE: RangeInclusive<f64> = 0.00..=0.05;

/// Default discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.09;

/// Default terminal growth rate.
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 0.03;

/// Rates applied by the DCF model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Annual discount rate as a fraction (default: 0.09).
    pub discount_rate: f64,

    /// Perpetual growth rate after year 10 as a fraction (default: 0.03).
    pub terminal_growth_rate: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
        }
    }
}

impl ValuationConfig {
    /// Create a configuration without validating it.
    #[must_use]
    pub const fn new(discount_rate: f64, terminal_growth_rate: f64) -> Self {
        Self {
            discount_rate,
            terminal_growth_rate,
        }
    }

    /// Check ranges and that the terminal value converges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for non-finite or out-of-range rates, or when
    /// the discount rate does not exceed the terminal growth rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.discount_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "discount_rate",
            });
        }
        if !self.terminal_growth_rate.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "terminal_growth_rate",
            });
        }
        if !DISCOUNT_RATE_RANGE.contains(&self.discount_rate) {
            return Err(ConfigError::DiscountRateOutOfRange {
                value: self.discount_rate,
                min: *DISCOUNT_RATE_RANGE.start(),
                max: *DISCOUNT_RATE_RANGE.end(),
            });
        }
        if !TERMINAL_GROWTH_RANGE.contains(&self.terminal_growth_rate) {
            return Err(ConfigError::TerminalGrowthOutOfRange {
                value: self.terminal_growth_rate,
                min: *TERMINAL_GROWTH_RANGE.start(),
                max: *TERMINAL_GROWTH_RANGE.end(),
            });
        }
        if self.discount_rate <= self.terminal_growth_rate {
            return Err(ConfigError::DivergentTerminalValue {
                discount_rate: self.discount_rate,
                terminal_growth_rate: self.terminal_growth_rate,
            });
        }
        Ok(())
    }

    /// Validate and return self.
    ///
    /// # Errors
    ///
    /// See [`ValuationConfig::validate`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = ValuationConfig::default();
        assert_relative_eq!(config.discount_rate, 0.09);
        assert_relative_eq!(config.terminal_growth_rate, 0.03);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(ValuationConfig::new(0.01, 0.0).validate().is_ok());
        assert!(ValuationConfig::new(0.20, 0.05).validate().is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            ValuationConfig::new(0.25, 0.03).validate(),
            Err(ConfigError::DiscountRateOutOfRange { .. })
        ));
        assert!(matches!(
            ValuationConfig::new(0.09, 0.06).validate(),
            Err(ConfigError::TerminalGrowthOutOfRange { .. })
        ));
        assert!(matches!(
            ValuationConfig::new(f64::NAN, 0.03).validate(),
            Err(ConfigError::NonFinite { field: "discount_rate" })
        ));
    }

    #[test]
    fn test_divergent_terminal_value() {
        let result = ValuationConfig::new(0.03, 0.03).validate();
        assert!(matches!(
            result,
            Err(ConfigError::DivergentTerminalValue { .. })
        ));
        assert!(ValuationConfig::new(0.02, 0.04).validated().is_err());
    }
}
