//! Two-stage discounted cash flow valuation.
//!
//! Free cash flow grows at the (capped) estimated rate for five years, then at
//! a fixed stable rate for five more. A Gordon-growth terminal value closes the
//! ten-year horizon. All cash flows are discounted at the configured rate.

use intrinsic_traits::{ConfigError, ValuationConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upper bound on the stage-1 growth rate.
pub const GROWTH_CAP: f64 = 0.25;

/// Growth rate for stage 2.
pub const STABLE_GROWTH_RATE: f64 = 0.06;

/// Years in stage 1.
pub const HIGH_GROWTH_YEARS: i32 = 5;

/// Years in stage 2.
pub const STABLE_GROWTH_YEARS: i32 = 5;

/// Inputs for one valuation. Absent values stay absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfInputs {
    /// Trailing free cash flow.
    pub free_cash_flow: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Current share price.
    pub price: Option<f64>,
    /// Estimated growth rate, before the cap.
    pub growth_rate: f64,
}

/// Result of a valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Intrinsic value per share.
    pub intrinsic_value_per_share: Option<f64>,
    /// `(intrinsic - price) / price`, in percent.
    pub margin_of_safety: Option<f64>,
    /// Stage-1 growth rate actually applied.
    pub high_growth_rate: Option<f64>,
}

impl Valuation {
    /// A valuation with every output unavailable.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            intrinsic_value_per_share: None,
            margin_of_safety: None,
            high_growth_rate: None,
        }
    }
}

/// Two-stage DCF model with a validated configuration.
#[derive(Debug, Clone, Copy)]
pub struct DcfModel {
    config: ValuationConfig,
}

impl Default for DcfModel {
    fn default() -> Self {
        Self {
            config: ValuationConfig::default(),
        }
    }
}

impl DcfModel {
    /// Create a model.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation,
    /// including a discount rate at or below the terminal growth rate.
    pub fn new(config: ValuationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Present value of all projected cash flows plus the terminal value.
    #[must_use]
    pub fn enterprise_value(&self, free_cash_flow: f64, growth_rate: f64) -> f64 {
        let r = self.config.discount_rate;
        let g_t = self.config.terminal_growth_rate;
        let g_high = growth_rate.min(GROWTH_CAP);

        let mut fcf = free_cash_flow;
        let mut total = 0.0;
        let mut year = 0;

        for growth in [(g_high, HIGH_GROWTH_YEARS), (STABLE_GROWTH_RATE, STABLE_GROWTH_YEARS)]
            .into_iter()
            .flat_map(|(g, years)| std::iter::repeat_n(g, years as usize))
        {
            year += 1;
            total += fcf / (1.0 + r).powi(year);
            fcf *= 1.0 + growth;
        }

        let terminal = fcf * (1.0 + g_t) / (r - g_t);
        total + terminal / (1.0 + r).powi(year)
    }

    /// Value one company.
    ///
    /// Missing or zero free cash flow or share count leaves every output
    /// unavailable. A missing or non-positive price leaves only the margin of
    /// safety unavailable.
    #[must_use]
    pub fn value(&self, inputs: &DcfInputs) -> Valuation {
        let fcf = inputs.free_cash_flow.filter(|v| v.is_finite() && *v != 0.0);
        let shares = inputs
            .shares_outstanding
            .filter(|v| v.is_finite() && *v != 0.0);

        let (Some(fcf), Some(shares)) = (fcf, shares) else {
            warn!(
                free_cash_flow = ?inputs.free_cash_flow,
                shares_outstanding = ?inputs.shares_outstanding,
                "DCF unavailable"
            );
            return Valuation::unavailable();
        };

        let intrinsic = self.enterprise_value(fcf, inputs.growth_rate) / shares;
        let margin_of_safety = inputs
            .price
            .filter(|p| p.is_finite() && *p > 0.0)
            .map(|price| (intrinsic - price) / price * 100.0);

        Valuation {
            intrinsic_value_per_share: Some(intrinsic),
            margin_of_safety,
            high_growth_rate: Some(inputs.growth_rate.min(GROWTH_CAP)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn aaa() -> DcfInputs {
        DcfInputs {
            free_cash_flow: Some(10.0e9),
            shares_outstanding: Some(1.0e9),
            price: Some(100.0),
            growth_rate: 0.10,
        }
    }

    #[test]
    fn test_reference_valuation() {
        let valuation = DcfModel::default().value(&aaa());
        assert_abs_diff_eq!(
            valuation.intrinsic_value_per_share.unwrap(),
            248.448_179_610,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            valuation.margin_of_safety.unwrap(),
            148.448_179_610,
            epsilon = 1e-6
        );
        assert_eq!(valuation.high_growth_rate, Some(0.10));
    }

    #[test]
    fn test_growth_is_capped() {
        let model = DcfModel::default();
        let capped = model.value(&DcfInputs {
            growth_rate: 0.60,
            ..aaa()
        });
        let at_cap = model.value(&DcfInputs {
            growth_rate: GROWTH_CAP,
            ..aaa()
        });

        assert_eq!(capped.high_growth_rate, Some(GROWTH_CAP));
        assert_eq!(
            capped.intrinsic_value_per_share,
            at_cap.intrinsic_value_per_share
        );
    }

    #[test]
    fn test_higher_discount_rate_lowers_value() {
        let mut previous = f64::INFINITY;
        for r in [0.04, 0.06, 0.09, 0.12, 0.15, 0.20] {
            let model = DcfModel::new(ValuationConfig::new(r, 0.03)).unwrap();
            let value = model.enterprise_value(10.0e9, 0.10);
            assert!(value < previous, "r = {r}: {value} !< {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_missing_cash_flow_or_shares() {
        let model = DcfModel::default();
        for inputs in [
            DcfInputs {
                free_cash_flow: None,
                ..aaa()
            },
            DcfInputs {
                free_cash_flow: Some(0.0),
                ..aaa()
            },
            DcfInputs {
                shares_outstanding: None,
                ..aaa()
            },
            DcfInputs {
                shares_outstanding: Some(0.0),
                ..aaa()
            },
        ] {
            assert_eq!(model.value(&inputs), Valuation::unavailable());
        }
    }

    #[test]
    fn test_non_positive_price_keeps_intrinsic_value() {
        let model = DcfModel::default();
        for price in [None, Some(0.0), Some(-3.0)] {
            let valuation = model.value(&DcfInputs { price, ..aaa() });
            assert!(valuation.intrinsic_value_per_share.is_some());
            assert!(valuation.margin_of_safety.is_none());
        }
    }

    #[test]
    fn test_negative_cash_flow_values_negative() {
        let valuation = DcfModel::default().value(&DcfInputs {
            free_cash_flow: Some(-1.0e9),
            ..aaa()
        });
        assert!(valuation.intrinsic_value_per_share.unwrap() < 0.0);
        assert!(valuation.margin_of_safety.unwrap() < -100.0);
    }

    #[test]
    fn test_divergent_configuration_rejected() {
        let err = DcfModel::new(ValuationConfig::new(0.03, 0.03)).unwrap_err();
        assert!(matches!(err, ConfigError::DivergentTerminalValue { .. }));
    }
}
