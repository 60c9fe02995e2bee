//! Revenue growth estimation.
//!
//! The estimator walks an ordered chain of providers and takes the first one
//! whose revenue history yields a compound annual growth rate. When every
//! provider fails it falls back to a fixed rate, so an estimate always exists.

use intrinsic_traits::{
    GrowthEstimate, GrowthSource, IntrinsicError, MarketDataProvider, Result, RevenueSeries,
    Symbol,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Growth rate used when no source has a usable revenue history.
pub const FALLBACK_GROWTH_RATE: f64 = 0.08;

/// Minimum number of positive-revenue periods for a CAGR.
pub const MIN_PERIODS: usize = 2;

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Compound annual growth rate of a most-recent-first revenue series.
///
/// Only strictly positive revenues count. Returns the rate rounded to four
/// decimals together with the number of periods used, or `None` with fewer
/// than [`MIN_PERIODS`] qualifying periods.
#[must_use]
pub fn revenue_cagr(series: &RevenueSeries) -> Option<(f64, usize)> {
    let revenues = series.positive_revenues();
    let n = revenues.len();
    if n < MIN_PERIODS {
        return None;
    }

    let latest = revenues[0];
    let oldest = revenues[n - 1];
    let cagr = (latest / oldest).powf(1.0 / (n - 1) as f64) - 1.0;
    cagr.is_finite().then(|| (round_to(cagr, 4), n))
}

/// Configuration for growth estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthEstimatorConfig {
    /// Rate used when the provider chain is exhausted (default: 0.08)
    pub fallback_rate: f64,
}

impl Default for GrowthEstimatorConfig {
    fn default() -> Self {
        Self {
            fallback_rate: FALLBACK_GROWTH_RATE,
        }
    }
}

/// Revenue CAGR estimator over a provider fallback chain.
#[derive(Debug, Clone, Default)]
pub struct GrowthEstimator {
    config: GrowthEstimatorConfig,
}

impl GrowthEstimator {
    /// Create an estimator with the given configuration.
    #[must_use]
    pub const fn new(config: GrowthEstimatorConfig) -> Self {
        Self { config }
    }

    /// Get the fallback rate.
    #[must_use]
    pub const fn fallback_rate(&self) -> f64 {
        self.config.fallback_rate
    }

    /// Estimate growth for `symbol`, trying `providers` in order.
    ///
    /// The first provider succeeds silently; a later provider attaches a note
    /// naming itself, and the fallback attaches a note stating the rate used.
    ///
    /// # Errors
    ///
    /// Returns [`IntrinsicError::Source`] only if a provider fails with an
    /// unrecoverable error. Every other failure moves on to the next provider.
    pub async fn estimate(
        &self,
        providers: &[&dyn MarketDataProvider],
        symbol: &Symbol,
    ) -> Result<GrowthEstimate> {
        for (position, provider) in providers.iter().enumerate() {
            let series = match provider.revenue_history(symbol).await {
                Ok(series) => series,
                Err(error) if error.is_recoverable() => {
                    debug!(
                        %symbol,
                        provider = provider.name(),
                        %error,
                        "revenue history unavailable"
                    );
                    continue;
                }
                Err(error) => {
                    return Err(IntrinsicError::Source {
                        source_name: provider.name().to_string(),
                        error,
                    });
                }
            };

            let Some((rate, periods)) = revenue_cagr(&series) else {
                debug!(
                    %symbol,
                    provider = provider.name(),
                    periods = series.len(),
                    "insufficient positive revenue periods"
                );
                continue;
            };

            let primary = position == 0;
            let note =
                (!primary).then(|| format!("Used {periods} years from {}", provider.name()));
            if let Some(note) = &note {
                warn!(%symbol, "{note}");
            }
            return Ok(GrowthEstimate {
                rate,
                source: GrowthSource::Revenue {
                    provider: provider.name().to_string(),
                    periods,
                    primary,
                },
                note,
            });
        }

        let note = format!(
            "Used fallback growth rate of {}%",
            round_to(self.config.fallback_rate * 100.0, 2)
        );
        warn!(%symbol, "{note}");
        Ok(GrowthEstimate {
            rate: self.config.fallback_rate,
            source: GrowthSource::Fallback,
            note: Some(note),
        })
    }
}
