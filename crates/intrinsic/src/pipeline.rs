//! Batch valuation pipeline.
//!
//! For each ticker: merge profile fragments across the provider chain,
//! estimate growth, run the DCF, classify the moat and score the result. A
//! ticker that fails becomes a [`ResultRow::Failed`] and the batch continues.

use intrinsic_model::{
    DcfInputs, DcfModel, GrowthEstimator, MoatClassifier, ScoreAggregator, ScoreInputs,
    ScoreRecord, Valuation,
};
use intrinsic_traits::{
    CompanyProfile, ConfigError, GrowthEstimate, IntrinsicError, MarketDataProvider,
    ProfileFragment, Result, Symbol, ValuationConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Maximum number of tickers evaluated per batch.
pub const MAX_TICKERS: usize = 6;

/// Everything computed for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReport {
    /// Merged company profile.
    pub profile: CompanyProfile,
    /// Growth estimate and its provenance.
    pub growth: GrowthEstimate,
    /// DCF outputs.
    pub valuation: Valuation,
    /// Score, recommendation and labels.
    pub score: ScoreRecord,
}

impl TickerReport {
    /// User-visible notes raised while evaluating this ticker.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.growth.note.as_deref().into_iter()
    }
}

/// Outcome for one input ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultRow {
    /// The ticker was evaluated.
    Scored(Box<TickerReport>),
    /// The ticker could not be evaluated.
    Failed {
        /// Ticker as given.
        ticker: String,
        /// Error description.
        error: String,
    },
}

impl ResultRow {
    /// Ticker this row belongs to.
    #[must_use]
    pub fn ticker(&self) -> &str {
        match self {
            Self::Scored(report) => report.profile.symbol.as_str(),
            Self::Failed { ticker, .. } => ticker,
        }
    }

    /// Ranking key; `None` for failed rows.
    #[must_use]
    pub fn sort_key(&self) -> Option<f64> {
        match self {
            Self::Scored(report) => Some(report.score.sort_key),
            Self::Failed { .. } => None,
        }
    }

    /// Whether the ticker was evaluated.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored(_))
    }
}

/// Valuation pipeline over an ordered chain of data providers.
///
/// The first provider is primary: its values win when profiles are merged,
/// and a growth estimate from it carries no note.
#[derive(Debug)]
pub struct Pipeline {
    providers: Vec<Box<dyn MarketDataProvider>>,
    growth: GrowthEstimator,
    dcf: DcfModel,
    moat: MoatClassifier,
    scorer: ScoreAggregator,
}

impl Pipeline {
    /// Create a pipeline.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid. No ticker is
    /// processed with an invalid configuration.
    pub fn new(
        providers: Vec<Box<dyn MarketDataProvider>>,
        config: ValuationConfig,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            providers,
            growth: GrowthEstimator::default(),
            dcf: DcfModel::new(config)?,
            moat: MoatClassifier::default(),
            scorer: ScoreAggregator,
        })
    }

    /// Replace the growth estimator.
    #[must_use]
    pub fn with_growth_estimator(mut self, growth: GrowthEstimator) -> Self {
        self.growth = growth;
        self
    }

    /// Replace the moat classifier.
    #[must_use]
    pub fn with_moat_classifier(mut self, moat: MoatClassifier) -> Self {
        self.moat = moat;
        self
    }

    /// Valuation configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        self.dcf.config()
    }

    /// Provider names in chain order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    fn chain(&self) -> Vec<&dyn MarketDataProvider> {
        self.providers.iter().map(|p| p.as_ref()).collect()
    }

    /// Merge profile fragments from every provider, primary first.
    async fn profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        let mut merged = ProfileFragment::empty();
        for provider in &self.providers {
            match provider.profile(symbol).await {
                Ok(fragment) => merged = merged.or(fragment),
                Err(error) if error.is_recoverable() => {
                    debug!(%symbol, provider = provider.name(), %error, "profile unavailable");
                }
                Err(error) => {
                    return Err(IntrinsicError::Source {
                        source_name: provider.name().to_string(),
                        error,
                    });
                }
            }
        }

        if merged.is_empty() {
            return Err(IntrinsicError::NoData(symbol.to_string()));
        }
        Ok(CompanyProfile::from_fragment(symbol.clone(), merged))
    }

    /// Evaluate a single ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker is not a valid symbol, no provider has
    /// profile data for it, or a provider fails unrecoverably.
    pub async fn evaluate(&self, ticker: &str) -> Result<TickerReport> {
        let symbol = Symbol::parse(ticker)?;
        let profile = self.profile(&symbol).await?;
        let growth = self.growth.estimate(&self.chain(), &symbol).await?;

        let valuation = self.dcf.value(&DcfInputs {
            free_cash_flow: profile.free_cash_flow,
            shares_outstanding: profile.shares_outstanding,
            price: profile.price,
            growth_rate: growth.rate,
        });
        if valuation.intrinsic_value_per_share.is_some() && valuation.margin_of_safety.is_none() {
            warn!(%symbol, price = ?profile.price, "margin of safety unavailable");
        }

        let moat = self
            .moat
            .classify(&profile.name, profile.market_cap, &profile.description);
        let score = self.scorer.aggregate(
            &ScoreInputs {
                pe_ratio: profile.pe_ratio,
                margin_of_safety: valuation.margin_of_safety,
                free_cash_flow: profile.free_cash_flow,
                growth_rate: valuation.high_growth_rate,
            },
            moat,
        );

        info!(
            %symbol,
            score = score.score,
            recommendation = %score.recommendation,
            intrinsic_value = ?valuation.intrinsic_value_per_share,
            "ticker evaluated"
        );

        Ok(TickerReport {
            profile,
            growth,
            valuation,
            score,
        })
    }

    /// Evaluate a batch of tickers in input order.
    ///
    /// Only the first [`MAX_TICKERS`] entries are considered, blank ones
    /// included; blanks within them are then skipped. Returns one row per
    /// evaluated ticker.
    pub async fn run(&self, tickers: &[&str]) -> Vec<ResultRow> {
        if tickers.len() > MAX_TICKERS {
            warn!(
                dropped = ?&tickers[MAX_TICKERS..],
                "only the first {MAX_TICKERS} tickers are evaluated"
            );
        }
        let tickers: Vec<&str> = tickers
            .iter()
            .take(MAX_TICKERS)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        let mut rows = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            let row = match self.evaluate(ticker).await {
                Ok(report) => ResultRow::Scored(Box::new(report)),
                Err(error) => {
                    warn!(ticker, %error, "ticker failed");
                    ResultRow::Failed {
                        ticker: ticker.to_string(),
                        error: error.to_string(),
                    }
                }
            };
            rows.push(row);
        }
        rows
    }
}
