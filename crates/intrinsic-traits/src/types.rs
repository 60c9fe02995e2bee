//! Common types used throughout the intrinsic pipeline.
//!
//! Every financial quantity that a source may fail to report is an
//! `Option<f64>`. Display markers such as `N/A` are a presentation concern and
//! never appear here.

use crate::error::SymbolError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

const MAX_SYMBOL_LEN: usize = 15;

/// Maximum number of fiscal periods kept in a [`RevenueSeries`].
pub const MAX_REVENUE_PERIODS: usize = 6;

/// Normalized ticker symbol.
///
/// Symbols are trimmed and uppercased on parse. They must start with an ASCII
/// letter and contain only `A-Z`, `0-9`, `.` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol.
    ///
    /// # Errors
    ///
    /// Returns a [`SymbolError`] describing the first violated rule.
    pub fn parse(input: &str) -> Result<Self, SymbolError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(SymbolError::Empty);
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next()
            && !first.is_ascii_alphabetic()
        {
            return Err(SymbolError::InvalidStart { ch: first });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '-') {
                return Err(SymbolError::InvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// The normalized symbol text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// What a single data source knows about a company.
///
/// Every field is optional. Fragments from several sources are combined with
/// [`ProfileFragment::or`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFragment {
    /// Company display name.
    pub name: Option<String>,
    /// Current share price.
    pub price: Option<f64>,
    /// Trailing price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Trailing twelve-month free cash flow.
    pub free_cash_flow: Option<f64>,
    /// Business description.
    pub description: Option<String>,
}

impl ProfileFragment {
    /// An empty fragment, the result of a source that had nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Field-by-field merge: values from `self` win, `fallback` fills gaps.
    ///
    /// A free cash flow of exactly zero counts as a gap.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            name: self.name.or(fallback.name),
            price: self.price.or(fallback.price),
            pe_ratio: self.pe_ratio.or(fallback.pe_ratio),
            market_cap: self.market_cap.or(fallback.market_cap),
            shares_outstanding: self.shares_outstanding.or(fallback.shares_outstanding),
            free_cash_flow: self
                .free_cash_flow
                .filter(|fcf| *fcf != 0.0)
                .or(fallback.free_cash_flow),
            description: self.description.or(fallback.description),
        }
    }
}

/// Merged company profile for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Ticker the profile belongs to.
    pub symbol: Symbol,
    /// Display name, the ticker itself when no source had one.
    pub name: String,
    /// Current share price.
    pub price: Option<f64>,
    /// Trailing price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Trailing twelve-month free cash flow.
    pub free_cash_flow: Option<f64>,
    /// Business description, empty when unknown.
    pub description: String,
}

impl CompanyProfile {
    /// Build a profile from an already merged fragment.
    #[must_use]
    pub fn from_fragment(symbol: Symbol, fragment: ProfileFragment) -> Self {
        let name = fragment
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| symbol.to_string());
        Self {
            symbol,
            name,
            price: fragment.price,
            pe_ratio: fragment.pe_ratio,
            market_cap: fragment.market_cap,
            shares_outstanding: fragment.shares_outstanding,
            free_cash_flow: fragment.free_cash_flow,
            description: fragment.description.unwrap_or_default(),
        }
    }
}

/// One fiscal period's revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Fiscal period end, when the source reports one.
    pub period: Option<Date>,
    /// Total revenue for the period.
    pub revenue: f64,
}

impl RevenuePoint {
    /// Create a revenue point.
    #[must_use]
    pub const fn new(period: Option<Date>, revenue: f64) -> Self {
        Self { period, revenue }
    }
}

/// Revenue history from one source, most recent period first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSeries {
    points: Vec<RevenuePoint>,
}

impl RevenueSeries {
    /// Wrap points that are already ordered most-recent-first.
    ///
    /// Keeps at most [`MAX_REVENUE_PERIODS`] entries.
    #[must_use]
    pub fn new(mut points: Vec<RevenuePoint>) -> Self {
        points.truncate(MAX_REVENUE_PERIODS);
        Self { points }
    }

    /// Sort points descending by period, undated points last, then truncate.
    #[must_use]
    pub fn sorted_by_period(mut points: Vec<RevenuePoint>) -> Self {
        points.sort_by(|a, b| b.period.cmp(&a.period));
        Self::new(points)
    }

    /// All points, most recent first.
    #[must_use]
    pub fn points(&self) -> &[RevenuePoint] {
        &self.points
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Revenues that are strictly positive, in series order.
    #[must_use]
    pub fn positive_revenues(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.revenue)
            .filter(|r| r.is_finite() && *r > 0.0)
            .collect()
    }
}

/// Where a growth estimate came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthSource {
    /// Computed from a provider's revenue history.
    Revenue {
        /// Provider name.
        provider: String,
        /// Number of qualifying periods used.
        periods: usize,
        /// Whether the provider was first in the chain.
        primary: bool,
    },
    /// No provider had usable history; the fixed fallback rate was used.
    Fallback,
}

/// Compound annual revenue growth estimate. Always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    /// Growth rate as a fraction, e.g. `0.08`.
    pub rate: f64,
    /// Provenance of the rate.
    pub source: GrowthSource,
    /// User-visible note, absent when the primary source succeeded.
    pub note: Option<String>,
}

impl GrowthEstimate {
    /// Whether the fixed fallback rate was used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, GrowthSource::Fallback)
    }
}
