//! Value score, recommendation tier and quality labels.
//!
//! The score counts three independent value criteria: a modest P/E, a
//! margin of safety above the threshold, and positive free cash flow.

use crate::moat::MoatAssessment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// P/E below which the valuation criterion passes.
pub const PE_THRESHOLD: f64 = 20.0;

/// Margin of safety (percent) above which the safety criterion passes.
pub const MOS_THRESHOLD: f64 = 25.0;

/// Maximum score.
pub const MAX_SCORE: u8 = 3;

/// Recommendation tier, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Margin of safety is zero, negative or unknown.
    DoNotBuy,
    /// Priced at or slightly below intrinsic value.
    SafeButNotADeal,
    /// Modest discount.
    Watchlist,
    /// Meaningful discount.
    ConsiderBuy,
    /// Deep discount.
    StrongBuy,
}

impl Recommendation {
    /// Tier for a margin of safety in percent.
    #[must_use]
    pub fn from_margin_of_safety(margin_of_safety: Option<f64>) -> Self {
        match margin_of_safety {
            Some(m) if m > 40.0 => Self::StrongBuy,
            Some(m) if m > 25.0 => Self::ConsiderBuy,
            Some(m) if m > 10.0 => Self::Watchlist,
            Some(m) if m > 0.0 => Self::SafeButNotADeal,
            _ => Self::DoNotBuy,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::ConsiderBuy => "Consider Buy",
            Self::Watchlist => "Watchlist",
            Self::SafeButNotADeal => "Safe but Not a Deal",
            Self::DoNotBuy => "Do Not Buy",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Growth quality from the applied stage-1 growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrowthQuality {
    /// At most 4%, or unknown.
    Weak,
    /// Above 4%.
    Steady,
    /// Above 8%.
    Moderate,
    /// Above 15%.
    Strong,
}

impl GrowthQuality {
    /// Quality for a growth rate.
    #[must_use]
    pub fn from_growth_rate(growth_rate: Option<f64>) -> Self {
        match growth_rate {
            Some(g) if g > 0.15 => Self::Strong,
            Some(g) if g > 0.08 => Self::Moderate,
            Some(g) if g > 0.04 => Self::Steady,
            _ => Self::Weak,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Steady => "Steady",
            Self::Weak => "Weak",
        }
    }
}

impl fmt::Display for GrowthQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Moat strength implied by the score alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MoatStrength {
    /// Score 0.
    None,
    /// Score 1.
    Narrow,
    /// Score 2.
    Moderate,
    /// Score 3.
    Wide,
}

impl MoatStrength {
    /// Strength for a score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0 => Self::None,
            1 => Self::Narrow,
            2 => Self::Moderate,
            _ => Self::Wide,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Wide => "Wide",
            Self::Moderate => "Moderate",
            Self::Narrow => "Narrow",
            Self::None => "None",
        }
    }
}

impl fmt::Display for MoatStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics the score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Trailing P/E.
    pub pe_ratio: Option<f64>,
    /// Margin of safety in percent.
    pub margin_of_safety: Option<f64>,
    /// Trailing free cash flow.
    pub free_cash_flow: Option<f64>,
    /// Applied stage-1 growth rate.
    pub growth_rate: Option<f64>,
}

/// Aggregated assessment for one company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Criteria passed, 0 to 3.
    pub score: u8,
    /// Recommendation tier.
    pub recommendation: Recommendation,
    /// Moat strength implied by the score.
    pub moat_strength: MoatStrength,
    /// Curated moat from size and description.
    pub moat: MoatAssessment,
    /// Growth quality.
    pub growth_quality: GrowthQuality,
    /// Ranking key, `score + margin_of_safety / 100`.
    pub sort_key: f64,
}

/// Combines valuation metrics into a [`ScoreRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Number of value criteria passed.
    #[must_use]
    pub fn score(inputs: &ScoreInputs) -> u8 {
        let criteria = [
            inputs.pe_ratio.is_some_and(|pe| pe < PE_THRESHOLD),
            inputs.margin_of_safety.is_some_and(|m| m > MOS_THRESHOLD),
            inputs.free_cash_flow.is_some_and(|fcf| fcf > 0.0),
        ];
        criteria.into_iter().filter(|passed| *passed).count() as u8
    }

    /// Build the full record.
    #[must_use]
    pub fn aggregate(&self, inputs: &ScoreInputs, moat: MoatAssessment) -> ScoreRecord {
        let score = Self::score(inputs);
        ScoreRecord {
            score,
            recommendation: Recommendation::from_margin_of_safety(inputs.margin_of_safety),
            moat_strength: MoatStrength::from_score(score),
            moat,
            growth_quality: GrowthQuality::from_growth_rate(inputs.growth_rate),
            sort_key: f64::from(score) + inputs.margin_of_safety.unwrap_or(0.0) / 100.0,
        }
    }
}
