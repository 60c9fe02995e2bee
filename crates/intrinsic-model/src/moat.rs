//! Curated moat classification from company size and business description.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Market cap above which a company is classified Wide / High.
pub const MEGA_CAP_THRESHOLD: f64 = 1.0e12;

/// Market cap above which a company is classified Moderate / Medium.
pub const LARGE_CAP_THRESHOLD: f64 = 1.0e10;

/// Description keywords that indicate a wide moat.
pub const MOAT_KEYWORDS: &[&str] = &[
    "ecosystem",
    "dominant",
    "monopoly",
    "sticky",
    "recurring",
    "network effect",
];

/// Competitive moat width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Moat {
    /// Little protection from competitors.
    Narrow,
    /// Some protection.
    Moderate,
    /// Strong, lasting protection.
    Wide,
}

impl Moat {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Narrow => "Narrow",
            Self::Moderate => "Moderate",
            Self::Wide => "Wide",
        }
    }
}

impl fmt::Display for Moat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expected durability of the competitive position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Durability {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
}

impl Durability {
    /// Display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoatAssessment {
    /// Moat width.
    pub moat: Moat,
    /// Durability.
    pub durability: Durability,
}

/// Size and keyword based moat classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoatClassifier {
    /// Lowercase keywords that force a wide moat.
    pub keywords: Vec<String>,
}

impl Default for MoatClassifier {
    fn default() -> Self {
        Self {
            keywords: MOAT_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

impl MoatClassifier {
    /// Classify a company.
    ///
    /// The size tier sets both moat and durability; a keyword match in the
    /// description upgrades the moat to Wide and leaves durability alone. The
    /// name does not affect the result.
    #[must_use]
    pub fn classify(
        &self,
        _name: &str,
        market_cap: Option<f64>,
        description: &str,
    ) -> MoatAssessment {
        let (moat, durability) = match market_cap {
            Some(cap) if cap > MEGA_CAP_THRESHOLD => (Moat::Wide, Durability::High),
            Some(cap) if cap > LARGE_CAP_THRESHOLD => (Moat::Moderate, Durability::Medium),
            _ => (Moat::Narrow, Durability::Low),
        };

        let description = description.to_lowercase();
        let moat = if self.keywords.iter().any(|k| description.contains(k.as_str())) {
            Moat::Wide
        } else {
            moat
        };

        MoatAssessment { moat, durability }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_tiers() {
        let classifier = MoatClassifier::default();
        let cases = [
            (Some(2.0e12), Moat::Wide, Durability::High),
            (Some(1.0e12), Moat::Moderate, Durability::Medium),
            (Some(5.0e10), Moat::Moderate, Durability::Medium),
            (Some(1.0e10), Moat::Narrow, Durability::Low),
            (None, Moat::Narrow, Durability::Low),
        ];
        for (cap, moat, durability) in cases {
            assert_eq!(
                classifier.classify("X", cap, ""),
                MoatAssessment { moat, durability },
                "cap {cap:?}"
            );
        }
    }

    #[test]
    fn test_keyword_forces_wide_moat() {
        let classifier = MoatClassifier::default();
        let assessment = classifier.classify(
            "Small Co",
            Some(5.0e8),
            "Operates a Sticky subscription product with a Network Effect.",
        );
        assert_eq!(assessment.moat, Moat::Wide);
        assert_eq!(assessment.durability, Durability::Low);
    }

    #[test]
    fn test_keyword_with_absent_market_cap() {
        let assessment =
            MoatClassifier::default().classify("Y", None, "The dominant search engine");
        assert_eq!(assessment.moat, Moat::Wide);
        assert_eq!(assessment.durability, Durability::Low);
    }

    #[test]
    fn test_no_keyword_match() {
        let assessment =
            MoatClassifier::default().classify("Z", Some(5.0e10), "Makes widgets.");
        assert_eq!(assessment.moat, Moat::Moderate);
    }
}
