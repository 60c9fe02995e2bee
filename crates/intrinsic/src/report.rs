//! Presentation of pipeline results.
//!
//! Numbers stay `Option<f64>` up to this module; here they become display
//! strings, with `N/A` for anything unavailable.

use crate::pipeline::{ResultRow, TickerReport};
use intrinsic_model::{Durability, GrowthQuality, Moat, MoatStrength, Recommendation};
use std::{cmp::Ordering, fmt::Write as _};

/// Placeholder for unavailable values.
pub const NOT_AVAILABLE: &str = "N/A";

/// How to read the report, printed by the `guide` command.
pub const GUIDE: &str = "\
HOW TO INTERPRET THE REPORT

Each company is checked against three value criteria, one point each:

  - Price-to-Earnings Ratio (P/E < 20): the stock is reasonably priced
    relative to its earnings.
  - Margin of Safety (> 25%): discount of the market price to the DCF value.
    A higher margin indicates potential undervaluation.
  - Free Cash Flow (FCF > 0): the company generates real cash profits.

GROWTH AND QUALITY INDICATORS

  - FCF Growth Quality reflects the growth rate applied in the first five
    years of the DCF.
  - Moat Strength is inferred from the value score.
  - Curated Moat and Durability are estimated from market cap and business
    model keywords.

VALUATION APPROACH

A two-stage Discounted Cash Flow (DCF) model:

  - Stage 1 (years 1-5): revenue CAGR as the growth rate, capped at 25%.
  - Stage 2 (years 6-10): a stable growth rate of 6%.
  - A terminal value covers cash flows after year 10.

RECOMMENDATIONS

  - Strong Buy: margin of safety above 40%, deeply undervalued.
  - Consider Buy: margin of safety above 25%, reasonable value.
  - Watchlist: margin of safety above 10%, worth buying at a lower price.
  - Safe but Not a Deal: trading slightly below its estimated value.
  - Do Not Buy: may be overpriced, or no valuation was possible.

This tool is for research only and is not financial advice. Always perform
your own due diligence before investing.
";

/// Display strings for one evaluated ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Ticker.
    pub ticker: String,
    /// Company name.
    pub name: String,
    /// Price, `$x.xx`.
    pub price: String,
    /// P/E rounded to an integer.
    pub pe_ratio: String,
    /// Market cap in billions or trillions.
    pub market_cap: String,
    /// Annual free cash flow in billions.
    pub free_cash_flow: String,
    /// Stage-1 growth rate, `x.xx%`.
    pub growth_rate: String,
    /// Intrinsic value per share, `$x.xx`.
    pub dcf_value: String,
    /// Margin of safety, `x.xx%`.
    pub margin_of_safety: String,
    /// Stars and `(n/3)`.
    pub score: String,
    /// Growth quality with marker.
    pub growth_quality: String,
    /// Score-derived moat strength with marker.
    pub moat_strength: String,
    /// Curated moat with marker.
    pub curated_moat: String,
    /// Durability with marker.
    pub durability: String,
    /// Recommendation with marker.
    pub rating: String,
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `$x.xx`.
#[must_use]
pub fn format_dollars(value: Option<f64>) -> String {
    or_na(value.map(|v| format!("${v:.2}")))
}

/// P/E rounded to an integer.
#[must_use]
pub fn format_pe(value: Option<f64>) -> String {
    or_na(value.map(|v| format!("{v:.0}")))
}

/// `$x.xxT` above one trillion, `$x.xxB` otherwise.
#[must_use]
pub fn format_market_cap(value: Option<f64>) -> String {
    or_na(value.map(|v| {
        if v > 1.0e12 {
            format!("${:.2}T", v / 1.0e12)
        } else {
            format!("${:.2}B", v / 1.0e9)
        }
    }))
}

/// `$x.xxB`; zero counts as unavailable.
#[must_use]
pub fn format_billions(value: Option<f64>) -> String {
    or_na(value.filter(|v| *v != 0.0).map(|v| format!("${:.2}B", v / 1.0e9)))
}

/// Fraction as `x.xx%`.
#[must_use]
pub fn format_rate(value: Option<f64>) -> String {
    or_na(value.map(|v| format!("{:.2}%", v * 100.0)))
}

/// Percentage as `x.xx%`.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    or_na(value.map(|v| format!("{v:.2}%")))
}

/// Stars followed by `(n/3)`.
#[must_use]
pub fn format_score(score: u8) -> String {
    let stars = "🌟".repeat(usize::from(score));
    format!("{stars} ({score}/{})", intrinsic_model::score::MAX_SCORE)
        .trim_start()
        .to_string()
}

/// Marker shown before a recommendation.
#[must_use]
pub const fn recommendation_marker(recommendation: Recommendation) -> &'static str {
    match recommendation {
        Recommendation::StrongBuy => "🟢",
        Recommendation::ConsiderBuy => "✅",
        Recommendation::Watchlist => "🟡",
        Recommendation::SafeButNotADeal => "🔵",
        Recommendation::DoNotBuy => "❌",
    }
}

const fn growth_marker(quality: GrowthQuality) -> &'static str {
    match quality {
        GrowthQuality::Strong => "🟢",
        GrowthQuality::Moderate => "🟡",
        GrowthQuality::Steady => "🔵",
        GrowthQuality::Weak => "🔴",
    }
}

const fn strength_marker(strength: MoatStrength) -> &'static str {
    match strength {
        MoatStrength::Wide => "🟢",
        MoatStrength::Moderate => "🟡",
        MoatStrength::Narrow | MoatStrength::None => "🔴",
    }
}

const fn moat_marker(moat: Moat) -> &'static str {
    match moat {
        Moat::Wide => "🟢",
        Moat::Moderate => "🟡",
        Moat::Narrow => "🔴",
    }
}

const fn durability_marker(durability: Durability) -> &'static str {
    match durability {
        Durability::High => "🔒",
        Durability::Medium | Durability::Low => "🟡",
    }
}

impl From<&TickerReport> for DisplayRow {
    fn from(report: &TickerReport) -> Self {
        let profile = &report.profile;
        let valuation = &report.valuation;
        let score = &report.score;

        Self {
            ticker: profile.symbol.to_string(),
            name: profile.name.clone(),
            price: format_dollars(profile.price),
            pe_ratio: format_pe(profile.pe_ratio),
            market_cap: format_market_cap(profile.market_cap),
            free_cash_flow: format_billions(profile.free_cash_flow),
            growth_rate: format_rate(valuation.high_growth_rate),
            dcf_value: format_dollars(valuation.intrinsic_value_per_share),
            margin_of_safety: format_percent(valuation.margin_of_safety),
            score: format_score(score.score),
            growth_quality: format!(
                "{} {}",
                growth_marker(score.growth_quality),
                score.growth_quality
            ),
            moat_strength: format!(
                "{} {}",
                strength_marker(score.moat_strength),
                score.moat_strength
            ),
            curated_moat: format!("{} {}", moat_marker(score.moat.moat), score.moat.moat),
            durability: format!(
                "{} {}",
                durability_marker(score.moat.durability),
                score.moat.durability
            ),
            rating: format!(
                "{} {}",
                recommendation_marker(score.recommendation),
                score.recommendation
            ),
        }
    }
}

/// Sort rows by descending sort key, failed rows last. The sort is stable.
pub fn rank(rows: &mut [ResultRow]) {
    rows.sort_by(|a, b| match (a.sort_key(), b.sort_key()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Render ranked rows as a plain-text report.
///
/// Growth notes are shown as warnings under their ticker.
#[must_use]
pub fn render_text(rows: &[ResultRow]) -> String {
    let mut out = String::new();
    let rule = "━".repeat(60);

    for row in rows {
        match row {
            ResultRow::Scored(report) => {
                let d = DisplayRow::from(report.as_ref());
                let _ = writeln!(out, "{rule}");
                let _ = writeln!(out, "{}  {}", d.ticker, d.name);
                let _ = writeln!(out, "{rule}");
                for (label, value) in [
                    ("Price", &d.price),
                    ("P/E Ratio", &d.pe_ratio),
                    ("Market Cap", &d.market_cap),
                    ("FCF (Annual)", &d.free_cash_flow),
                    ("Growth Rate (5Y)", &d.growth_rate),
                    ("DCF Value", &d.dcf_value),
                    ("Margin of Safety", &d.margin_of_safety),
                    ("Score", &d.score),
                    ("FCF Growth Quality", &d.growth_quality),
                    ("Moat Strength", &d.moat_strength),
                    ("Curated Moat", &d.curated_moat),
                    ("Durability", &d.durability),
                    ("Overall Rating", &d.rating),
                ] {
                    let _ = writeln!(out, "  {label:<20} {value}");
                }
                for note in report.notes() {
                    let _ = writeln!(out, "  Warning: {note}");
                }
                out.push('\n');
            }
            ResultRow::Failed { ticker, error } => {
                let _ = writeln!(out, "{rule}");
                let _ = writeln!(out, "{ticker}  Error: {error}");
                let _ = writeln!(out, "{rule}\n");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_model::{MoatAssessment, ScoreRecord, Valuation};
    use intrinsic_traits::{CompanyProfile, GrowthEstimate, GrowthSource, Symbol};

    fn report(symbol: &str, score: u8, sort_key: f64) -> TickerReport {
        TickerReport {
            profile: CompanyProfile {
                symbol: Symbol::parse(symbol).unwrap(),
                name: format!("{symbol} Corp"),
                price: Some(100.0),
                pe_ratio: Some(15.4),
                market_cap: Some(2.5e12),
                shares_outstanding: Some(1.0e9),
                free_cash_flow: Some(10.0e9),
                description: String::new(),
            },
            growth: GrowthEstimate {
                rate: 0.1,
                source: GrowthSource::Fallback,
                note: None,
            },
            valuation: Valuation {
                intrinsic_value_per_share: Some(248.448_179_61),
                margin_of_safety: Some(148.448_179_61),
                high_growth_rate: Some(0.1),
            },
            score: ScoreRecord {
                score,
                recommendation: Recommendation::StrongBuy,
                moat_strength: MoatStrength::from_score(score),
                moat: MoatAssessment {
                    moat: Moat::Wide,
                    durability: Durability::High,
                },
                growth_quality: GrowthQuality::Moderate,
                sort_key,
            },
        }
    }

    fn scored(symbol: &str, sort_key: f64) -> ResultRow {
        ResultRow::Scored(Box::new(report(symbol, 3, sort_key)))
    }

    fn failed(symbol: &str) -> ResultRow {
        ResultRow::Failed {
            ticker: symbol.to_string(),
            error: "no market data available".to_string(),
        }
    }

    #[test]
    fn test_display_row_formatting() {
        let row = DisplayRow::from(&report("AAA", 3, 4.48));
        assert_eq!(row.price, "$100.00");
        assert_eq!(row.pe_ratio, "15");
        assert_eq!(row.market_cap, "$2.50T");
        assert_eq!(row.free_cash_flow, "$10.00B");
        assert_eq!(row.growth_rate, "10.00%");
        assert_eq!(row.dcf_value, "$248.45");
        assert_eq!(row.margin_of_safety, "148.45%");
        assert_eq!(row.score, "🌟🌟🌟 (3/3)");
        assert_eq!(row.growth_quality, "🟡 Moderate");
        assert_eq!(row.moat_strength, "🟢 Wide");
        assert_eq!(row.curated_moat, "🟢 Wide");
        assert_eq!(row.durability, "🔒 High");
        assert_eq!(row.rating, "🟢 Strong Buy");
    }

    #[test]
    fn test_unavailable_values() {
        assert_eq!(format_dollars(None), "N/A");
        assert_eq!(format_pe(None), "N/A");
        assert_eq!(format_market_cap(None), "N/A");
        assert_eq!(format_billions(Some(0.0)), "N/A");
        assert_eq!(format_rate(None), "N/A");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn test_market_cap_units() {
        assert_eq!(format_market_cap(Some(1.0e12)), "$1000.00B");
        assert_eq!(format_market_cap(Some(3.2e11)), "$320.00B");
        assert_eq!(format_market_cap(Some(1.5e12)), "$1.50T");
    }

    #[test]
    fn test_zero_score() {
        assert_eq!(format_score(0), "(0/3)");
        assert_eq!(format_score(1), "🌟 (1/3)");
    }

    #[test]
    fn test_rank_descending_failed_last() {
        let mut rows = vec![
            failed("EEE"),
            scored("AAA", 1.2),
            scored("BBB", 3.5),
            failed("FFF"),
            scored("CCC", 1.2),
        ];
        rank(&mut rows);

        let order: Vec<&str> = rows.iter().map(ResultRow::ticker).collect();
        assert_eq!(order, vec!["BBB", "AAA", "CCC", "EEE", "FFF"]);
    }

    #[test]
    fn test_render_text() {
        let mut noted = report("BBB", 1, 1.0);
        noted.growth.note = Some("Used fallback growth rate of 8%".to_string());

        let text = render_text(&[
            scored("AAA", 4.48),
            ResultRow::Scored(Box::new(noted)),
            failed("ZZZ"),
        ]);
        assert!(text.contains("AAA  AAA Corp"));
        assert!(text.contains("  Warning: Used fallback growth rate of 8%"));
        assert_eq!(text.matches("Warning:").count(), 1);
        assert!(text.contains("Margin of Safety"));
        assert!(text.contains("148.45%"));
        assert!(text.contains("ZZZ  Error: no market data available"));
    }

    #[test]
    fn test_guide_has_disclaimer() {
        assert!(GUIDE.contains("not financial advice"));
        assert!(GUIDE.contains("Strong Buy"));
    }
}
