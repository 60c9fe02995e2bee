//! Data types for the Yahoo Finance `quoteSummary` response.

use chrono::DateTime;
use intrinsic_traits::{ProfileFragment, RevenuePoint, RevenueSeries};
use serde::{Deserialize, Serialize};

/// Modules requested from `quoteSummary`.
pub const QUOTE_SUMMARY_MODULES: &[&str] = &[
    "price",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
    "assetProfile",
    "incomeStatementHistory",
];

/// A numeric field in Yahoo's `{"raw": .., "fmt": ..}` shape.
///
/// Yahoo sends `{}` for values it does not have.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawValue {
    /// Unformatted value.
    #[serde(default)]
    pub raw: Option<f64>,
}

fn raw(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

/// Top-level response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    /// Payload.
    pub quote_summary: QuoteSummary,
}

/// Result list plus optional error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    /// Error reported by Yahoo.
    #[serde(default)]
    pub error: Option<QuoteSummaryError>,
}

/// Error object inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummaryError {
    /// Error code, e.g. `"Not Found"`.
    #[serde(default)]
    pub code: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Module data for one symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    /// `price` module.
    #[serde(default)]
    pub price: Option<PriceModule>,
    /// `summaryDetail` module.
    #[serde(default)]
    pub summary_detail: Option<SummaryDetail>,
    /// `defaultKeyStatistics` module.
    #[serde(default)]
    pub default_key_statistics: Option<KeyStatistics>,
    /// `financialData` module.
    #[serde(default)]
    pub financial_data: Option<FinancialData>,
    /// `assetProfile` module.
    #[serde(default)]
    pub asset_profile: Option<AssetProfile>,
    /// `incomeStatementHistory` module.
    #[serde(default)]
    pub income_statement_history: Option<IncomeStatementHistory>,
}

/// `price` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    /// Full company name.
    #[serde(default)]
    pub long_name: Option<String>,
    /// Abbreviated company name.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Last traded price.
    #[serde(default)]
    pub regular_market_price: Option<RawValue>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<RawValue>,
}

/// `summaryDetail` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    /// Trailing P/E.
    #[serde(default, rename = "trailingPE")]
    pub trailing_pe: Option<RawValue>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<RawValue>,
}

/// `defaultKeyStatistics` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatistics {
    /// Shares outstanding.
    #[serde(default)]
    pub shares_outstanding: Option<RawValue>,
}

/// `financialData` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    /// Current price.
    #[serde(default)]
    pub current_price: Option<RawValue>,
    /// Trailing free cash flow.
    #[serde(default, rename = "freeCashflow")]
    pub free_cashflow: Option<RawValue>,
}

/// `assetProfile` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfile {
    /// Business summary.
    #[serde(default)]
    pub long_business_summary: Option<String>,
}

/// `incomeStatementHistory` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementHistory {
    /// Annual statements.
    #[serde(default)]
    pub income_statement_history: Vec<IncomeStatement>,
}

/// One annual income statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Fiscal period end as a Unix timestamp.
    #[serde(default)]
    pub end_date: Option<RawValue>,
    /// Total revenue.
    #[serde(default)]
    pub total_revenue: Option<RawValue>,
}

impl QuoteSummaryResult {
    /// The profile attributes this response carries.
    #[must_use]
    pub fn fragment(&self) -> ProfileFragment {
        let price = self.price.as_ref();
        let detail = self.summary_detail.as_ref();
        let financial = self.financial_data.as_ref();

        ProfileFragment {
            name: price
                .and_then(|p| p.long_name.clone().or_else(|| p.short_name.clone())),
            price: raw(financial.and_then(|f| f.current_price.as_ref()))
                .or_else(|| raw(price.and_then(|p| p.regular_market_price.as_ref()))),
            pe_ratio: raw(detail.and_then(|d| d.trailing_pe.as_ref())),
            market_cap: raw(detail.and_then(|d| d.market_cap.as_ref()))
                .or_else(|| raw(price.and_then(|p| p.market_cap.as_ref()))),
            shares_outstanding: raw(
                self.default_key_statistics
                    .as_ref()
                    .and_then(|k| k.shares_outstanding.as_ref()),
            ),
            free_cash_flow: raw(financial.and_then(|f| f.free_cashflow.as_ref())),
            description: self
                .asset_profile
                .as_ref()
                .and_then(|a| a.long_business_summary.clone()),
        }
    }

    /// Annual revenue history sorted most recent first.
    ///
    /// Statements without a revenue figure are dropped.
    #[must_use]
    pub fn revenue_series(&self) -> RevenueSeries {
        let points = self
            .income_statement_history
            .as_ref()
            .map(|h| {
                h.income_statement_history
                    .iter()
                    .filter_map(|s| {
                        let revenue = raw(s.total_revenue.as_ref())?;
                        let period = raw(s.end_date.as_ref())
                            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
                            .map(|dt| dt.date_naive());
                        Some(RevenuePoint::new(period, revenue))
                    })
                    .collect()
            })
            .unwrap_or_default();
        RevenueSeries::sorted_by_period(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = r#"{
        "quoteSummary": {
            "result": [{
                "price": {"longName": "Triple A Corp", "regularMarketPrice": {"raw": 99.5, "fmt": "99.50"}},
                "summaryDetail": {"trailingPE": {"raw": 18.2}, "marketCap": {"raw": 150000000000}},
                "defaultKeyStatistics": {"sharesOutstanding": {"raw": 1000000000}},
                "financialData": {"currentPrice": {"raw": 100.0}, "freeCashflow": {}},
                "assetProfile": {"longBusinessSummary": "A dominant platform."},
                "incomeStatementHistory": {"incomeStatementHistory": [
                    {"endDate": {"raw": 1640908800}, "totalRevenue": {"raw": 110.0}},
                    {"endDate": {"raw": 1703980800}, "totalRevenue": {"raw": 133.1}},
                    {"endDate": {"raw": 1609372800}, "totalRevenue": {"raw": 100.0}},
                    {"endDate": {"raw": 1672444800}, "totalRevenue": {"raw": 121.0}},
                    {"endDate": {"raw": 1577750400}, "totalRevenue": {}}
                ]}
            }],
            "error": null
        }
    }"#;

    fn sample() -> QuoteSummaryResult {
        let response: QuoteSummaryResponse = serde_json::from_str(SAMPLE).unwrap();
        response.quote_summary.result.unwrap().remove(0)
    }

    #[test]
    fn test_fragment_mapping() {
        let fragment = sample().fragment();
        assert_eq!(fragment.name.as_deref(), Some("Triple A Corp"));
        assert_eq!(fragment.price, Some(100.0));
        assert_eq!(fragment.pe_ratio, Some(18.2));
        assert_eq!(fragment.market_cap, Some(1.5e11));
        assert_eq!(fragment.shares_outstanding, Some(1.0e9));
        assert_eq!(fragment.free_cash_flow, None);
        assert_eq!(fragment.description.as_deref(), Some("A dominant platform."));
    }

    #[test]
    fn test_price_falls_back_to_regular_market_price() {
        let mut result = sample();
        result.financial_data = None;
        assert_eq!(result.fragment().price, Some(99.5));
    }

    #[test]
    fn test_revenue_series_sorted_descending() {
        let series = sample().revenue_series();
        assert_eq!(series.positive_revenues(), vec![133.1, 121.0, 110.0, 100.0]);
        assert_eq!(
            series.points()[0].period,
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn test_empty_modules() {
        let result = QuoteSummaryResult::default();
        assert!(result.fragment().is_empty());
        assert!(result.revenue_series().is_empty());
    }
}
