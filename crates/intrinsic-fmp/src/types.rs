//! Data types for FMP API responses.
//!
//! FMP omits or nulls fields freely, so every value the pipeline reads is
//! optional.

use chrono::NaiveDate;
use intrinsic_traits::{ProfileFragment, RevenuePoint};
use serde::{Deserialize, Serialize};

/// Company profile from the `profile` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Current price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market capitalization.
    #[serde(default, alias = "marketCap")]
    pub mkt_cap: Option<f64>,
    /// Shares outstanding.
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    /// Business description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Trailing twelve-month metrics from the `key-metrics-ttm` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyMetricsTtm {
    /// Price to earnings ratio.
    #[serde(default, rename = "peRatioTTM")]
    pub pe_ratio_ttm: Option<f64>,
    /// Free cash flow.
    #[serde(default, rename = "freeCashFlowTTM")]
    pub free_cash_flow_ttm: Option<f64>,
}

/// Annual income statement from the `income-statement` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Fiscal period end, `YYYY-MM-DD`.
    pub date: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// The statement as a revenue observation.
    #[must_use]
    pub fn revenue_point(&self) -> RevenuePoint {
        RevenuePoint::new(self.parsed_date(), self.revenue)
    }
}

/// Assemble a profile fragment from whichever endpoints answered.
#[must_use]
pub fn fragment(profile: Option<&Profile>, metrics: Option<&KeyMetricsTtm>) -> ProfileFragment {
    ProfileFragment {
        name: profile.and_then(|p| p.company_name.clone()),
        price: profile.and_then(|p| p.price),
        pe_ratio: metrics.and_then(|m| m.pe_ratio_ttm),
        market_cap: profile.and_then(|p| p.mkt_cap),
        shares_outstanding: profile.and_then(|p| p.shares_outstanding),
        free_cash_flow: metrics.and_then(|m| m.free_cash_flow_ttm),
        description: profile.and_then(|p| p.description.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_v3_payload() {
        let json = r#"{
            "symbol": "AAPL",
            "companyName": "Apple Inc.",
            "price": 190.5,
            "mktCap": 2950000000000,
            "sharesOutstanding": 15500000000,
            "description": "Apple designs a sticky ecosystem of devices.",
            "sector": "Technology"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(profile.mkt_cap, Some(2.95e12));
        assert_eq!(profile.shares_outstanding, Some(1.55e10));
    }

    #[test]
    fn test_profile_accepts_market_cap_alias_and_nulls() {
        let json = r#"{"symbol": "X", "marketCap": 1000.0, "price": null}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.mkt_cap, Some(1000.0));
        assert_eq!(profile.price, None);
    }

    #[test]
    fn test_key_metrics_ttm_field_names() {
        let json = r#"{"peRatioTTM": 28.4, "freeCashFlowTTM": 99000000000, "marketCapTTM": 1}"#;
        let metrics: KeyMetricsTtm = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.pe_ratio_ttm, Some(28.4));
        assert_eq!(metrics.free_cash_flow_ttm, Some(9.9e10));
    }

    #[test]
    fn test_income_statement_revenue_point() {
        let json = r#"{"date": "2023-09-30", "symbol": "AAPL", "revenue": 383285000000}"#;
        let statement: IncomeStatement = serde_json::from_str(json).unwrap();
        let point = statement.revenue_point();
        assert_eq!(point.period, NaiveDate::from_ymd_opt(2023, 9, 30));
        assert_eq!(point.revenue, 3.83285e11);
    }

    #[test]
    fn test_missing_revenue_defaults_to_zero() {
        let json = r#"{"date": "not-a-date"}"#;
        let statement: IncomeStatement = serde_json::from_str(json).unwrap();
        assert_eq!(statement.revenue, 0.0);
        assert_eq!(statement.parsed_date(), None);
    }

    #[test]
    fn test_fragment_from_partial_endpoints() {
        let metrics = KeyMetricsTtm {
            pe_ratio_ttm: Some(15.0),
            free_cash_flow_ttm: Some(1.0e9),
        };
        let fragment = fragment(None, Some(&metrics));
        assert_eq!(fragment.pe_ratio, Some(15.0));
        assert_eq!(fragment.free_cash_flow, Some(1.0e9));
        assert_eq!(fragment.name, None);
        assert_eq!(fragment.price, None);
    }
}
