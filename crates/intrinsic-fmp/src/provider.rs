//! [`MarketDataProvider`] implementation backed by FMP.

use crate::{client::FmpClient, types};
use async_trait::async_trait;
use intrinsic_traits::{
    MarketDataProvider, ProfileFragment, RevenueSeries, SourceError, Symbol,
    types::MAX_REVENUE_PERIODS,
};
use tracing::debug;

/// Provider name used in logs and provenance notes.
pub const PROVIDER_NAME: &str = "fmp";

#[async_trait]
impl MarketDataProvider for FmpClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    /// Combines the `profile` and `key-metrics-ttm` endpoints.
    ///
    /// Either endpoint may fail on its own; the fragment carries whatever the
    /// other one returned. Only when both fail is an error reported.
    async fn profile(&self, symbol: &Symbol) -> Result<ProfileFragment, SourceError> {
        let profile = self.company_profile(symbol.as_str()).await;
        let metrics = self.key_metrics_ttm(symbol.as_str()).await;

        match (profile, metrics) {
            (Err(profile_err), Err(metrics_err)) => {
                debug!(%symbol, %profile_err, %metrics_err, "fmp profile and metrics unavailable");
                let profile_err = SourceError::from(profile_err);
                let metrics_err = SourceError::from(metrics_err);
                // Surface an unrecoverable failure if either endpoint produced one.
                if metrics_err.is_recoverable() {
                    Err(profile_err)
                } else {
                    Err(metrics_err)
                }
            }
            (profile, metrics) => {
                if let Err(e) = &profile {
                    debug!(%symbol, error = %e, "fmp profile unavailable");
                }
                if let Err(e) = &metrics {
                    debug!(%symbol, error = %e, "fmp key metrics unavailable");
                }
                Ok(types::fragment(profile.ok().as_ref(), metrics.ok().as_ref()))
            }
        }
    }

    async fn revenue_history(&self, symbol: &Symbol) -> Result<RevenueSeries, SourceError> {
        let statements = self
            .income_statement(symbol.as_str(), Some(MAX_REVENUE_PERIODS as u32))
            .await?;
        if statements.is_empty() {
            return Err(SourceError::no_data(format!(
                "no income statements for {symbol}"
            )));
        }
        Ok(RevenueSeries::sorted_by_period(
            statements.iter().map(types::IncomeStatement::revenue_point).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_traits::SourceErrorKind;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn symbol(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_profile_merges_both_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile/AAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "symbol": "AAA",
                "companyName": "Triple A Corp",
                "price": 100.0,
                "mktCap": 1.0e11,
                "sharesOutstanding": 1.0e9,
                "description": "Recurring revenue software."
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/key-metrics-ttm/AAA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "peRatioTTM": 18.0,
                "freeCashFlowTTM": 1.0e10
            }])))
            .mount(&server)
            .await;

        let client = FmpClient::new("k").with_base_url(server.uri());
        let fragment = client.profile(&symbol("AAA")).await.unwrap();
        assert_eq!(fragment.name.as_deref(), Some("Triple A Corp"));
        assert_eq!(fragment.price, Some(100.0));
        assert_eq!(fragment.pe_ratio, Some(18.0));
        assert_eq!(fragment.free_cash_flow, Some(1.0e10));
        assert_eq!(fragment.shares_outstanding, Some(1.0e9));
    }

    #[tokio::test]
    async fn test_profile_survives_missing_metrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile/BBB"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"symbol": "BBB", "price": 12.5}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/key-metrics-ttm/BBB"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = FmpClient::new("k").with_base_url(server.uri());
        let fragment = client.profile(&symbol("BBB")).await.unwrap();
        assert_eq!(fragment.price, Some(12.5));
        assert_eq!(fragment.pe_ratio, None);
    }

    #[tokio::test]
    async fn test_profile_without_key_is_recoverable() {
        let client = FmpClient::unauthenticated();
        let err = client.profile(&symbol("AAA")).await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::MissingCredential);
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_revenue_history_most_recent_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/income-statement/CCC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2023-12-31", "revenue": 121.0},
                {"date": "2024-12-31", "revenue": 133.1},
                {"date": "2021-12-31", "revenue": 100.0},
                {"date": "2022-12-31", "revenue": 110.0}
            ])))
            .mount(&server)
            .await;

        let client = FmpClient::new("k").with_base_url(server.uri());
        let series = client.revenue_history(&symbol("CCC")).await.unwrap();
        assert_eq!(series.positive_revenues(), vec![133.1, 121.0, 110.0, 100.0]);
    }

    #[tokio::test]
    async fn test_revenue_history_empty_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/income-statement/DDD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = FmpClient::new("k").with_base_url(server.uri());
        let err = client.revenue_history(&symbol("DDD")).await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::NoData);
    }
}
