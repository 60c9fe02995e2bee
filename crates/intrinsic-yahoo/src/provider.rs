//! [`MarketDataProvider`] implementation backed by Yahoo Finance.

use crate::client::YahooClient;
use async_trait::async_trait;
use intrinsic_traits::{MarketDataProvider, ProfileFragment, RevenueSeries, SourceError, Symbol};

/// Provider name used in logs and provenance notes.
pub const PROVIDER_NAME: &str = "yahoo";

#[async_trait]
impl MarketDataProvider for YahooClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn profile(&self, symbol: &Symbol) -> Result<ProfileFragment, SourceError> {
        let fragment = self.cached_quote_summary(symbol.as_str()).await?.fragment();
        if fragment.is_empty() {
            return Err(SourceError::no_data(format!("empty quote summary for {symbol}")));
        }
        Ok(fragment)
    }

    async fn revenue_history(&self, symbol: &Symbol) -> Result<RevenueSeries, SourceError> {
        let series = self.cached_quote_summary(symbol.as_str()).await?.revenue_series();
        if series.is_empty() {
            return Err(SourceError::no_data(format!(
                "no income statement history for {symbol}"
            )));
        }
        Ok(series)
    }
}
