//! Market data provider trait.
//!
//! A provider wraps one upstream data source. The pipeline holds providers in
//! priority order and falls through them: the first answer wins, failures are
//! substitutions rather than retries.

use crate::{
    error::SourceError,
    types::{ProfileFragment, RevenueSeries, Symbol},
};
use async_trait::async_trait;
use std::fmt::Debug;

/// A source of company fundamentals keyed by ticker.
///
/// Implementations perform network I/O but never retry; a failed or empty
/// response is reported as a [`SourceError`] so the caller can decide whether
/// to fall back.
#[async_trait]
pub trait MarketDataProvider: Debug + Send + Sync {
    /// Short identifier used in logs and provenance notes, e.g. `"fmp"`.
    fn name(&self) -> &str;

    /// Fetch whatever profile attributes and trailing metrics the source has.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source is unreachable, has no data for
    /// the symbol, or answers with something unparseable.
    async fn profile(&self, symbol: &Symbol) -> Result<ProfileFragment, SourceError>;

    /// Fetch up to six fiscal periods of revenue, most recent first.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MarketDataProvider::profile`].
    async fn revenue_history(&self, symbol: &Symbol) -> Result<RevenueSeries, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RevenuePoint;

    #[derive(Debug)]
    struct FixedProvider;

    #[async_trait]
    impl MarketDataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn profile(&self, _symbol: &Symbol) -> Result<ProfileFragment, SourceError> {
            Ok(ProfileFragment {
                price: Some(42.0),
                ..ProfileFragment::empty()
            })
        }

        async fn revenue_history(&self, symbol: &Symbol) -> Result<RevenueSeries, SourceError> {
            if symbol.as_str() == "NONE" {
                return Err(SourceError::no_data("no statements"));
            }
            Ok(RevenueSeries::new(vec![RevenuePoint::new(None, 1.0)]))
        }
    }

    #[tokio::test]
    async fn test_provider_object_safety() {
        let provider: Box<dyn MarketDataProvider> = Box::new(FixedProvider);
        let symbol = Symbol::parse("AAA").unwrap();

        assert_eq!(provider.name(), "fixed");
        assert_eq!(provider.profile(&symbol).await.unwrap().price, Some(42.0));
        assert_eq!(provider.revenue_history(&symbol).await.unwrap().len(), 1);

        let none = Symbol::parse("NONE").unwrap();
        assert!(provider.revenue_history(&none).await.is_err());
    }

    #[test]
    fn test_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MarketDataProvider>();
    }
}
