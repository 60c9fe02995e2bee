//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{IncomeStatement, KeyMetricsTtm, Profile},
};
use reqwest::Client;
use std::{env, time::Duration};
use tracing::warn;

/// Base URL for the FMP v3 API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Financial Modeling Prep API client.
///
/// A client without an API key is valid: every request fails with
/// [`FmpError::MissingApiKey`], which callers treat as the source being absent.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    timeout: Duration,
    api_key: Option<String>,
    base_url: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_key(Some(api_key.into()))
    }

    /// Create a client that has no credential.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::with_key(None)
    }

    fn with_key(api_key: Option<String>) -> Self {
        Self {
            client: build_http_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| {
                warn!(error = %e, "failed to build FMP HTTP client, using reqwest defaults");
                Client::new()
            }),
            timeout: DEFAULT_TIMEOUT,
            api_key,
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(FmpError::MissingApiKey);
        }

        Ok(Self::new(api_key))
    }

    /// Replace the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Point the client at a different host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str, api_key: &str) -> String {
        if endpoint.contains('?') {
            format!("{}/{endpoint}&apikey={api_key}", self.base_url)
        } else {
            format!("{}/{endpoint}?apikey={api_key}", self.base_url)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let api_key = self.api_key.as_deref().ok_or(FmpError::MissingApiKey)?;
        let url = self.url(endpoint, api_key);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch an endpoint that answers with an array and keep the first element.
    async fn first<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        symbol: &str,
    ) -> Result<T> {
        let items: Vec<T> = self.get(endpoint).await?;
        items
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::NoData(symbol.to_uppercase()))
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is empty.
    pub async fn company_profile(&self, symbol: &str) -> Result<Profile> {
        let endpoint = format!("profile/{}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get trailing twelve-month key metrics for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is empty.
    pub async fn key_metrics_ttm(&self, symbol: &str) -> Result<KeyMetricsTtm> {
        let endpoint = format!("key-metrics-ttm/{}", symbol.to_uppercase());
        self.first(&endpoint, symbol).await
    }

    /// Get annual income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("?limit={l}")).unwrap_or_default();
        let endpoint = format!("income-statement/{}{}", symbol.to_uppercase(), limit_param);
        self.get(&endpoint).await
    }
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}
