//! Yahoo Finance client implementation.
//!
//! `quoteSummary` requires a session: a cookie from `fc.yahoo.com` and a
//! crumb token bound to it. The crumb is fetched lazily and cached until Yahoo
//! rejects it.
//!
//! Profile and revenue history come from the same `quoteSummary` payload, so
//! the most recent successful result is kept and reused for the same symbol.

use crate::{
    Result,
    error::YahooError,
    types::{QUOTE_SUMMARY_MODULES, QuoteSummaryResponse, QuoteSummaryResult},
};
use reqwest::{Client, StatusCode};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Base URL for Yahoo query endpoints.
const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Endpoint that sets the session cookie.
const YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Yahoo Finance client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    timeout: Duration,
    base_url: String,
    cookie_url: String,
    crumb: Arc<Mutex<Option<String>>>,
    last_summary: Arc<Mutex<Option<(String, QuoteSummaryResult)>>>,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    /// Create a client with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: build_http_client(DEFAULT_TIMEOUT).unwrap_or_else(|e| {
                warn!(error = %e, "failed to build Yahoo HTTP client, using reqwest defaults");
                Client::new()
            }),
            timeout: DEFAULT_TIMEOUT,
            base_url: YAHOO_BASE_URL.to_string(),
            cookie_url: YAHOO_COOKIE_URL.to_string(),
            crumb: Arc::new(Mutex::new(None)),
            last_summary: Arc::new(Mutex::new(None)),
        }
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

    /// Point query endpoints at a different host, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Point the session cookie request at a different URL.
    #[must_use]
    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = cookie_url.into();
        self
    }

    /// Drop the cached crumb so the next request starts a new session.
    pub async fn invalidate_session(&self) {
        *self.crumb.lock().await = None;
    }

    /// Return the cached crumb or establish a session to get one.
    async fn crumb(&self) -> Result<String> {
        let mut guard = self.crumb.lock().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }

        // The cookie endpoint answers 404 but still sets the session cookie.
        if let Err(e) = self
            .client
            .get(&self.cookie_url)
            .timeout(self.timeout)
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .await
        {
            debug!(error = %e, "yahoo cookie request failed");
        }

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .timeout(self.timeout)
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(YahooError::Session(format!(
                "crumb request returned HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let crumb = body.trim();
        if crumb.is_empty()
            || crumb.len() >= 100
            || crumb.contains(' ')
            || crumb.contains("<html")
        {
            return Err(YahooError::Session("invalid crumb payload".to_string()));
        }

        *guard = Some(crumb.to_string());
        Ok(crumb.to_string())
    }

    /// Fetch the `quoteSummary` modules needed for valuation.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be established, the request
    /// fails, or Yahoo has no result for the symbol.
    pub async fn quote_summary(&self, symbol: &str) -> Result<QuoteSummaryResult> {
        let symbol = symbol.to_uppercase();
        let crumb = self.crumb().await?;
        let url = format!("{}/v10/finance/quoteSummary/{symbol}", self.base_url);
        let modules = QUOTE_SUMMARY_MODULES.join(",");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .query(&[("modules", modules.as_str()), ("crumb", crumb.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(YahooError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.invalidate_session().await;
                return Err(YahooError::Session(format!(
                    "crumb rejected with HTTP {}",
                    response.status()
                )));
            }
            StatusCode::NOT_FOUND => return Err(YahooError::NoData(symbol)),
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();
                return Err(YahooError::Api(format!("HTTP {status}: {text}")));
            }
            _ => {}
        }

        let text = response.text().await?;
        let envelope: QuoteSummaryResponse = serde_json::from_str(&text)?;

        if let Some(err) = envelope.quote_summary.error {
            return Err(YahooError::Api(format!("{}: {}", err.code, err.description)));
        }

        envelope
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(YahooError::NoData(symbol))
    }

    /// Like [`quote_summary`](Self::quote_summary), but answers a repeated
    /// request for the previous symbol without another round trip.
    ///
    /// Only successful results are kept.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying `quoteSummary` request.
    pub async fn cached_quote_summary(&self, symbol: &str) -> Result<QuoteSummaryResult> {
        let symbol = symbol.to_uppercase();
        let mut last = self.last_summary.lock().await;
        if let Some((cached, result)) = last.as_ref()
            && *cached == symbol
        {
            debug!(%symbol, "reusing quote summary");
            return Ok(result.clone());
        }

        let result = self.quote_summary(&symbol).await?;
        *last = Some((symbol, result.clone()));
        Ok(result)
    }
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .build()?)
}
