//! Financial Modeling Prep (FMP) data source for intrinsic.
//!
//! This crate provides a client for the three FMP endpoints the valuation
//! pipeline reads, plus a [`MarketDataProvider`](intrinsic_traits::MarketDataProvider)
//! implementation so the client can sit first in the pipeline's fallback chain.
//!
//! # Usage
//!
//! ```rust,ignore
//! use intrinsic_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Company profile (name, price, market cap, shares, description)
//!     let profile = client.company_profile("AAPL").await?;
//!
//!     // Trailing twelve-month metrics (P/E, free cash flow)
//!     let metrics = client.key_metrics_ttm("AAPL").await?;
//!
//!     // Up to six annual income statements, most recent first
//!     let income = client.income_statement("AAPL", Some(6)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod provider;
mod types;

pub use client::{DEFAULT_TIMEOUT, FmpClient};
pub use error::FmpError;
pub use provider::PROVIDER_NAME;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
