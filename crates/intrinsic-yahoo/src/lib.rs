//! Yahoo Finance data source for intrinsic.
//!
//! Reads company attributes, trailing metrics and annual revenue history from
//! a single `quoteSummary` call. Used as the secondary source in the
//! pipeline's fallback chain; no credential is needed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use intrinsic_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new();
//!     let summary = client.quote_summary("MSFT").await?;
//!     println!("{:?}", summary.fragment());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod provider;
mod types;

pub use client::{DEFAULT_TIMEOUT, YahooClient};
pub use error::YahooError;
pub use provider::PROVIDER_NAME;
pub use types::*;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
