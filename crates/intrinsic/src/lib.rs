#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # intrinsic
//!
//! Value-investing valuation pipeline for listed equities.
//!
//! intrinsic is an umbrella crate that re-exports the intrinsic sub-crates and
//! provides the batch [`Pipeline`] and report formatting on top of them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use intrinsic::{Pipeline, ValuationConfig};
//! use intrinsic::fmp::FmpClient;
//! use intrinsic::yahoo::YahooClient;
//! use intrinsic::report;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(
//!     vec![Box::new(FmpClient::from_env()?), Box::new(YahooClient::new())],
//!     ValuationConfig::default(),
//! )?;
//!
//! let mut rows = pipeline.run(&["AAPL", "KO"]).await;
//! report::rank(&mut rows);
//! print!("{}", report::render_text(&rows));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! For each ticker, in input order:
//!
//! 1. **Profile**: fragments from each provider are merged field by field,
//!    primary first
//! 2. **Growth**: revenue CAGR from the first provider with enough history,
//!    else a fixed 8%
//! 3. **Valuation**: two-stage DCF to a per-share value and margin of safety
//! 4. **Scoring**: value score, recommendation, moat and growth labels
//!
//! A ticker that fails produces a [`ResultRow::Failed`] without stopping the
//! batch.

/// Version information for the intrinsic crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;
pub mod report;

pub use pipeline::{MAX_TICKERS, Pipeline, ResultRow, TickerReport};

// ============================================================================
// Core Types
// ============================================================================

/// Core types, the provider trait and errors.
pub mod traits {
    pub use intrinsic_traits::*;
}

pub use intrinsic_traits::{
    ConfigError, IntrinsicError, MarketDataProvider, Result, Symbol, ValuationConfig,
};

// ============================================================================
// Models
// ============================================================================

/// Growth, DCF, moat and score models.
pub mod model {
    pub use intrinsic_model::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep client, the primary source.
///
/// Set the `FMP_API_KEY` environment variable or add it to a `.env` file.
pub mod fmp {
    pub use intrinsic_fmp::*;
}

/// Yahoo Finance client, the secondary source.
pub mod yahoo {
    pub use intrinsic_yahoo::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        IntrinsicError, MarketDataProvider, Pipeline, Result, ResultRow, Symbol, TickerReport,
        ValuationConfig,
    };
}
