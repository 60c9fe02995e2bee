#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and provider traits for the intrinsic valuation pipeline.
//!
//! This crate provides the shared vocabulary of the workspace: normalized
//! symbols, optional-valued company profiles, revenue histories, growth
//! estimates, the [`MarketDataProvider`] abstraction and the error taxonomy.

/// The version of the intrinsic-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

// Re-exports
pub use config::ValuationConfig;
pub use error::{
    ConfigError, IntrinsicError, Result, SourceError, SourceErrorKind, SymbolError,
};
pub use provider::MarketDataProvider;
pub use types::{
    CompanyProfile, Date, GrowthEstimate, GrowthSource, ProfileFragment, RevenuePoint,
    RevenueSeries, Symbol,
};
