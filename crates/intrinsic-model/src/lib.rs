//! Valuation models for the intrinsic pipeline.
//!
//! This crate turns normalized market data into an assessment:
//! - Growth: revenue CAGR over a provider fallback chain
//! - DCF: two-stage discounted cash flow per-share value and margin of safety
//! - Moat: curated moat and durability from size and business description
//! - Score: value score, recommendation tier and quality labels
//!
//! # Example
//!
//! ```ignore
//! use intrinsic_model::dcf::{DcfInputs, DcfModel};
//!
//! let model = DcfModel::default();
//! let valuation = model.value(&DcfInputs {
//!     free_cash_flow: Some(10.0e9),
//!     shares_outstanding: Some(1.0e9),
//!     price: Some(100.0),
//!     growth_rate: 0.10,
//! });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod dcf;
pub mod growth;
pub mod moat;
pub mod score;

// Re-export key types
pub use dcf::{DcfInputs, DcfModel, Valuation};
pub use growth::{GrowthEstimator, GrowthEstimatorConfig, revenue_cagr};
pub use moat::{Durability, Moat, MoatAssessment, MoatClassifier};
pub use score::{
    GrowthQuality, MoatStrength, Recommendation, ScoreAggregator, ScoreInputs, ScoreRecord,
};
