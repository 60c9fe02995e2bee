//! Error types for the intrinsic valuation pipeline.
//!
//! Three layers of failure are modelled separately:
//! - [`SourceError`]: an upstream data source could not answer. Most kinds are
//!   absorbed by fallback chains and never reach the user.
//! - [`ConfigError`]: the numeric valuation configuration is unusable.
//! - [`IntrinsicError`]: a failure that aborts the evaluation of one ticker.

use std::fmt;
use thiserror::Error;

/// Classification of a data source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    /// The source could not be reached or answered with a non-success status.
    Unavailable,
    /// The source answered but had nothing for the symbol.
    NoData,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// The source refused the request because of rate limiting.
    RateLimited,
    /// The source requires a credential that was not configured.
    MissingCredential,
    /// The payload could not be parsed.
    Malformed,
    /// The request could not be issued at all.
    Internal,
}

impl SourceErrorKind {
    /// Short lowercase label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::NoData => "no_data",
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::MissingCredential => "missing_credential",
            Self::Malformed => "malformed",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by a [`MarketDataProvider`](crate::MarketDataProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    /// Create an error of the given kind.
    pub fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The source could not be reached or answered with an error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable, message)
    }

    /// The source had nothing for this symbol.
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::NoData, message)
    }

    /// The request timed out.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Timeout, message)
    }

    /// The payload could not be parsed.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Malformed, message)
    }

    /// The request could not be issued at all.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Internal, message)
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    /// Human-readable detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a fallback chain may substitute another source for this one.
    ///
    /// Only [`SourceErrorKind::Internal`] escapes the chain.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self.kind, SourceErrorKind::Internal)
    }
}

/// Invalid numeric valuation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Discount rate outside the supported range.
    #[error("discount rate {value} outside [{min}, {max}]")]
    DiscountRateOutOfRange {
        /// Supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Terminal growth rate outside the supported range.
    #[error("terminal growth rate {value} outside [{min}, {max}]")]
    TerminalGrowthOutOfRange {
        /// Supplied value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// The terminal value diverges unless the discount rate exceeds terminal growth.
    #[error(
        "discount rate {discount_rate} must exceed terminal growth rate {terminal_growth_rate}"
    )]
    DivergentTerminalValue {
        /// Supplied discount rate.
        discount_rate: f64,
        /// Supplied terminal growth rate.
        terminal_growth_rate: f64,
    },

    /// A rate was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Offending field.
        field: &'static str,
    },
}

/// Symbol validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// Empty input after trimming.
    #[error("symbol cannot be empty")]
    Empty,
    /// Longer than the allowed maximum.
    #[error("symbol length {len} exceeds max {max}")]
    TooLong {
        /// Observed length.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Does not begin with an ASCII letter.
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    InvalidStart {
        /// First character.
        ch: char,
    },
    /// Contains a character outside `[A-Z0-9.-]`.
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    InvalidChar {
        /// Offending character.
        ch: char,
        /// Its position.
        index: usize,
    },
}

/// The main error type for evaluating one ticker.
#[derive(Debug, Error)]
pub enum IntrinsicError {
    /// The ticker could not be parsed.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(#[from] SymbolError),

    /// No source returned anything usable for the symbol.
    #[error("no market data available for {0}")]
    NoData(String),

    /// A source failed in a way no fallback can absorb.
    #[error("data source '{source_name}' failed: {error}")]
    Source {
        /// Provider that failed.
        source_name: String,
        /// Underlying failure.
        error: SourceError,
    },

    /// Unusable valuation configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A specialized Result type for intrinsic operations.
pub type Result<T> = std::result::Result<T, IntrinsicError>;
