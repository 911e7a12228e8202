// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for configuration, series construction, data providers and the dashboard pass.

use thiserror::Error;

use crate::types::PRICE_SHARE_RANGE;

/// Rejected configuration input. Raised before anything reaches the indicator engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid window {window} for {kind}: must be a positive integer")]
    InvalidWindow { kind: &'static str, window: i64 },
    #[error("invalid band multiplier {multiplier} for {kind}: must be finite and positive")]
    InvalidMultiplier { kind: &'static str, multiplier: f64 },
    #[error("unknown period '{0}' (supported: 1mo, 3mo, 6mo, 1y, 2y, 5y, max)")]
    UnknownPeriod(String),
    #[error("unknown theme '{0}' (supported: dark, light)")]
    UnknownTheme(String),
    #[error("invalid price pane share {0}: must be within [{min}, {max}]", min = PRICE_SHARE_RANGE.0, max = PRICE_SHARE_RANGE.1)]
    InvalidPriceShare(f64),
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// A price series that violates ordering or OHLC invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar at index {index} is not strictly after its predecessor")]
    NotAscending { index: usize },
    #[error("invalid bar: {0}")]
    InvalidBar(&'static str),
}

/// Failure reported by the external history provider (network, auth, rate limit, bad file...).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("data unavailable for {ticker}: {reason}")]
    Unavailable { ticker: String, reason: String },
}

impl ProviderError {
    pub fn unavailable(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable { ticker: ticker.into(), reason: reason.into() }
    }
}

/// Outcome of a full dashboard pass that produced no chart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("no data to chart for {ticker}")]
    NoData { ticker: String },
    #[error(transparent)]
    DataUnavailable(#[from] ProviderError),
}
