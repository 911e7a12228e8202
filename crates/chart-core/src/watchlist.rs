// File: crates/chart-core/src/watchlist.rs
// Summary: Per-ticker watchlist rows with an explicit loaded / no-data / failed status.

use serde::Serialize;
use tracing::{debug, warn};

use crate::provider::{HistoryProvider, HistoryRequest, Period};
use crate::series::{Frequency, PriceSeries, Timestamp};

/// Latest price and change against the previous bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quote {
    pub price: f64,
    pub as_of: Timestamp,
    /// `None` with a single bar or a zero previous close.
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

impl Quote {
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let points = series.points();
        let last = points.last()?;
        let prev = points.len().checked_sub(2).map(|i| points[i].close);
        let change = prev.map(|p| last.close - p);
        let change_pct = prev.filter(|p| *p != 0.0).map(|p| (last.close - p) / p * 100.0);
        Some(Self { price: last.close, as_of: last.timestamp, change, change_pct })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Loaded(Quote),
    /// Provider answered with an empty series (unknown ticker, no trading in range).
    NoData,
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WatchlistRow {
    pub ticker: String,
    #[serde(flatten)]
    pub status: RowStatus,
}

impl WatchlistRow {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, RowStatus::Loaded(_))
    }
}

/// Load one row per ticker. A failing ticker never hides the others.
pub fn load_watchlist<P: HistoryProvider + ?Sized>(provider: &P, tickers: &[String]) -> Vec<WatchlistRow> {
    tickers
        .iter()
        .map(|ticker| {
            let request = HistoryRequest::new(ticker.as_str(), Period::Month1, Frequency::Daily);
            let status = match provider.history(&request) {
                Ok(series) => match Quote::from_series(&series) {
                    Some(q) => RowStatus::Loaded(q),
                    None => RowStatus::NoData,
                },
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "watchlist row failed to load");
                    RowStatus::Failed { reason: e.to_string() }
                }
            };
            debug!(ticker = %ticker, ?status, "watchlist row");
            WatchlistRow { ticker: ticker.clone(), status }
        })
        .collect()
}
