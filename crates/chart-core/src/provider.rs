// File: crates/chart-core/src/provider.rs
// Summary: History provider boundary (external collaborator) plus an in-memory implementation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProviderError};
use crate::resample::weekly_bars;
use crate::series::{Frequency, PricePoint, PriceSeries};

/// How much history to request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    Month1,
    Month3,
    Month6,
    #[default]
    Year1,
    Year2,
    Year5,
    /// All available history.
    Max,
}

impl Period {
    /// Lookback window measured back from the most recent bar; `None` means no limit.
    pub fn lookback(&self) -> Option<Duration> {
        match self {
            Period::Month1 => Some(Duration::days(30)),
            Period::Month3 => Some(Duration::days(90)),
            Period::Month6 => Some(Duration::days(182)),
            Period::Year1 => Some(Duration::days(365)),
            Period::Year2 => Some(Duration::days(730)),
            Period::Year5 => Some(Duration::days(1826)),
            Period::Max => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Month1 => "1mo",
            Period::Month3 => "3mo",
            Period::Month6 => "6mo",
            Period::Year1 => "1y",
            Period::Year2 => "2y",
            Period::Year5 => "5y",
            Period::Max => "max",
        }
    }
}

impl FromStr for Period {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" | "1m" | "1month" => Ok(Period::Month1),
            "3mo" | "3m" | "3months" => Ok(Period::Month3),
            "6mo" | "6m" | "6months" => Ok(Period::Month6),
            "1y" | "1year" => Ok(Period::Year1),
            "2y" | "2years" => Ok(Period::Year2),
            "5y" | "5years" => Ok(Period::Year5),
            "max" | "all" => Ok(Period::Max),
            _ => Err(ConfigError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Period> for String {
    fn from(p: Period) -> String { p.label().to_string() }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// One history fetch: ticker, depth and sampling frequency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: String,
    pub period: Period,
    pub frequency: Frequency,
}

impl HistoryRequest {
    pub fn new(ticker: impl Into<String>, period: Period, frequency: Frequency) -> Self {
        Self { ticker: ticker.into(), period, frequency }
    }
}

/// External quote/history source. An unknown ticker or empty range is an empty series,
/// not an error; `Err` is reserved for the source itself failing.
pub trait HistoryProvider {
    fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError>;
}

impl<P: HistoryProvider + ?Sized> HistoryProvider for &P {
    fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        (**self).history(request)
    }
}

/// Provider over daily bars held in memory. Weekly requests are served by
/// aggregating the stored daily bars, the way a remote source returns weekly candles.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    daily: HashMap<String, Vec<PricePoint>>,
    failing: HashMap<String, String>,
}

impl InMemoryProvider {
    pub fn new() -> Self { Self::default() }

    /// Register daily bars for a ticker (stored upper-cased).
    pub fn insert(&mut self, ticker: &str, daily: Vec<PricePoint>) {
        self.daily.insert(ticker.trim().to_uppercase(), daily);
    }

    pub fn with_series(mut self, ticker: &str, daily: Vec<PricePoint>) -> Self {
        self.insert(ticker, daily);
        self
    }

    /// Make every request for `ticker` fail with `reason`.
    pub fn with_failure(mut self, ticker: &str, reason: impl Into<String>) -> Self {
        self.failing.insert(ticker.trim().to_uppercase(), reason.into());
        self
    }
}

impl HistoryProvider for InMemoryProvider {
    fn history(&self, request: &HistoryRequest) -> Result<PriceSeries, ProviderError> {
        let key = request.ticker.trim().to_uppercase();
        if let Some(reason) = self.failing.get(&key) {
            return Err(ProviderError::unavailable(&key, reason.clone()));
        }
        let Some(bars) = self.daily.get(&key) else {
            return Ok(PriceSeries::empty(key, request.frequency));
        };
        let daily = PriceSeries::normalized(key, Frequency::Daily, bars.clone());
        let daily = apply_period(&daily, request.period);
        Ok(match request.frequency {
            Frequency::Daily => daily,
            Frequency::Weekly => weekly_bars(&daily),
        })
    }
}

/// Trim a series to the requested period, measured back from its last bar.
pub fn apply_period(series: &PriceSeries, period: Period) -> PriceSeries {
    match (period.lookback(), series.last()) {
        (Some(lookback), Some(last)) => series.since(last.timestamp - lookback),
        _ => series.clone(),
    }
}
