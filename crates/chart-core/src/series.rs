// File: crates/chart-core/src/series.rs
// Summary: Price bars, price series and indicator-derived series.
// Notes:
// - PriceSeries is immutable after construction; every request builds a new one.
// - DerivedSeries uses `None` for "no value" (window not yet full).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Bar timestamp. Daily bars are stamped at midnight.
pub type Timestamp = NaiveDateTime;

/// Sampling frequency of a price series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "1d",
            Frequency::Weekly => "1wk",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    /// Construct a bar enforcing OHLC invariants:
    /// low <= min(open,close), high >= max(open,close), and low <= high.
    pub fn try_new(timestamp: Timestamp, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Result<Self, SeriesError> {
        if ![open, high, low, close].iter().all(|v| v.is_finite()) {
            return Err(SeriesError::InvalidBar("non-finite price"));
        }
        if low > open.min(close) { return Err(SeriesError::InvalidBar("low above min(open,close)")); }
        if high < open.max(close) { return Err(SeriesError::InvalidBar("high below max(open,close)")); }
        if low > high { return Err(SeriesError::InvalidBar("low above high")); }
        Ok(Self { timestamp, open, high, low, close, volume })
    }

    /// Flat bar where open = high = low = close. Handy for close-only data.
    pub fn from_close(timestamp: Timestamp, close: f64) -> Self {
        Self { timestamp, open: close, high: close, low: close, close, volume: 0 }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Ordered bars for one ticker at one frequency.
/// Contract: timestamps strictly ascending (unique); gaps are not filled.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    frequency: Frequency,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Strict constructor: rejects unordered or duplicated timestamps.
    pub fn new(ticker: impl Into<String>, frequency: Frequency, points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        if let Some(index) = points.windows(2).position(|w| w[1].timestamp <= w[0].timestamp) {
            return Err(SeriesError::NotAscending { index: index + 1 });
        }
        Ok(Self { ticker: ticker.into(), frequency, points })
    }

    /// Sorts by timestamp; for duplicated timestamps the last bar given wins.
    pub fn normalized(ticker: impl Into<String>, frequency: Frequency, mut points: Vec<PricePoint>) -> Self {
        // stable sort keeps input order among equal timestamps
        points.sort_by_key(|p| p.timestamp);
        let mut out: Vec<PricePoint> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(last) if last.timestamp == p.timestamp => *last = p,
                _ => out.push(p),
            }
        }
        Self { ticker: ticker.into(), frequency, points: out }
    }

    pub fn empty(ticker: impl Into<String>, frequency: Frequency) -> Self {
        Self { ticker: ticker.into(), frequency, points: Vec::new() }
    }

    pub fn ticker(&self) -> &str { &self.ticker }
    pub fn frequency(&self) -> Frequency { self.frequency }
    pub fn points(&self) -> &[PricePoint] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> { self.points.first() }
    pub fn last(&self) -> Option<&PricePoint> { self.points.last() }

    /// Bars with timestamp >= `start`, as a new series.
    pub fn since(&self, start: Timestamp) -> Self {
        let idx = self.points.partition_point(|p| p.timestamp < start);
        Self { ticker: self.ticker.clone(), frequency: self.frequency, points: self.points[idx..].to_vec() }
    }

    /// Pair every timestamp with a computed value. `values.len()` must equal `self.len()`.
    pub fn derive(&self, name: impl Into<String>, values: Vec<Option<f64>>) -> DerivedSeries {
        debug_assert_eq!(values.len(), self.points.len());
        let points = self.points.iter().zip(values).map(|(p, v)| (p.timestamp, v)).collect();
        DerivedSeries { name: name.into(), frequency: self.frequency, points }
    }
}

/// Indicator output aligned to the timestamps of its source series.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub name: String,
    pub frequency: Frequency,
    pub points: Vec<(Timestamp, Option<f64>)>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).and_then(|&(_, v)| v)
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|&(_, v)| v).collect()
    }

    pub fn defined(&self) -> impl Iterator<Item = (Timestamp, f64)> + '_ {
        self.points.iter().filter_map(|&(t, v)| v.map(|v| (t, v)))
    }

    pub fn has_values(&self) -> bool {
        self.points.iter().any(|(_, v)| v.is_some())
    }

    /// Index of the first defined value.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.points.iter().position(|(_, v)| v.is_some())
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|&(_, v)| v)
    }
}
