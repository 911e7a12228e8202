// File: crates/chart-core/src/resample.rs
// Summary: Series resampler; weekly bars either re-fetched from the provider or aggregated from daily bars.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::provider::{HistoryProvider, HistoryRequest, Period};
use crate::series::{Frequency, PricePoint, PriceSeries, Timestamp};

/// Where weekly bars come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklySource {
    /// Separate provider fetch at weekly frequency over maximum history.
    #[default]
    Refetch,
    /// Fold the daily series already fetched into calendar weeks. Saves a round trip,
    /// but the history depth is limited to the daily period.
    Aggregate,
}

pub struct Resampler<'a, P: ?Sized> {
    provider: &'a P,
    source: WeeklySource,
}

impl<'a, P: HistoryProvider + ?Sized> Resampler<'a, P> {
    pub fn new(provider: &'a P, source: WeeklySource) -> Self {
        Self { provider, source }
    }

    /// Series for `base.ticker()` at `target` frequency. `min_bars` is the largest window
    /// that will be computed on the result; falling short is logged, not an error.
    pub fn series_for(&self, base: &PriceSeries, target: Frequency, min_bars: usize) -> Result<PriceSeries, ProviderError> {
        if base.frequency() == target {
            return Ok(base.clone());
        }
        let out = match (target, self.source) {
            (Frequency::Weekly, WeeklySource::Aggregate) => weekly_bars(base),
            _ => {
                let request = HistoryRequest::new(base.ticker(), Period::Max, target);
                self.provider.history(&request)?
            }
        };
        debug!(ticker = base.ticker(), frequency = target.label(), bars = out.len(), source = ?self.source, "resampled series");
        if out.len() < min_bars {
            warn!(
                ticker = base.ticker(),
                bars = out.len(),
                window = min_bars,
                "not enough {} bars to fill the window; output will be partial",
                target.label()
            );
        }
        Ok(out)
    }
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Aggregate daily bars into calendar-week bars labelled by the week's Monday (midnight).
/// For each week: open=first open, close=last close, high=max high, low=min low, volume=sum.
pub fn weekly_bars(daily: &PriceSeries) -> PriceSeries {
    let mut out: Vec<PricePoint> = Vec::new();
    let mut current: Option<(NaiveDate, PricePoint)> = None;

    for bar in daily.points() {
        let week = week_start(bar.date());
        match current.as_mut() {
            Some((start, agg)) if *start == week => {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.volume = agg.volume.saturating_add(bar.volume);
            }
            _ => {
                if let Some((_, agg)) = current.take() {
                    out.push(agg);
                }
                current = Some((week, PricePoint { timestamp: week_label(week), ..*bar }));
            }
        }
    }
    if let Some((_, agg)) = current {
        out.push(agg);
    }

    PriceSeries::normalized(daily.ticker(), Frequency::Weekly, out)
}

fn week_label(week: NaiveDate) -> Timestamp {
    week.and_time(chrono::NaiveTime::MIN)
}
