// File: crates/chart-core/src/dashboard.rs
// Summary: One full interaction pass: fetch, compute indicators, assemble the chart, summarise the trend.

use serde::Serialize;
use tracing::{debug, info};

use crate::chart::{assemble, ChartOptions, ChartSpec};
use crate::engine::{compute, compute_all, max_window, ComputedIndicator};
use crate::error::DashboardError;
use crate::indicator::{IndicatorOutput, IndicatorSpec};
use crate::provider::{HistoryProvider, HistoryRequest, Period};
use crate::resample::{Resampler, WeeklySource};
use crate::series::{Frequency, PriceSeries};
use crate::state::AppState;
use crate::types::DEFAULT_SMA_WINDOW;
use crate::watchlist::{load_watchlist, Quote, WatchlistRow};

/// Position of the last close against its moving average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceSummary {
    pub ticker: String,
    pub quote: Quote,
    /// Name and latest value of the moving average the trend is judged against.
    pub reference: Option<(String, f64)>,
    /// `None` while the moving average is undefined.
    pub trend: Option<Trend>,
}

impl PriceSummary {
    /// Bullish when the last close is strictly above the reference average.
    pub fn from_parts(series: &PriceSeries, quote: Quote, reference: Option<(String, f64)>) -> Self {
        let trend = reference.as_ref().map(|(_, avg)| if quote.price > *avg { Trend::Bullish } else { Trend::Bearish });
        Self { ticker: series.ticker().to_string(), quote, reference, trend }
    }
}

#[derive(Clone, Debug)]
pub struct Dashboard {
    pub chart: ChartSpec,
    pub indicators: Vec<ComputedIndicator>,
    pub summary: PriceSummary,
}

/// Inputs of a single chart build.
pub struct ChartRequest<'a> {
    pub ticker: &'a str,
    pub period: Period,
    pub specs: &'a [IndicatorSpec],
    pub weekly_source: WeeklySource,
    pub options: &'a ChartOptions,
}

/// Fetch the daily series, compute every spec and assemble the chart.
/// An empty series short-circuits to `NoData` before any computation.
pub fn build_dashboard<P: HistoryProvider + ?Sized>(provider: &P, request: &ChartRequest<'_>) -> Result<Dashboard, DashboardError> {
    let ticker = request.ticker.trim().to_uppercase();
    let daily = provider.history(&HistoryRequest::new(ticker.as_str(), request.period, Frequency::Daily))?;
    let Some(quote) = Quote::from_series(&daily) else {
        info!(ticker = %ticker, period = %request.period, "no data to chart");
        return Err(DashboardError::NoData { ticker });
    };

    let weekly = match max_window(request.specs, Frequency::Weekly) {
        Some(window) => Some(Resampler::new(provider, request.weekly_source).series_for(&daily, Frequency::Weekly, window)?),
        None => None,
    };

    let indicators = compute_all(request.specs, &daily, weekly.as_ref());
    let chart = assemble(&daily, &indicators, request.options)?;
    let reference = trend_reference(&daily, &indicators);
    let summary = PriceSummary::from_parts(&daily, quote, reference);
    debug!(ticker = %ticker, bars = daily.len(), indicators = indicators.len(), trend = ?summary.trend, "dashboard built");
    Ok(Dashboard { chart, indicators, summary })
}

/// First requested daily SMA, else a default-window SMA computed just for the summary.
fn trend_reference(daily: &PriceSeries, indicators: &[ComputedIndicator]) -> Option<(String, f64)> {
    let requested = indicators.iter().find_map(|c| match (&c.spec, &c.output) {
        (IndicatorSpec::Sma(_), IndicatorOutput::Line(s)) => Some(s.clone()),
        _ => None,
    });
    let series = match requested {
        Some(s) => s,
        None => {
            let spec = IndicatorSpec::sma(DEFAULT_SMA_WINDOW as i64).ok()?;
            match compute(&spec, daily) {
                IndicatorOutput::Line(s) => s,
                _ => return None,
            }
        }
    };
    let value = series.last_value()?;
    Some((series.name, value))
}

/// A user action that triggers a recomputation pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    SetWatchlist(String),
    Select(String),
    SetPeriod(Period),
    ToggleIndicator(IndicatorSpec),
    Refresh,
}

/// Settings that do not change between interactions.
pub struct DashboardSettings {
    pub weekly_source: WeeklySource,
    pub options: ChartOptions,
}

/// Everything the caller renders after an interaction.
#[derive(Debug)]
pub struct DashboardView {
    pub watchlist: Vec<WatchlistRow>,
    /// `None` when no ticker is selected.
    pub chart: Option<Result<Dashboard, DashboardError>>,
}

/// Apply `interaction` to `state`, then run a full pass. Returns the successor state
/// and the view to render; the caller keeps both.
pub fn handle_interaction<P: HistoryProvider + ?Sized>(
    provider: &P,
    state: AppState,
    interaction: Interaction,
    settings: &DashboardSettings,
) -> (AppState, DashboardView) {
    let state = match interaction {
        Interaction::SetWatchlist(input) => state.with_watchlist(&input),
        Interaction::Select(ticker) => state.select(&ticker),
        Interaction::SetPeriod(period) => state.with_period(period),
        Interaction::ToggleIndicator(spec) => state.toggle_indicator(spec),
        Interaction::Refresh => state,
    };

    let watchlist = load_watchlist(provider, &state.watchlist);
    let chart = state.selected.as_deref().map(|ticker| {
        let request = ChartRequest {
            ticker,
            period: state.period,
            specs: &state.indicators,
            weekly_source: settings.weekly_source,
            options: &settings.options,
        };
        build_dashboard(provider, &request)
    });
    (state, DashboardView { watchlist, chart })
}
