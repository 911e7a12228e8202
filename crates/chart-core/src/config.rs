// File: crates/chart-core/src/config.rs
// Summary: JSON dashboard configuration and its validation into indicator specs and chart options.

use serde::{Deserialize, Serialize};

use crate::chart::ChartOptions;
use crate::error::ConfigError;
use crate::indicator::{IndicatorKind, IndicatorSpec};
use crate::provider::Period;
use crate::resample::WeeklySource;
use crate::state::AppState;
use crate::theme;
use crate::types::{
    DEFAULT_BAND_MULTIPLIER, DEFAULT_BAND_WINDOW, DEFAULT_RSI_WINDOW, DEFAULT_SMA_WINDOW, DEFAULT_WEEKLY_WINDOW,
    PRICE_PANE_SHARE, PRICE_SHARE_RANGE,
};

/// Raw indicator selection as it arrives from the caller. Unvalidated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub kind: IndicatorKind,
    #[serde(default)]
    pub window: Option<i64>,
    #[serde(default)]
    pub multiplier: Option<f64>,
}

impl IndicatorRequest {
    pub fn new(kind: IndicatorKind) -> Self {
        Self { kind, window: None, multiplier: None }
    }

    pub fn window(mut self, window: i64) -> Self {
        self.window = Some(window);
        self
    }

    /// Validate into a spec, filling in the conventional default window.
    pub fn validate(&self) -> Result<IndicatorSpec, ConfigError> {
        let window = self.window.unwrap_or_else(|| default_window(self.kind) as i64);
        let multiplier = match self.kind {
            IndicatorKind::BollingerBands => Some(self.multiplier.unwrap_or(DEFAULT_BAND_MULTIPLIER)),
            _ => None,
        };
        IndicatorSpec::from_parts(self.kind, window, multiplier)
    }
}

pub fn default_window(kind: IndicatorKind) -> usize {
    match kind {
        IndicatorKind::Sma => DEFAULT_SMA_WINDOW,
        IndicatorKind::WeeklyRollingMean => DEFAULT_WEEKLY_WINDOW,
        IndicatorKind::BollingerBands => DEFAULT_BAND_WINDOW,
        IndicatorKind::Rsi => DEFAULT_RSI_WINDOW,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Comma-separated tickers.
    pub watchlist: String,
    pub period: Period,
    pub theme: String,
    pub weekly_source: WeeklySource,
    pub band_midline: bool,
    pub price_share: f64,
    pub indicators: Vec<IndicatorRequest>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            watchlist: "AAPL, TSLA, BTC-USD, GOOGL".to_string(),
            period: Period::Year1,
            theme: "dark".to_string(),
            weekly_source: WeeklySource::Refetch,
            band_midline: false,
            price_share: PRICE_PANE_SHARE,
            indicators: vec![IndicatorRequest::new(IndicatorKind::Sma)],
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Every requested indicator, validated. The first invalid one aborts.
    pub fn indicator_specs(&self) -> Result<Vec<IndicatorSpec>, ConfigError> {
        self.indicators.iter().map(IndicatorRequest::validate).collect()
    }

    /// Chart options for this configuration. Unknown theme names and a price share
    /// outside `PRICE_SHARE_RANGE` are rejected.
    pub fn chart_options(&self) -> Result<ChartOptions, ConfigError> {
        let theme = theme::find(&self.theme).ok_or_else(|| ConfigError::UnknownTheme(self.theme.clone()))?;
        let (min, max) = PRICE_SHARE_RANGE;
        if !(min..=max).contains(&self.price_share) {
            return Err(ConfigError::InvalidPriceShare(self.price_share));
        }
        Ok(ChartOptions { theme, price_share: self.price_share, band_midline: self.band_midline, title: None })
    }

    pub fn initial_state(&self) -> Result<AppState, ConfigError> {
        Ok(AppState::new(&self.watchlist, self.period, self.indicator_specs()?))
    }
}
