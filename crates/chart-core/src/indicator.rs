// File: crates/chart-core/src/indicator.rs
// Summary: Indicator trait, validated indicator specs and the rolling-window math behind them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::series::{DerivedSeries, Frequency, PriceSeries};
use crate::types::{RSI_OVERBOUGHT, RSI_OVERSOLD};

/// Supported indicator families, as accepted from configuration input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(alias = "sma", alias = "SMA")]
    Sma,
    #[serde(alias = "weekly_rolling_mean", alias = "wma", alias = "weekly")]
    WeeklyRollingMean,
    #[serde(alias = "bollinger", alias = "bollinger_bands", alias = "bb")]
    BollingerBands,
    #[serde(alias = "rsi", alias = "RSI")]
    Rsi,
}

impl IndicatorKind {
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::WeeklyRollingMean => "WeeklyRollingMean",
            IndicatorKind::BollingerBands => "BollingerBands",
            IndicatorKind::Rsi => "RSI",
        }
    }
}

/// Where an indicator is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Same pane and value scale as the price line.
    Overlay,
    /// Separate pane below the price pane.
    Oscillator,
}

/// Result of one indicator computation.
#[derive(Clone, Debug, PartialEq)]
pub enum IndicatorOutput {
    Line(DerivedSeries),
    Band { upper: DerivedSeries, middle: DerivedSeries, lower: DerivedSeries },
    Oscillator { values: DerivedSeries, upper_bound: f64, lower_bound: f64 },
}

impl IndicatorOutput {
    pub fn series(&self) -> Vec<&DerivedSeries> {
        match self {
            IndicatorOutput::Line(s) => vec![s],
            IndicatorOutput::Band { upper, middle, lower } => vec![upper, middle, lower],
            IndicatorOutput::Oscillator { values, .. } => vec![values],
        }
    }

    /// True when no constituent series has a defined value.
    pub fn is_undefined(&self) -> bool {
        self.series().iter().all(|s| !s.has_values())
    }
}

/// A derived-series calculator over a price series. Implementations are pure.
pub trait Indicator {
    fn id(&self) -> &'static str;
    fn name(&self) -> String;
    fn placement(&self) -> Placement { Placement::Overlay }
    /// Sampling frequency the input series is expected at.
    fn base_frequency(&self) -> Frequency { Frequency::Daily }
    fn compute(&self, input: &PriceSeries) -> IndicatorOutput;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sma {
    window: usize,
}

impl Sma {
    pub fn window(&self) -> usize { self.window }
}

impl Indicator for Sma {
    fn id(&self) -> &'static str { "sma" }
    fn name(&self) -> String { format!("{} DMA", self.window) }

    fn compute(&self, input: &PriceSeries) -> IndicatorOutput {
        let values = rolling_mean(&input.closes(), self.window);
        IndicatorOutput::Line(input.derive(self.name(), values))
    }
}

/// Rolling mean of weekly closes. Shown to users as a "weighted" weekly average,
/// but the arithmetic is an unweighted mean.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeeklyRollingMean {
    window: usize,
}

impl WeeklyRollingMean {
    pub fn window(&self) -> usize { self.window }
}

impl Indicator for WeeklyRollingMean {
    fn id(&self) -> &'static str { "weekly_mean" }
    fn name(&self) -> String { format!("{} WMA", self.window) }
    fn base_frequency(&self) -> Frequency { Frequency::Weekly }

    fn compute(&self, input: &PriceSeries) -> IndicatorOutput {
        let values = rolling_mean(&input.closes(), self.window);
        IndicatorOutput::Line(input.derive(self.name(), values))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BollingerBands {
    window: usize,
    multiplier: f64,
}

impl BollingerBands {
    pub fn window(&self) -> usize { self.window }
    pub fn multiplier(&self) -> f64 { self.multiplier }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &'static str { "bollinger" }
    fn name(&self) -> String { format!("BB({}, {})", self.window, self.multiplier) }

    fn compute(&self, input: &PriceSeries) -> IndicatorOutput {
        let closes = input.closes();
        let center = rolling_mean(&closes, self.window);
        let sigma = rolling_std(&closes, self.window);
        let k = self.multiplier;
        let upper = center.iter().zip(&sigma).map(|(c, s)| Some(c.as_ref()? + k * s.as_ref()?)).collect();
        let lower = center.iter().zip(&sigma).map(|(c, s)| Some(c.as_ref()? - k * s.as_ref()?)).collect();
        let name = self.name();
        IndicatorOutput::Band {
            upper: input.derive(format!("{name} Upper"), upper),
            middle: input.derive(format!("{name} Middle"), center),
            lower: input.derive(format!("{name} Lower"), lower),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rsi {
    window: usize,
}

impl Rsi {
    pub fn window(&self) -> usize { self.window }
}

impl Indicator for Rsi {
    fn id(&self) -> &'static str { "rsi" }
    fn name(&self) -> String { format!("RSI {}", self.window) }
    fn placement(&self) -> Placement { Placement::Oscillator }

    fn compute(&self, input: &PriceSeries) -> IndicatorOutput {
        let values = rsi(&input.closes(), self.window);
        IndicatorOutput::Oscillator {
            values: input.derive(self.name(), values),
            upper_bound: RSI_OVERBOUGHT,
            lower_bound: RSI_OVERSOLD,
        }
    }
}

/// A validated indicator request. Only constructible through the checked constructors,
/// so every spec reaching the engine has a positive window and multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorSpec {
    Sma(Sma),
    WeeklyRollingMean(WeeklyRollingMean),
    BollingerBands(BollingerBands),
    Rsi(Rsi),
}

impl IndicatorSpec {
    pub fn sma(window: i64) -> Result<Self, ConfigError> {
        let window = check_window(IndicatorKind::Sma, window)?;
        Ok(Self::Sma(Sma { window }))
    }

    pub fn weekly_rolling_mean(window: i64) -> Result<Self, ConfigError> {
        let window = check_window(IndicatorKind::WeeklyRollingMean, window)?;
        Ok(Self::WeeklyRollingMean(WeeklyRollingMean { window }))
    }

    pub fn bollinger(window: i64, multiplier: f64) -> Result<Self, ConfigError> {
        let window = check_window(IndicatorKind::BollingerBands, window)?;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier { kind: IndicatorKind::BollingerBands.label(), multiplier });
        }
        Ok(Self::BollingerBands(BollingerBands { window, multiplier }))
    }

    pub fn rsi(window: i64) -> Result<Self, ConfigError> {
        let window = check_window(IndicatorKind::Rsi, window)?;
        Ok(Self::Rsi(Rsi { window }))
    }

    /// Build from a kind plus raw parameters; the multiplier is ignored by non-band kinds.
    pub fn from_parts(kind: IndicatorKind, window: i64, multiplier: Option<f64>) -> Result<Self, ConfigError> {
        match kind {
            IndicatorKind::Sma => Self::sma(window),
            IndicatorKind::WeeklyRollingMean => Self::weekly_rolling_mean(window),
            IndicatorKind::BollingerBands => {
                Self::bollinger(window, multiplier.unwrap_or(crate::types::DEFAULT_BAND_MULTIPLIER))
            }
            IndicatorKind::Rsi => Self::rsi(window),
        }
    }

    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorSpec::Sma(_) => IndicatorKind::Sma,
            IndicatorSpec::WeeklyRollingMean(_) => IndicatorKind::WeeklyRollingMean,
            IndicatorSpec::BollingerBands(_) => IndicatorKind::BollingerBands,
            IndicatorSpec::Rsi(_) => IndicatorKind::Rsi,
        }
    }

    pub fn window(&self) -> usize {
        match self {
            IndicatorSpec::Sma(i) => i.window,
            IndicatorSpec::WeeklyRollingMean(i) => i.window,
            IndicatorSpec::BollingerBands(i) => i.window,
            IndicatorSpec::Rsi(i) => i.window,
        }
    }

    pub fn as_indicator(&self) -> &dyn Indicator {
        match self {
            IndicatorSpec::Sma(i) => i,
            IndicatorSpec::WeeklyRollingMean(i) => i,
            IndicatorSpec::BollingerBands(i) => i,
            IndicatorSpec::Rsi(i) => i,
        }
    }
}

fn check_window(kind: IndicatorKind, window: i64) -> Result<usize, ConfigError> {
    if window <= 0 {
        return Err(ConfigError::InvalidWindow { kind: kind.label(), window });
    }
    usize::try_from(window).map_err(|_| ConfigError::InvalidWindow { kind: kind.label(), window })
}

// ---- rolling-window math ---------------------------------------------------

/// Mean of the last `window` values at each index; `None` until the window is full.
/// Each window is summed afresh so exact inputs give exact outputs.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 { return out; }
    for (i, w) in values.windows(window).enumerate() {
        out[i + window - 1] = Some(w.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Population standard deviation over the last `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 { return out; }
    let n = window as f64;
    for (i, w) in values.windows(window).enumerate() {
        let mean = w.iter().sum::<f64>() / n;
        let var = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        out[i + window - 1] = Some(var.sqrt());
    }
    out
}

/// Relative Strength Index with simple (not Wilder-smoothed) rolling means of gains and losses.
/// The first `window` outputs are undefined. A zero average loss saturates to 100.
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() <= window { return out; }

    // deltas[j] is the change into bar j + 1
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let n = window as f64;
    for (j, (g, l)) in gains.windows(window).zip(losses.windows(window)).enumerate() {
        let gain = g.iter().sum::<f64>() / n;
        let loss = l.iter().sum::<f64>() / n;
        out[j + window] = Some(rsi_value(gain, loss));
    }
    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
