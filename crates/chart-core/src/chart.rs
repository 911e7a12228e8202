// File: crates/chart-core/src/chart.rs
// Summary: Chart assembler; lays price and derived series out into a renderer-agnostic ChartSpec.

use serde::Serialize;
use tracing::{debug, warn};

use crate::axis::{Axis, TimeAxis};
use crate::engine::ComputedIndicator;
use crate::error::DashboardError;
use crate::indicator::{IndicatorOutput, IndicatorSpec};
use crate::series::{DerivedSeries, Frequency, PriceSeries, Timestamp};
use crate::theme::{Color, Theme};
use crate::types::{OSCILLATOR_RANGE, PRICE_PANE_SHARE, PRICE_SHARE_RANGE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceRole {
    Price,
    Overlay,
    BandUpper,
    BandMiddle,
    BandLower,
    Oscillator,
}

/// Style hints for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceStyle {
    pub color: Color,
    pub dash: LineDash,
    pub width: f32,
    /// Name of the trace whose region against this one is shaded.
    pub fill_to: Option<String>,
    pub fill_color: Option<Color>,
}

impl TraceStyle {
    pub fn line(color: Color, dash: LineDash, width: f32) -> Self {
        Self { color, dash, width, fill_to: None, fill_color: None }
    }

    pub fn filled_to(mut self, partner: impl Into<String>, fill: Color) -> Self {
        self.fill_to = Some(partner.into());
        self.fill_color = Some(fill);
        self
    }
}

/// One plotted line. `x` and `y` have equal length; `None` in `y` is a gap.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub role: TraceRole,
    pub frequency: Frequency,
    pub x: Vec<Timestamp>,
    pub y: Vec<Option<f64>>,
    pub style: TraceStyle,
}

impl Trace {
    fn from_derived(series: &DerivedSeries, role: TraceRole, style: TraceStyle) -> Self {
        let (x, y): (Vec<_>, Vec<_>) = series.points.iter().copied().unzip();
        Self { name: series.name.clone(), role, frequency: series.frequency, x, y, style }
    }

    pub fn len(&self) -> usize { self.x.len() }
    pub fn is_empty(&self) -> bool { self.x.is_empty() }
}

/// Fixed horizontal guide spanning the whole time axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
    pub style: TraceStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneKind {
    Price,
    Oscillator,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Pane {
    pub kind: PaneKind,
    /// Fraction of the total chart height; shares of all panes sum to 1.
    pub height_share: f64,
    pub y_axis: Axis,
    pub traces: Vec<Trace>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Assembled chart description. Pane 0 is the price pane; an oscillator pane, when
/// present, is pane 1 and shares `x_axis` with it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub background: Color,
    pub x_axis: TimeAxis,
    pub panes: Vec<Pane>,
}

impl ChartSpec {
    pub fn pane_count(&self) -> usize { self.panes.len() }

    pub fn price_pane(&self) -> &Pane { &self.panes[0] }

    pub fn oscillator_pane(&self) -> Option<&Pane> {
        self.panes.iter().find(|p| p.kind == PaneKind::Oscillator)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Debug)]
pub struct ChartOptions {
    pub theme: Theme,
    /// Price pane height share when an oscillator pane exists.
    pub price_share: f64,
    /// Also draw the band centre line.
    pub band_midline: bool,
    pub title: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { theme: Theme::dark(), price_share: PRICE_PANE_SHARE, band_midline: false, title: None }
    }
}

/// Lay out `price` plus the computed indicators.
///
/// - The close line always goes first in the price pane.
/// - Overlays keep their own timestamps (weekly overlays are sparser than the price line).
/// - Any oscillator spec creates the second pane, even when its series has no values yet.
/// - Series without a single defined value are left out.
pub fn assemble(price: &PriceSeries, indicators: &[ComputedIndicator], opts: &ChartOptions) -> Result<ChartSpec, DashboardError> {
    let (Some(first), Some(last)) = (price.first(), price.last()) else {
        return Err(DashboardError::NoData { ticker: price.ticker().to_string() });
    };
    let theme = &opts.theme;
    let x_axis = TimeAxis::new("Date", first.timestamp, last.timestamp);

    let mut price_traces = vec![Trace {
        name: "Price".to_string(),
        role: TraceRole::Price,
        frequency: price.frequency(),
        x: price.timestamps(),
        y: price.points().iter().map(|p| Some(p.close)).collect(),
        style: TraceStyle::line(theme.price_line, LineDash::Solid, 2.0),
    }];
    let mut osc_traces: Vec<Trace> = Vec::new();
    let mut reference_lines: Vec<ReferenceLine> = Vec::new();
    let mut wants_oscillator = false;

    for computed in indicators {
        let id = computed.spec.as_indicator().id();
        match &computed.output {
            IndicatorOutput::Line(series) => {
                if !series.has_values() {
                    warn!(indicator = id, series = %series.name, points = series.len(), "omitting overlay with no defined values");
                    continue;
                }
                let (color, dash) = match computed.spec {
                    IndicatorSpec::WeeklyRollingMean(_) => (theme.weekly_line, LineDash::Dotted),
                    _ => (theme.sma_line, LineDash::Dashed),
                };
                price_traces.push(Trace::from_derived(series, TraceRole::Overlay, TraceStyle::line(color, dash, 1.5)));
            }
            IndicatorOutput::Band { upper, middle, lower } => {
                if !upper.has_values() || !lower.has_values() {
                    warn!(indicator = id, points = upper.len(), "omitting band with no defined values");
                    continue;
                }
                price_traces.push(Trace::from_derived(
                    upper,
                    TraceRole::BandUpper,
                    TraceStyle::line(theme.band_line, LineDash::Solid, 1.0),
                ));
                price_traces.push(Trace::from_derived(
                    lower,
                    TraceRole::BandLower,
                    TraceStyle::line(theme.band_line, LineDash::Solid, 1.0).filled_to(upper.name.clone(), theme.band_fill),
                ));
                if opts.band_midline {
                    price_traces.push(Trace::from_derived(
                        middle,
                        TraceRole::BandMiddle,
                        TraceStyle::line(theme.band_line, LineDash::Dotted, 1.0),
                    ));
                }
            }
            IndicatorOutput::Oscillator { values, upper_bound, lower_bound } => {
                wants_oscillator = true;
                for (y, label, color) in [(*upper_bound, "Overbought", theme.overbought), (*lower_bound, "Oversold", theme.oversold)] {
                    if !reference_lines.iter().any(|r| r.y == y) {
                        reference_lines.push(ReferenceLine { label: label.to_string(), y, style: TraceStyle::line(color, LineDash::Dashed, 1.0) });
                    }
                }
                if !values.has_values() {
                    warn!(indicator = id, series = %values.name, points = values.len(), "oscillator has no defined values yet");
                    continue;
                }
                osc_traces.push(Trace::from_derived(values, TraceRole::Oscillator, TraceStyle::line(theme.rsi_line, LineDash::Solid, 1.5)));
            }
        }
    }

    let y_values = price_traces
        .iter()
        .flat_map(|t| t.x.iter().zip(&t.y))
        .filter(|(x, _)| x_axis.contains(**x))
        .filter_map(|(_, y)| *y);
    let price_axis = Axis::autoscale("Price", y_values);

    let price_share = if wants_oscillator { opts.price_share.clamp(PRICE_SHARE_RANGE.0, PRICE_SHARE_RANGE.1) } else { 1.0 };
    let mut panes = vec![Pane {
        kind: PaneKind::Price,
        height_share: price_share,
        y_axis: price_axis,
        traces: price_traces,
        reference_lines: Vec::new(),
    }];
    if wants_oscillator {
        panes.push(Pane {
            kind: PaneKind::Oscillator,
            height_share: 1.0 - price_share,
            y_axis: Axis::fixed("RSI", OSCILLATOR_RANGE.0, OSCILLATOR_RANGE.1),
            traces: osc_traces,
            reference_lines,
        });
    }

    let title = opts.title.clone().unwrap_or_else(|| format!("{} Performance", price.ticker()));
    debug!(ticker = price.ticker(), panes = panes.len(), traces = panes.iter().map(|p| p.traces.len()).sum::<usize>(), "assembled chart");
    Ok(ChartSpec { title, background: theme.background, x_axis, panes })
}
