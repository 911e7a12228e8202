// File: crates/chart-core/src/axis.rs
// Summary: Axis models; a shared time axis and per-pane value axes.

use serde::Serialize;

use crate::series::Timestamp;
use crate::types::Y_MARGIN;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Range follows the data.
    Auto,
    /// Range is pinned (e.g. 0..100 for oscillators).
    Fixed,
}

/// Value (Y) axis of one pane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Auto }
    }

    pub fn fixed(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Fixed }
    }

    /// Range over finite `values` widened by the standard margin.
    /// Falls back to 0..1 without data and widens a flat range to one unit.
    pub fn autoscale(label: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = padded_range(values).unwrap_or((0.0, 1.0));
        Self::new(label, min, max)
    }
}

pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if (hi - lo).abs() < 1e-9 {
        return Some((lo - 0.5, hi + 0.5));
    }
    let m = (hi - lo) * Y_MARGIN;
    Some((lo - m, hi + m))
}

/// Horizontal time axis shared by every pane of a chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeAxis {
    pub label: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeAxis {
    pub fn new(label: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self { label: label.into(), start, end }
    }

    pub fn contains(&self, t: Timestamp) -> bool {
        t >= self.start && t <= self.end
    }
}
