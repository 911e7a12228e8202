// File: crates/chart-core/src/view.rs
// View state shared by all panes: one visible time range, per-pane value ranges, pan/zoom/autoscale.

use chrono::Duration;

use crate::axis::{padded_range, ScaleKind};
use crate::chart::{ChartSpec, Pane};
use crate::series::Timestamp;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub x_start: Timestamp,
    pub x_end: Timestamp,
    /// Visible value range per pane, in pane order.
    pub y_ranges: Vec<(f64, f64)>,
}

impl ViewState {
    pub fn from_chart(chart: &ChartSpec) -> Self {
        Self {
            x_start: chart.x_axis.start,
            x_end: chart.x_axis.end,
            y_ranges: chart.panes.iter().map(|p| (p.y_axis.min, p.y_axis.max)).collect(),
        }
    }

    fn span_ms(&self) -> i64 {
        (self.x_end - self.x_start).num_milliseconds().max(1)
    }

    /// Shift the shared time range; every pane follows.
    pub fn pan(&mut self, by: Duration) {
        self.x_start += by;
        self.x_end += by;
    }

    /// Scale the shared time range around `anchor`, which is kept inside the visible range.
    /// `factor < 1` zooms in.
    pub fn zoom_at(&mut self, anchor: Timestamp, factor: f64) {
        let anchor = anchor.clamp(self.x_start, self.x_end);
        let factor = factor.clamp(0.1, 10.0);
        let span = self.span_ms() as f64;
        let ratio = (anchor - self.x_start).num_milliseconds() as f64 / span;
        let new_span = (span * factor).max(1_000.0);
        let start = anchor - Duration::milliseconds((ratio * new_span) as i64);
        self.x_start = start;
        self.x_end = start + Duration::milliseconds(new_span as i64);
    }

    /// Refit every auto-scaled pane to the values inside the visible time range.
    /// Fixed panes (oscillators) keep their range. Returns true if any pane changed.
    pub fn autoscale_y_visible(&mut self, chart: &ChartSpec) -> bool {
        let mut changed = false;
        for (range, pane) in self.y_ranges.iter_mut().zip(&chart.panes) {
            if pane.y_axis.kind == ScaleKind::Fixed {
                continue;
            }
            if let Some(r) = visible_y_range(pane, self.x_start, self.x_end) {
                *range = r;
                changed = true;
            }
        }
        changed
    }
}

/// Padded value range of the traces of `pane` inside `[x_start, x_end]`.
pub fn visible_y_range(pane: &Pane, x_start: Timestamp, x_end: Timestamp) -> Option<(f64, f64)> {
    let values = pane
        .traces
        .iter()
        .flat_map(|t| t.x.iter().zip(&t.y))
        .filter(|(x, _)| **x >= x_start && **x <= x_end)
        .filter_map(|(_, y)| *y);
    padded_range(values)
}
