// File: crates/chart-core/src/state.rs
// Summary: Caller-owned application state (watchlist, selection, period, indicators) and its transitions.

use crate::indicator::IndicatorSpec;
use crate::provider::Period;

/// Split a comma-separated watchlist: trimmed, upper-cased, empty and repeated entries dropped.
pub fn parse_watchlist(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in input.split(',').map(|t| t.trim().to_uppercase()) {
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Everything an interaction needs to know about the session. Handlers take it by value
/// and return the successor state; nothing is kept anywhere else.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub watchlist: Vec<String>,
    pub selected: Option<String>,
    pub period: Period,
    pub indicators: Vec<IndicatorSpec>,
}

impl AppState {
    /// Selection defaults to the first watchlist entry.
    pub fn new(watchlist: &str, period: Period, indicators: Vec<IndicatorSpec>) -> Self {
        let watchlist = parse_watchlist(watchlist);
        let selected = watchlist.first().cloned();
        Self { watchlist, selected, period, indicators }
    }

    /// Replace the watchlist. The selection survives if it is still listed.
    pub fn with_watchlist(mut self, input: &str) -> Self {
        self.watchlist = parse_watchlist(input);
        let keep = self.selected.as_ref().is_some_and(|s| self.watchlist.contains(s));
        if !keep {
            self.selected = self.watchlist.first().cloned();
        }
        self
    }

    /// Select any ticker (typed or searched), not only watchlist entries.
    pub fn select(mut self, ticker: &str) -> Self {
        let t = ticker.trim().to_uppercase();
        self.selected = if t.is_empty() { None } else { Some(t) };
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Add the spec, or remove it if an equal one is already selected.
    pub fn toggle_indicator(mut self, spec: IndicatorSpec) -> Self {
        if let Some(pos) = self.indicators.iter().position(|s| *s == spec) {
            self.indicators.remove(pos);
        } else {
            self.indicators.push(spec);
        }
        self
    }
}
