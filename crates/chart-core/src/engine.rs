// File: crates/chart-core/src/engine.rs
// Summary: Indicator engine; evaluates a list of validated specs against daily and weekly series.

use tracing::{debug, warn};

use crate::indicator::{IndicatorOutput, IndicatorSpec, Placement};
use crate::series::{Frequency, PriceSeries};

/// One spec together with what it produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedIndicator {
    pub spec: IndicatorSpec,
    pub output: IndicatorOutput,
}

impl ComputedIndicator {
    pub fn placement(&self) -> Placement {
        self.spec.as_indicator().placement()
    }
}

/// Compute one spec on `input`. Never fails: short or empty input yields undefined or empty output.
pub fn compute(spec: &IndicatorSpec, input: &PriceSeries) -> IndicatorOutput {
    let indicator = spec.as_indicator();
    let output = indicator.compute(input);
    debug!(
        indicator = indicator.id(),
        window = spec.window(),
        input_len = input.len(),
        defined = !output.is_undefined(),
        "computed indicator"
    );
    output
}

/// Compute every spec, routing weekly-based specs to `weekly`.
/// A weekly spec with no weekly series is computed on an empty series.
pub fn compute_all(specs: &[IndicatorSpec], daily: &PriceSeries, weekly: Option<&PriceSeries>) -> Vec<ComputedIndicator> {
    let empty_weekly;
    let weekly = match weekly {
        Some(w) => w,
        None => {
            empty_weekly = PriceSeries::empty(daily.ticker(), Frequency::Weekly);
            &empty_weekly
        }
    };

    specs
        .iter()
        .map(|spec| {
            let input = match spec.as_indicator().base_frequency() {
                Frequency::Daily => daily,
                Frequency::Weekly => {
                    if weekly.is_empty() && !daily.is_empty() {
                        warn!(ticker = daily.ticker(), indicator = spec.as_indicator().id(), "no weekly bars available");
                    }
                    weekly
                }
            };
            ComputedIndicator { spec: *spec, output: compute(spec, input) }
        })
        .collect()
}

/// Largest window among specs based on `frequency`, if any.
pub fn max_window(specs: &[IndicatorSpec], frequency: Frequency) -> Option<usize> {
    specs
        .iter()
        .filter(|s| s.as_indicator().base_frequency() == frequency)
        .map(IndicatorSpec::window)
        .max()
}
