// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the indicator engine, resampler and chart assembly API.

pub mod axis;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod provider;
pub mod resample;
pub mod series;
pub mod state;
pub mod theme;
pub mod types;
pub mod view;
pub mod watchlist;

pub use axis::{Axis, TimeAxis};
pub use chart::{assemble, ChartOptions, ChartSpec, LineDash, Pane, PaneKind, ReferenceLine, Trace, TraceRole, TraceStyle};
pub use config::{DashboardConfig, IndicatorRequest};
pub use dashboard::{build_dashboard, handle_interaction, ChartRequest, Dashboard, DashboardSettings, DashboardView, Interaction, PriceSummary, Trend};
pub use engine::{compute, compute_all, ComputedIndicator};
pub use error::{ConfigError, DashboardError, ProviderError, SeriesError};
pub use indicator::{Indicator, IndicatorKind, IndicatorOutput, IndicatorSpec, Placement};
pub use provider::{HistoryProvider, HistoryRequest, InMemoryProvider, Period};
pub use resample::{weekly_bars, Resampler, WeeklySource};
pub use series::{DerivedSeries, Frequency, PricePoint, PriceSeries, Timestamp};
pub use state::{parse_watchlist, AppState};
pub use theme::{Color, Theme};
pub use view::ViewState;
pub use watchlist::{load_watchlist, Quote, RowStatus, WatchlistRow};
