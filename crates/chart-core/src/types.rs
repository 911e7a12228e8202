// File: crates/chart-core/src/types.rs
// Summary: Shared constants (default windows, oscillator thresholds, pane layout).

/// Default SMA window (the "50 DMA").
pub const DEFAULT_SMA_WINDOW: usize = 50;
/// Default window of the weekly rolling mean, in weekly bars.
pub const DEFAULT_WEEKLY_WINDOW: usize = 200;
/// Default Bollinger window.
pub const DEFAULT_BAND_WINDOW: usize = 20;
/// Default Bollinger width multiplier.
pub const DEFAULT_BAND_MULTIPLIER: f64 = 2.0;
/// Default RSI window.
pub const DEFAULT_RSI_WINDOW: usize = 14;

/// Conventional RSI overbought threshold.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Conventional RSI oversold threshold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// Fixed value range of the oscillator pane.
pub const OSCILLATOR_RANGE: (f64, f64) = (0.0, 100.0);

/// Height share of the price pane when an oscillator pane exists.
pub const PRICE_PANE_SHARE: f64 = 0.7;
/// Accepted price pane share when an oscillator pane exists.
pub const PRICE_SHARE_RANGE: (f64, f64) = (0.55, 0.95);

/// Fractional margin added above and below autoscaled value ranges.
pub const Y_MARGIN: f64 = 0.02;
