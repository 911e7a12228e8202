// File: crates/chart-core/src/theme.rs
// Summary: Dark/Light colour themes used as style hints on chart traces.

use std::fmt;

use serde::{Serialize, Serializer};

/// Renderer-agnostic ARGB colour; serialises as a CSS colour string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Same hue with a different alpha (used for band fills).
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a as f64 / 255.0)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub price_line: Color,
    pub sma_line: Color,
    pub weekly_line: Color,
    pub band_line: Color,
    pub band_fill: Color,
    pub rsi_line: Color,
    pub overbought: Color,
    pub oversold: Color,
}

impl Theme {
    /// Dark template: green price, white dashed moving average.
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(17, 17, 17),
            price_line: Color::rgb(0x00, 0xff, 0x00),
            sma_line: Color::rgb(0xff, 0xff, 0xff),
            weekly_line: Color::rgb(255, 165, 0),
            band_line: Color::rgb(64, 160, 255),
            band_fill: Color::from_argb(48, 64, 160, 255),
            rsi_line: Color::rgb(186, 104, 200),
            overbought: Color::rgb(220, 80, 80),
            oversold: Color::rgb(40, 200, 120),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(250, 250, 252),
            price_line: Color::rgb(20, 140, 60),
            sma_line: Color::rgb(40, 40, 50),
            weekly_line: Color::rgb(210, 120, 0),
            band_line: Color::rgb(32, 120, 200),
            band_fill: Color::from_argb(40, 32, 120, 200),
            rsi_line: Color::rgb(120, 60, 160),
            overbought: Color::rgb(200, 60, 60),
            oversold: Color::rgb(20, 160, 90),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name` (case-insensitive).
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}
