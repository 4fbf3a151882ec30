//! Chart geometry for the `SolarOps` dashboard
//!
//! Everything here is pure: a layout function turns labelled values into
//! coordinates and path strings, and [`svg`] turns a layout into markup. No
//! state is kept between renders.

#![forbid(unsafe_code)]

pub mod bars;
pub mod line;
pub mod pie;
pub mod svg;

/// A point in SVG user space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Render a coordinate with at most two decimals and no trailing zeros
#[must_use]
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract().abs() < f64::EPSILON {
        return format!("{}", rounded as i64);
    }
    format!("{rounded:.2}").trim_end_matches('0').to_string()
}

pub use line::{LineDatum, LineLayout};
pub use pie::{PieDatum, PieLayout, PieSlice};

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(140.0, "140")]
    #[case(40.000_000_000_000_01, "40")]
    #[case(12.5, "12.5")]
    #[case(1.234_567, "1.23")]
    #[case(-0.004, "0")]
    #[case(-3.75, "-3.75")]
    #[case(f64::INFINITY, "0")]
    fn test_fmt_num(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(fmt_num(value), expected);
    }
}
