//! Smoothed line and area chart layout
//!
//! Points are spread evenly across the padded viewport and joined with cubic
//! Béziers whose control points follow the neighbouring points, which gives a
//! Catmull-Rom style curve through every data point.

use crate::{Point, fmt_num};

/// Viewport width
pub const WIDTH: f64 = 1000.0;
/// Viewport height
pub const HEIGHT: f64 = 300.0;
/// Inset on every side of the plot area
pub const PADDING: f64 = 40.0;
/// Headroom above the largest value
pub const HEADROOM: f64 = 1.2;
/// Scale maximum when the data gives none
pub const FALLBACK_MAX: f64 = 1000.0;
/// Control point distance as a fraction of the neighbour span
pub const SMOOTHING: f64 = 0.2;
/// Number of horizontal grid lines
pub const GRID_LINES: usize = 5;

/// One labelled value
#[derive(Debug, Clone, PartialEq)]
pub struct LineDatum {
    /// X-axis label
    pub label: String,
    /// Y value
    pub value: f64,
}

impl LineDatum {
    /// Create a datum
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A datum placed in the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedPoint {
    /// X-axis label
    pub label: String,
    /// Y value
    pub value: f64,
    /// Position in the viewport
    pub at: Point,
}

/// A laid out line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    /// Points in input order
    pub points: Vec<PlottedPoint>,
    /// Value mapped to the top of the plot area
    pub max_value: f64,
    /// Stroke path
    pub line_path: String,
    /// Fill path, the stroke closed down to the baseline
    pub area_path: String,
    /// Y positions of the dashed grid lines
    pub grid: Vec<f64>,
}

/// Scale maximum: the largest value plus headroom, or the fallback
#[must_use]
pub fn scale_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values.into_iter().fold(f64::NEG_INFINITY, f64::max) * HEADROOM;
    if max.is_finite() && max > 0.0 { max } else { FALLBACK_MAX }
}

/// X position of the `index`th of `count` points
///
/// A single point sits on the left edge of the plot area.
#[must_use]
pub fn x_at(index: usize, count: usize) -> f64 {
    if count < 2 {
        return PADDING;
    }
    let step = (WIDTH - PADDING * 2.0) / (count - 1) as f64;
    (index as f64).mul_add(step, PADDING)
}

/// Y position of a value against the scale maximum
#[must_use]
pub fn y_at(value: f64, max_value: f64) -> f64 {
    HEIGHT - PADDING - value / max_value * (HEIGHT - PADDING * 2.0)
}

/// Control point for `current`, pushed along the `previous -> next` direction
///
/// `reverse` pulls it back instead, for the control point that ends a segment.
#[must_use]
pub fn control_point(current: Point, previous: Point, next: Point, reverse: bool) -> Point {
    let direction = if reverse { -1.0 } else { 1.0 };
    Point::new(
        ((next.x - previous.x) * SMOOTHING).mul_add(direction, current.x),
        ((next.y - previous.y) * SMOOTHING).mul_add(direction, current.y),
    )
}

/// Smoothed path through the points
#[must_use]
pub fn smooth_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, current) in points.iter().enumerate() {
        if i == 0 {
            path = format!("M {},{}", fmt_num(current.x), fmt_num(current.y));
            continue;
        }
        let previous = points.get(i - 1).copied().unwrap_or(*current);
        let next = points.get(i + 1).copied().unwrap_or(*current);
        let before_previous = i
            .checked_sub(2)
            .and_then(|j| points.get(j))
            .copied()
            .unwrap_or(previous);

        let start = control_point(previous, before_previous, *current, false);
        let end = control_point(*current, previous, next, true);
        path.push_str(&format!(
            " C {},{} {},{} {},{}",
            fmt_num(start.x),
            fmt_num(start.y),
            fmt_num(end.x),
            fmt_num(end.y),
            fmt_num(current.x),
            fmt_num(current.y),
        ));
    }
    path
}

/// Y positions of the grid lines, top to bottom
#[must_use]
pub fn grid_lines() -> Vec<f64> {
    let gap = (HEIGHT - PADDING * 2.0) / (GRID_LINES - 1) as f64;
    (0..GRID_LINES)
        .map(|i| (i as f64).mul_add(gap, PADDING))
        .collect()
}

/// Lay out a line chart; `None` when there is nothing to plot
#[must_use]
pub fn layout(data: &[LineDatum]) -> Option<LineLayout> {
    if data.is_empty() {
        return None;
    }

    let max_value = scale_max(data.iter().map(|d| d.value));
    let count = data.len();
    let points: Vec<PlottedPoint> = data
        .iter()
        .enumerate()
        .map(|(i, d)| PlottedPoint {
            label: d.label.clone(),
            value: d.value,
            at: Point::new(x_at(i, count), y_at(d.value, max_value)),
        })
        .collect();

    let coords: Vec<Point> = points.iter().map(|p| p.at).collect();
    let line_path = smooth_path(&coords);
    let baseline = fmt_num(HEIGHT - PADDING);
    let area_path = format!(
        "{line_path} L {},{baseline} L {},{baseline} Z",
        fmt_num(x_at(count - 1, count)),
        fmt_num(PADDING),
    );

    Some(LineLayout {
        points,
        max_value,
        line_path,
        area_path,
        grid: grid_lines(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_scale_max() {
        assert!((scale_max([10.0, 50.0, 20.0]) - 60.0).abs() < 1e-9);
        assert_eq!(scale_max([0.0, 0.0]), FALLBACK_MAX);
        assert_eq!(scale_max(std::iter::empty()), FALLBACK_MAX);
    }

    #[test]
    fn test_x_positions_span_plot_area() {
        assert_eq!(x_at(0, 5), PADDING);
        assert_eq!(x_at(4, 5), WIDTH - PADDING);
        assert_eq!(x_at(2, 5), 500.0);
        assert_eq!(x_at(0, 1), PADDING);
    }

    #[test]
    fn test_y_positions() {
        assert_eq!(y_at(0.0, 100.0), HEIGHT - PADDING);
        assert_eq!(y_at(100.0, 100.0), PADDING);
        assert_eq!(y_at(50.0, 100.0), 150.0);
    }

    #[test]
    fn test_control_point_direction() {
        let current = Point::new(100.0, 100.0);
        let previous = Point::new(0.0, 50.0);
        let next = Point::new(200.0, 150.0);

        assert_eq!(control_point(current, previous, next, false), Point::new(140.0, 120.0));
        assert_eq!(control_point(current, previous, next, true), Point::new(60.0, 80.0));
    }

    #[test]
    fn test_two_point_path() {
        let chart = layout(&[LineDatum::new("Jan", 0.0), LineDatum::new("Feb", 100.0)]).unwrap();

        // max 120, so 100 sits at 260 - 100/120*220
        assert!((chart.max_value - 120.0).abs() < 1e-9);
        assert!((chart.points[1].at.y - 76.666_666).abs() < 1e-5);
        // with no outer neighbours both control points sit a fifth of the
        // way along the segment, one from each end
        assert_eq!(
            chart.line_path,
            "M 40,260 C 224,223.33 776,113.33 960,76.67"
        );
        assert_eq!(
            chart.area_path,
            "M 40,260 C 224,223.33 776,113.33 960,76.67 L 960,260 L 40,260 Z"
        );
    }

    #[test]
    fn test_single_point_has_move_only() {
        let chart = layout(&[LineDatum::new("Jan", 10.0)]).unwrap();
        assert_eq!(chart.line_path, "M 40,76.67");
        assert_eq!(chart.area_path, "M 40,76.67 L 40,260 L 40,260 Z");
    }

    #[test]
    fn test_empty_is_none() {
        assert!(layout(&[]).is_none());
    }

    #[test]
    fn test_grid_lines() {
        assert_eq!(grid_lines(), vec![40.0, 95.0, 150.0, 205.0, 260.0]);
    }

    proptest! {
        #[test]
        fn prop_points_stay_inside_plot(values in prop::collection::vec(0.0f64..1e9, 1..24)) {
            let data: Vec<LineDatum> = values
                .iter()
                .map(|v| LineDatum::new("m", *v))
                .collect();
            let chart = layout(&data).unwrap();

            prop_assert!(y_at(chart.max_value, chart.max_value) >= PADDING - 1e-9);
            for point in &chart.points {
                prop_assert!(point.at.y >= PADDING - 1e-9);
                prop_assert!(point.at.y <= HEIGHT - PADDING + 1e-9);
                prop_assert!(point.at.x >= PADDING - 1e-9);
                prop_assert!(point.at.x <= WIDTH - PADDING + 1e-9);
            }
            prop_assert_eq!(chart.line_path.matches(" C ").count(), values.len() - 1);
        }
    }
}
