//! Pie chart layout
//!
//! Slices are laid clockwise from 12 o'clock in input order. Each slice is an
//! SVG path `M c L start A r r 0 large 1 end Z`.

use crate::{Point, fmt_num};

/// Width and height of the pie canvas
pub const SIZE: f64 = 280.0;
/// Centre of the pie on both axes
pub const CENTER: f64 = SIZE / 2.0;
/// Outer radius
pub const RADIUS: f64 = 100.0;
/// Where slice labels sit, as a fraction of the radius
pub const LABEL_RADIUS_RATIO: f64 = 0.65;
/// Angle of the first slice's leading edge, in degrees
pub const START_ANGLE: f64 = -90.0;

/// Label of the placeholder slice
pub const NO_DATA_LABEL: &str = "No Data";
/// Colour of the placeholder slice
pub const NO_DATA_COLOR: &str = "#374151";
/// Colour for project types without an assigned colour
pub const DEFAULT_COLOR: &str = "#9CA3AF";

/// Fill colour for a project type
#[must_use]
pub fn project_color(project_type: &str) -> &'static str {
    match project_type {
        "Residential" => "#3B82F6",
        "Commercial" => "#8B5CF6",
        "Industrial" => "#F59E0B",
        "Ground Mounted" => "#10B981",
        _ => DEFAULT_COLOR,
    }
}

/// One labelled value to plot
#[derive(Debug, Clone, PartialEq)]
pub struct PieDatum {
    /// Legend label
    pub label: String,
    /// Magnitude
    pub value: f64,
    /// Fill colour
    pub color: String,
}

impl PieDatum {
    /// Create a datum with an explicit colour
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }

    /// Create a datum coloured by project type
    #[must_use]
    pub fn project(project_type: impl Into<String>, count: f64) -> Self {
        let label = project_type.into();
        let color = project_color(&label);
        Self::new(label, count, color)
    }

    fn no_data() -> Self {
        Self::new(NO_DATA_LABEL, 1.0, NO_DATA_COLOR)
    }
}

/// A laid out slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Legend label
    pub label: String,
    /// Magnitude
    pub value: f64,
    /// Fill colour
    pub color: String,
    /// Share of the total, 0..=100
    pub percentage: f64,
    /// Leading edge, degrees
    pub start_angle: f64,
    /// Trailing edge, degrees
    pub end_angle: f64,
    /// Whether the arc spans more than half the circle
    pub large_arc: bool,
    /// SVG path data
    pub path: String,
    /// Label anchor on the slice's mid-angle
    pub label_at: Point,
}

impl PieSlice {
    /// Angle covered by the slice, degrees
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Percentage with one decimal, e.g. `33.3`
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }

    /// A lone slice covers the whole circle; its arc path collapses to nothing
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        self.sweep() >= 360.0 - 1e-9
    }
}

/// A laid out pie
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    /// Slices in input order
    pub slices: Vec<PieSlice>,
    /// Sum of the input values; zero for the placeholder
    pub total: f64,
    /// Whether the placeholder slice was substituted
    pub no_data: bool,
}

/// Point on the circle around the pie centre
#[must_use]
pub fn polar(radius: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(
        radius.mul_add(rad.cos(), CENTER),
        radius.mul_add(rad.sin(), CENTER),
    )
}

/// Lay out a pie
///
/// Negative and NaN values count as zero. Empty input, or input whose values
/// do not sum to something positive, is replaced with a single grey
/// "No Data" slice.
#[must_use]
pub fn layout(data: &[PieDatum]) -> PieLayout {
    let data: Vec<PieDatum> = data
        .iter()
        .map(|d| PieDatum {
            value: d.value.max(0.0),
            ..d.clone()
        })
        .collect();
    let total: f64 = data.iter().map(|d| d.value).sum();
    let (data, total, no_data) = if data.is_empty() || total <= 0.0 {
        (vec![PieDatum::no_data()], 1.0, true)
    } else {
        (data, total, false)
    };

    let mut current = START_ANGLE;
    let slices = data
        .into_iter()
        .map(|datum| {
            let percentage = datum.value / total * 100.0;
            let sweep = datum.value / total * 360.0;
            let start_angle = current;
            let end_angle = current + sweep;
            current = end_angle;

            let start = polar(RADIUS, start_angle);
            let end = polar(RADIUS, end_angle);
            let large_arc = sweep > 180.0;
            let path = format!(
                "M {c} {c} L {x1} {y1} A {r} {r} 0 {large} 1 {x2} {y2} Z",
                c = fmt_num(CENTER),
                x1 = fmt_num(start.x),
                y1 = fmt_num(start.y),
                r = fmt_num(RADIUS),
                large = u8::from(large_arc),
                x2 = fmt_num(end.x),
                y2 = fmt_num(end.y),
            );

            PieSlice {
                label: datum.label,
                value: datum.value,
                color: datum.color,
                percentage,
                start_angle,
                end_angle,
                large_arc,
                path,
                label_at: polar(RADIUS * LABEL_RADIUS_RATIO, start_angle + sweep / 2.0),
            }
        })
        .collect();

    PieLayout {
        slices,
        total: if no_data { 0.0 } else { total },
        no_data,
    }
}
