//! Inline SVG markup for laid out charts
//!
//! Each function returns a self-contained `<svg>` element. Labels are escaped
//! before they are written into text nodes or attributes.

use crate::bars::{ActivityBar, PairedBar, SUBSIDY_BAR_MAX_PX};
use crate::line::{self, LineLayout};
use crate::pie::{self, PieLayout};
use crate::{fmt_num, Point};
use v_htmlescape::escape;

const LINE_COLOR: &str = "#F59E0B";
const GRID_COLOR: &str = "#E5E7EB";
const BAR_PRIMARY: &str = "#F59E0B";
const BAR_SECONDARY: &str = "#1C1C1E";
const BAR_SLOT: f64 = 48.0;
const BAR_WIDTH: f64 = 14.0;
const BAR_PLOT_HEIGHT: f64 = 200.0;
const BAR_LABEL_SPACE: f64 = 24.0;

fn esc(text: &str) -> String {
    escape(text).to_string()
}

/// Placeholder shown where a chart has nothing to plot
#[must_use]
pub fn no_data(width: f64, height: f64) -> String {
    format!(
        r##"<svg class="chart chart-empty" viewBox="0 0 {w} {h}" role="img" aria-label="No Data"><text x="{cx}" y="{cy}" text-anchor="middle" fill="#9CA3AF" font-size="14">No Data</text></svg>"##,
        w = fmt_num(width),
        h = fmt_num(height),
        cx = fmt_num(width / 2.0),
        cy = fmt_num(height / 2.0),
    )
}

/// Pie with percentage labels and the total in a centre disc
#[must_use]
pub fn pie_chart(layout: &PieLayout) -> String {
    let size = fmt_num(pie::SIZE);
    let c = fmt_num(pie::CENTER);
    let mut out = format!(
        r#"<svg class="chart chart-pie" width="{size}" height="{size}" viewBox="0 0 {size} {size}" role="img">"#
    );

    for slice in &layout.slices {
        let color = esc(&slice.color);
        if slice.is_full_circle() {
            out.push_str(&format!(
                r##"<circle cx="{c}" cy="{c}" r="{r}" fill="{color}" stroke="#1C1C1E" stroke-width="2"/>"##,
                r = fmt_num(pie::RADIUS),
            ));
        } else {
            out.push_str(&format!(
                r##"<path d="{}" fill="{color}" stroke="#1C1C1E" stroke-width="2"/>"##,
                slice.path
            ));
        }
        if layout.no_data {
            continue;
        }
        let Point { x, y } = slice.label_at;
        out.push_str(&format!(
            r#"<g pointer-events="none"><text x="{x}" y="{y1}" text-anchor="middle" fill="white" font-size="13" font-weight="700">{pct}%</text><text x="{x}" y="{y2}" text-anchor="middle" fill="white" font-size="11" font-weight="600">({value})</text></g>"#,
            x = fmt_num(x),
            y1 = fmt_num(y - 8.0),
            y2 = fmt_num(y + 8.0),
            pct = slice.percentage_label(),
            value = fmt_num(slice.value),
        ));
    }

    out.push_str(&format!(
        r##"<circle cx="{c}" cy="{c}" r="45" fill="#1C1C1E" stroke="rgba(255,255,255,0.1)" stroke-width="2"/><text x="{c}" y="{ty}" text-anchor="middle" fill="white" font-size="32" font-weight="800">{total}</text><text x="{c}" y="{sy}" text-anchor="middle" fill="rgba(255,255,255,0.6)" font-size="11" font-weight="600">Projects</text></svg>"##,
        ty = fmt_num(pie::CENTER - 5.0),
        sy = fmt_num(pie::CENTER + 15.0),
        total = fmt_num(layout.total),
    ));
    out
}

/// Legend rows for a pie: colour swatch, label and percentage
#[must_use]
pub fn pie_legend(layout: &PieLayout) -> String {
    let mut out = String::from(r#"<ul class="chart-legend">"#);
    for slice in &layout.slices {
        out.push_str(&format!(
            r#"<li><span class="swatch" style="background:{}"></span>{} <em>{}%</em></li>"#,
            esc(&slice.color),
            esc(&slice.label),
            slice.percentage_label(),
        ));
    }
    out.push_str("</ul>");
    out
}

/// Smoothed area chart with dashed grid lines and point markers
///
/// `value_prefix` is prepended to the value in each point's tooltip.
#[must_use]
pub fn line_chart(layout: Option<&LineLayout>, value_prefix: &str) -> String {
    let Some(layout) = layout else {
        return no_data(line::WIDTH, line::HEIGHT);
    };

    let mut out = format!(
        r##"<svg class="chart chart-line" viewBox="0 0 {w} {h}" preserveAspectRatio="none" role="img"><defs><linearGradient id="area-gradient" x1="0%" y1="0%" x2="0%" y2="100%"><stop offset="0%" stop-color="#FCD34D" stop-opacity="0.5"/><stop offset="100%" stop-color="#FCD34D" stop-opacity="0"/></linearGradient></defs>"##,
        w = fmt_num(line::WIDTH),
        h = fmt_num(line::HEIGHT),
    );

    for y in &layout.grid {
        out.push_str(&format!(
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{GRID_COLOR}" stroke-width="1" stroke-dasharray="4 4"/>"#,
            x1 = fmt_num(line::PADDING),
            x2 = fmt_num(line::WIDTH - line::PADDING),
            y = fmt_num(*y),
        ));
    }

    out.push_str(&format!(
        r#"<path class="area" d="{}" fill="url(#area-gradient)"/><path class="line" d="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="4" stroke-linecap="round" stroke-linejoin="round"/>"#,
        layout.area_path, layout.line_path,
    ));

    for point in &layout.points {
        out.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="6" fill="white" stroke="{LINE_COLOR}" stroke-width="3"><title>{}: {}{}</title></circle>"#,
            fmt_num(point.at.x),
            fmt_num(point.at.y),
            esc(&point.label),
            esc(value_prefix),
            fmt_num(point.value),
        ));
    }

    for point in &layout.points {
        out.push_str(&format!(
            r##"<text x="{}" y="{}" text-anchor="middle" fill="#9CA3AF" font-size="12">{}</text>"##,
            fmt_num(point.at.x),
            fmt_num(line::HEIGHT - 10.0),
            esc(&point.label),
        ));
    }

    out.push_str("</svg>");
    out
}

fn bar_canvas(class: &str, slots: usize) -> String {
    format!(
        r#"<svg class="chart {class}" viewBox="0 0 {} {}" preserveAspectRatio="none" role="img">"#,
        fmt_num(slots.max(1) as f64 * BAR_SLOT),
        fmt_num(BAR_PLOT_HEIGHT + BAR_LABEL_SPACE),
    )
}

fn bar_rect(out: &mut String, x: f64, height: f64, fill: &str, title: &str) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="{fill}"><title>{}</title></rect>"#,
        fmt_num(x),
        fmt_num(BAR_PLOT_HEIGHT - height),
        fmt_num(BAR_WIDTH),
        fmt_num(height),
        esc(title),
    ));
}

fn bar_label(out: &mut String, center: f64, label: &str) {
    out.push_str(&format!(
        r##"<text x="{}" y="{}" text-anchor="middle" fill="#9CA3AF" font-size="11">{}</text>"##,
        fmt_num(center),
        fmt_num(BAR_PLOT_HEIGHT + BAR_LABEL_SPACE - 6.0),
        esc(label),
    ));
}

/// Monthly bookings with the completed-steps overlay
#[must_use]
pub fn activity_chart(bars: &[ActivityBar]) -> String {
    if bars.is_empty() {
        return no_data(BAR_SLOT * 6.0, BAR_PLOT_HEIGHT + BAR_LABEL_SPACE);
    }
    let mut out = bar_canvas("chart-activity", bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let center = (i as f64).mul_add(BAR_SLOT, BAR_SLOT / 2.0);
        let title = format!(
            "{}\nNew Bookings: {}\nSteps Completed: {}",
            bar.label,
            fmt_num(bar.bookings),
            fmt_num(bar.completed_steps)
        );
        let x = center - BAR_WIDTH / 2.0;
        bar_rect(&mut out, x, bar.bookings_pct / 100.0 * BAR_PLOT_HEIGHT, BAR_PRIMARY, &title);
        bar_rect(&mut out, x, bar.steps_pct / 100.0 * BAR_PLOT_HEIGHT, BAR_SECONDARY, &title);
        bar_label(&mut out, center, &bar.label);
    }
    out.push_str("</svg>");
    out
}

/// Side-by-side bars; `scale` maps a bar height to plot pixels
fn paired_chart(
    class: &str,
    bars: &[PairedBar],
    names: (&str, &str),
    scale: impl Fn(f64) -> f64,
) -> String {
    if bars.is_empty() {
        return no_data(BAR_SLOT * 6.0, BAR_PLOT_HEIGHT + BAR_LABEL_SPACE);
    }
    let mut out = bar_canvas(class, bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let center = (i as f64).mul_add(BAR_SLOT, BAR_SLOT / 2.0);
        let title = format!(
            "{}\n{}: {}\n{}: {}",
            bar.label,
            names.0,
            fmt_num(bar.values.0),
            names.1,
            fmt_num(bar.values.1)
        );
        bar_rect(&mut out, center - BAR_WIDTH - 1.0, scale(bar.first), BAR_PRIMARY, &title);
        bar_rect(&mut out, center + 1.0, scale(bar.second), BAR_SECONDARY, &title);
        bar_label(&mut out, center, &bar.label);
    }
    out.push_str("</svg>");
    out
}

/// Subsidy versus non-subsidy bookings per month
#[must_use]
pub fn subsidy_chart(bars: &[PairedBar]) -> String {
    // heights are pixels against an 80px column; stretch to the plot
    let stretch = BAR_PLOT_HEIGHT / (SUBSIDY_BAR_MAX_PX + 20.0);
    paired_chart("chart-subsidy", bars, ("Subsidy", "Non-Subsidy"), |h| h * stretch)
}

/// Direct versus indirect referral joins per month
#[must_use]
pub fn growth_chart(bars: &[PairedBar]) -> String {
    paired_chart("chart-growth", bars, ("Direct", "Indirect"), |pct| {
        pct / 100.0 * BAR_PLOT_HEIGHT
    })
}
