//! Dashboard page

use super::{load_error, stat_card, timeframe_tabs};
use solarops_charts::bars::{self, MonthlyBookings, PairedValue};
use solarops_charts::line::{self, LineDatum};
use solarops_charts::svg;
use solarops_core::Timeframe;
use solarops_core::types::{Analytics, DashboardStats, ProjectStages};
use solarops_core::utils::{completion_rate, group_indian};

/// Revenue trend from the analytics graph, or the No Data placeholder
#[must_use]
pub fn revenue_chart(analytics: &Analytics) -> String {
    let data: Vec<LineDatum> = analytics
        .graph
        .iter()
        .flatten()
        .map(|point| LineDatum::new(point.month.clone(), point.value))
        .collect();
    svg::line_chart(line::layout(&data).as_ref(), "₹")
}

fn stat_cards(stats: &DashboardStats) -> String {
    let rate = completion_rate(stats.completed_bookings, stats.total_bookings);
    [
        ("Total Bookings", group_indian(stats.total_bookings)),
        ("Completed Bookings", group_indian(stats.completed_bookings)),
        ("Completion Rate", format!("{rate}%")),
        ("Steps Completed", group_indian(stats.total_steps_completed)),
        ("Unresolved Complaints", group_indian(stats.unresolved_complaints)),
        ("Pending AMC", group_indian(stats.pending_amc)),
        ("Overdue Steps", group_indian(stats.overdue_steps)),
    ]
    .iter()
    .map(|(label, value)| stat_card(label, value))
    .collect()
}

fn activity_panels(stages: &ProjectStages) -> String {
    let rows = stages.monthly_data.as_deref().unwrap_or_default();
    let activity: Vec<MonthlyBookings> = rows
        .iter()
        .map(|row| MonthlyBookings {
            label: row.month.clone(),
            bookings: row.bookings,
            completed_steps: row.completed_steps,
        })
        .collect();
    let subsidy: Vec<PairedValue> = rows
        .iter()
        .map(|row| PairedValue::new(row.month.clone(), row.subsidy, row.non_subsidy))
        .collect();

    format!(
        r#"<section class="panel"><h2>Monthly Activity</h2>{}<p class="legend">New Bookings / Steps Completed</p></section><section class="panel"><h2>Subsidy vs Non-Subsidy</h2>{}</section>"#,
        svg::activity_chart(&bars::activity_bars(&activity)),
        svg::subsidy_chart(&bars::subsidy_bars(&subsidy)),
    )
}

/// Page body
#[must_use]
pub fn render(
    timeframe: Timeframe,
    stats: Option<&DashboardStats>,
    analytics: Option<&Analytics>,
    stages: Option<&ProjectStages>,
) -> String {
    let mut out = timeframe_tabs("/dashboard", timeframe, &[]);

    out.push_str(&format!(
        r#"<section class="cards">{}</section>"#,
        stats.map_or_else(|| load_error("dashboard stats"), stat_cards)
    ));
    out.push_str(&format!(
        r#"<section class="panel"><h2>Revenue</h2>{}</section>"#,
        analytics.map_or_else(|| load_error("analytics"), revenue_chart)
    ));
    out.push_str(&stages.map_or_else(|| load_error("project stages"), activity_panels));
    out
}
