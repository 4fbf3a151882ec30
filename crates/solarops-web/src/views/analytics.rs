//! Analytics page

use super::{esc, load_error, options, stat_card, timeframe_tabs};
use solarops_charts::pie::{self, PieDatum};
use solarops_charts::svg;
use solarops_client::AnalyticsQuery;
use solarops_core::types::{Analytics, Lead};
use solarops_core::utils::{cities_in_state, distinct_states, format_inr_or_zero, group_indian};

fn location_filter(query: &AnalyticsQuery, leads: &[Lead]) -> String {
    let state = query.state.as_deref().unwrap_or_default();
    let city = query.city.as_deref().unwrap_or_default();
    let cities = if state.is_empty() {
        Vec::new()
    } else {
        cities_in_state(leads, state)
    };
    format!(
        r#"<form class="filters" method="get" action="/analytics"><input type="hidden" name="timeframe" value="{}"><select name="state">{}</select><select name="city"{}>{}</select><button type="submit">Apply</button></form>"#,
        query.timeframe.as_str(),
        options(&distinct_states(leads), state, "All States"),
        if state.is_empty() { " disabled" } else { "" },
        options(&cities, city, "All Cities"),
    )
}

fn cards(analytics: &Analytics) -> String {
    let cards = &analytics.cards;
    [
        ("Bookings", group_indian(cards.bookings.unwrap_or(0))),
        ("Packages", group_indian(cards.packages.unwrap_or(0))),
        ("Revenue", format_inr_or_zero(cards.revenue)),
        (
            "Hot Destinations",
            cards
                .hot_destinations
                .clone()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]
    .iter()
    .map(|(label, value)| stat_card(label, value))
    .collect()
}

/// Project mix as a pie with its legend
#[must_use]
pub fn distribution(analytics: &Analytics) -> String {
    let data: Vec<PieDatum> = analytics
        .project_distribution
        .iter()
        .map(|share| PieDatum::project(share.project_type.clone(), share.count))
        .collect();
    let layout = pie::layout(&data);
    format!(
        r#"<div class="pie">{}{}</div>"#,
        svg::pie_chart(&layout),
        svg::pie_legend(&layout)
    )
}

/// Page body
#[must_use]
pub fn render(query: &AnalyticsQuery, analytics: Option<&Analytics>, leads: &[Lead]) -> String {
    let state = query.state.as_deref().unwrap_or_default();
    let city = query.city.as_deref().unwrap_or_default();
    let mut out = timeframe_tabs(
        "/analytics",
        query.timeframe,
        &[("state", state), ("city", city)],
    );
    out.push_str(&location_filter(query, leads));

    let Some(analytics) = analytics else {
        out.push_str(&load_error("analytics"));
        return out;
    };

    let scope = match (state, city) {
        ("", _) => "All locations".to_string(),
        (state, "") => esc(state),
        (state, city) => format!("{}, {}", esc(city), esc(state)),
    };
    out.push_str(&format!(
        r#"<p class="scope">{} &middot; {}</p><section class="cards">{}</section><section class="panel"><h2>Revenue</h2>{}</section><section class="panel"><h2>Project Distribution</h2>{}</section>"#,
        query.timeframe.label(),
        scope,
        cards(analytics),
        super::dashboard::revenue_chart(analytics),
        distribution(analytics),
    ));
    out
}
