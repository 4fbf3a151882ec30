//! Page handlers: fetch from the backend and render HTML
//!
//! The fetches a page needs run concurrently. Each one fails on its own; a
//! failure is logged and that section renders a "Failed to load" notice.

use crate::handlers::{PageQuery, loaded};
use crate::state::AppState;
use crate::views::{self, Chrome, Page};
use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use chrono::Utc;
use solarops_client::{AnalyticsQuery, ClientResult};
use solarops_core::types::{BroadcastRecipient, Notification};
use std::sync::Arc;
use tracing::{error, warn};

fn render(
    page: Page,
    query: &PageQuery,
    notifications: ClientResult<Vec<Notification>>,
    body: &str,
) -> Html<String> {
    let notifications = loaded("notifications", notifications);
    views::layout(
        &Chrome {
            page,
            notifications: notifications.as_deref(),
            flash: query.flash(),
            now: Utc::now(),
        },
        body,
    )
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Dashboard: headline counters, revenue trend and monthly activity
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let timeframe = query.timeframe();
    let client = &state.client;
    let analytics_query = AnalyticsQuery {
        timeframe,
        state: None,
        city: None,
    };

    let (stats, analytics, stages, notifications) = tokio::join!(
        client.dashboard_stats(),
        client.analytics(&analytics_query),
        client.project_stages(timeframe),
        client.notifications(),
    );

    let body = views::dashboard::render(
        timeframe,
        loaded("dashboard stats", stats).as_ref(),
        loaded("analytics", analytics).as_ref(),
        loaded("project stages", stages).as_ref(),
    );
    render(Page::Dashboard, &query, notifications, &body)
}

/// Analytics: cards, revenue trend and project mix, by time and location
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let state_filter = non_empty(&query.state);
    let analytics_query = AnalyticsQuery {
        timeframe: query.timeframe(),
        city: state_filter.as_ref().and_then(|_| non_empty(&query.city)),
        state: state_filter,
    };

    let (analytics, leads, notifications) = tokio::join!(
        client.analytics(&analytics_query),
        client.leads(),
        client.notifications(),
    );

    let body = views::analytics::render(
        &analytics_query,
        loaded("analytics", analytics).as_ref(),
        loaded("bookings", leads).as_deref().unwrap_or_default(),
    );
    render(Page::Analytics, &query, notifications, &body)
}

/// Booking list with timeframe and location filters
pub async fn leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (leads, notifications) = tokio::join!(client.leads(), client.notifications());

    let body = views::leads::list(&query, loaded("bookings", leads).as_deref(), Utc::now());
    render(Page::Leads, &query, notifications, &body)
}

/// Booking receipt, workflow steps and staff assignment
pub async fn lead_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (lead, staff, notifications) =
        tokio::join!(client.lead(&id), client.staff(), client.notifications());

    let body = match lead {
        Ok(lead) => views::leads::detail(&lead, loaded("staff", staff).as_deref()),
        Err(e) if e.is_not_found() => {
            warn!("Booking {} not found", id);
            views::leads::not_found(&id)
        }
        Err(e) => {
            error!("Failed to load booking {}: {}", id, e);
            views::load_error("booking")
        }
    };
    render(Page::Leads, &query, notifications, &body)
}

/// Staff directory with each member's assigned work
pub async fn staff(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (staff, leads, amc, notifications) = tokio::join!(
        client.staff(),
        client.leads(),
        client.amc_requests(),
        client.notifications(),
    );

    let body = views::staff::render(
        &query,
        loaded("staff", staff).as_deref(),
        loaded("bookings", leads).as_deref().unwrap_or_default(),
        loaded("AMC requests", amc).as_deref().unwrap_or_default(),
    );
    render(Page::Staff, &query, notifications, &body)
}

/// AMC request queue
pub async fn amc(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (requests, staff, notifications) = tokio::join!(
        client.amc_requests(),
        client.staff(),
        client.notifications(),
    );

    let body = views::amc::render(
        &query,
        loaded("AMC requests", requests).as_deref(),
        loaded("staff", staff).as_deref().unwrap_or_default(),
    );
    render(Page::Amc, &query, notifications, &body)
}

/// Complaint queue
pub async fn complaints(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (complaints, notifications) =
        tokio::join!(client.complaints(), client.notifications());

    let body = views::complaints::render(&query, loaded("complaints", complaints).as_deref());
    render(Page::Complaints, &query, notifications, &body)
}

/// Referral network overview and one user's downline
pub async fn referrals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (overview, notifications) =
        tokio::join!(client.referral_overview(), client.notifications());

    let overview = loaded("referral overview", overview);
    let failed = overview.is_none();
    let overview = overview.unwrap_or_default();

    let selected = query
        .selected()
        .map(ToString::to_string)
        .or_else(|| overview.top_referrers.first().map(|u| u.id.clone()));
    let details = match selected.as_deref() {
        Some(id) => loaded("referral details", client.referral_user(id).await),
        None => None,
    };

    let body = views::referrals::render(
        &query,
        &overview,
        failed,
        selected.as_deref(),
        details.as_ref(),
    );
    render(Page::Referrals, &query, notifications, &body)
}

/// Customer records
pub async fn data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (customers, notifications) = tokio::join!(client.customers(), client.notifications());

    let body = views::data::render(&query, loaded("customers", customers).as_deref());
    render(Page::Data, &query, notifications, &body)
}

/// Broadcast composer
pub async fn pulse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let client = &state.client;
    let (customers, notifications) = tokio::join!(client.customers(), client.notifications());

    let recipients: Option<Vec<BroadcastRecipient>> =
        loaded("customers", customers).map(|customers| {
            customers
                .iter()
                .filter_map(BroadcastRecipient::from_customer)
                .collect()
        });
    let body = views::pulse::render(&query, recipients.as_deref());
    render(Page::Pulse, &query, notifications, &body)
}
