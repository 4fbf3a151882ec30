//! Route definitions for the web interface

use crate::{
    handlers::{actions, api, pages},
    state::AppState,
};
use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use std::sync::Arc;

/// Build page routes
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/dashboard") }))
        .route("/dashboard", get(pages::dashboard))
        .route("/analytics", get(pages::analytics))
        .route("/leads", get(pages::leads))
        .route("/leads/:id", get(pages::lead_detail))
        .route("/staff", get(pages::staff))
        .route("/amc", get(pages::amc))
        .route("/complaints", get(pages::complaints))
        .route("/referrals", get(pages::referrals))
        .route("/data", get(pages::data))
        .route("/pulse", get(pages::pulse))
}

/// Build form action routes; each one redirects back to its page
pub fn action_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leads/:id/assign", post(actions::assign_lead))
        .route("/leads/:id/unassign", post(actions::unassign_lead))
        .route("/staff", post(actions::create_staff))
        .route("/staff/:id/delete", post(actions::delete_staff))
        .route("/amc/:id/assign", post(actions::assign_amc))
        .route("/amc/:id/complete", post(actions::complete_amc))
        .route("/complaints/:id/resolve", post(actions::resolve_complaint))
        .route("/pulse/send", post(actions::send_broadcast))
}

/// Build the complete web application router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(action_routes())
        // Health check
        .route("/health", get(api::health_check))
        .fallback(api::not_found)
}
