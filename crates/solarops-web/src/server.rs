//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use solarops_core::Config;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the backend client cannot be created.
pub fn build_app(config: Config) -> solarops_core::Result<Router> {
    let state = Arc::new(AppState::new(config)?);

    Ok(build_routes()
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
