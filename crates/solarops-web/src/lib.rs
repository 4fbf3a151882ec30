//! `SolarOps` admin dashboard
//!
//! A server-rendered web interface over the `SolarOps` backend REST API. Every
//! page fetches what it needs on request, renders HTML with inline SVG charts,
//! and forms post back through the server to the backend.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

// Re-export the main functions
pub use server::build_app;
pub use state::AppState;
