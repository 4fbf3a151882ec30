//! Typed REST client for the `SolarOps` admin backend
//!
//! [`ApiClient`] wraps one `reqwest::Client` and exposes a method per backend
//! endpoint. Failed responses surface the backend's own message through
//! [`ClientError::Api`].

#![forbid(unsafe_code)]

pub mod api_client;
pub mod error;

pub use api_client::{AnalyticsQuery, ApiClient, DEFAULT_ERROR_MESSAGE, error_message};
pub use error::{ClientError, ClientResult};
