//! Application state management

use solarops_client::ApiClient;
use solarops_core::Config;

/// Application state holding configuration and the backend client
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for backend communication
    pub client: ApiClient,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built from the
    /// configured URL.
    pub fn new(config: Config) -> solarops_core::Result<Self> {
        let client = ApiClient::from_config(&config.backend)?;
        Ok(Self { config, client })
    }
}
