//! HTTP client for the `SolarOps` admin REST API

use crate::error::{ClientError, ClientResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use solarops_core::config::BackendConfig;
use solarops_core::types::{
    AmcRequest, Analytics, BroadcastRequest, Complaint, Customer, DashboardStats, Lead, NewStaff,
    Notification, ProjectStages, ReferralOverview, ReferralUserDetails, Staff,
};
use solarops_core::Timeframe;
use std::time::Duration;
use tracing::{debug, warn};

/// Message used when a failed response carries none
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Pull the human readable message out of an error body
///
/// Prefers `error`, then `message`; blank or non-string fields are skipped.
#[must_use]
pub fn error_message(body: &Value) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|msg| !msg.trim().is_empty())
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string()
}

/// Filters for the analytics endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// Timeframe; `all` is left off the query string
    pub timeframe: Timeframe,
    /// State filter
    pub state: Option<String>,
    /// City filter
    pub city: Option<String>,
}

impl AnalyticsQuery {
    /// Path and query string for this filter set
    #[must_use]
    pub fn to_path(&self) -> String {
        let mut query_params = Vec::new();

        if self.timeframe != Timeframe::All {
            query_params.push(format!("timeframe={}", self.timeframe.as_str()));
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.is_empty()) {
            query_params.push(format!("state={}", urlencoding::encode(state)));
        }
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            query_params.push(format!("city={}", urlencoding::encode(city)));
        }

        let mut path = "/api/admin/analytics".to_string();
        if !query_params.is_empty() {
            path.push('?');
            path.push_str(&query_params.join("&"));
        }
        path
    }
}

/// API client for the admin backend
///
/// Every request carries `Content-Type: application/json` and, when a token is
/// configured, `Authorization: Bearer <token>`. Cloning is cheap; clones share
/// the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL with a 30 second timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot be
    /// built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Create a client from the backend section of the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is unusable.
    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        let client =
            Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match config.token.as_deref() {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Set the bearer token for authentication
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Base URL every path is appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is attached to requests
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, "application/json");

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            let message = error_message(&body);
            debug!(status = status.as_u16(), path = %url, error = %message, "Backend rejected request");
            return Err(ClientError::api(status.as_u16(), message));
        }

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch JSON from a backend path, e.g. `/api/admin/leads`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the backend's message for a non-2xx
    /// status, [`ClientError::Http`] if no response arrives, and
    /// [`ClientError::Decode`] if the body does not match `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Send a JSON body with the given method and decode the response
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch_json`].
    pub async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, path).json(body)).await
    }

    /// Issue a request without a body and decode the response
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::fetch_json`].
    pub async fn send_empty<T: DeserializeOwned>(&self, method: Method, path: &str) -> ClientResult<T> {
        self.execute(self.request(method, path)).await
    }

    /// Fetch a list, treating any non-array body as empty
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let body: Value = self.fetch_json(path).await?;
        if body.is_array() {
            Ok(serde_json::from_value(body)?)
        } else {
            warn!(path, "Expected a JSON array, treating response as empty");
            Ok(Vec::new())
        }
    }

    /// Headline counters
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.fetch_json("/api/admin/dashboard/stats").await
    }

    /// Analytics cards, revenue graph and project distribution
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn analytics(&self, query: &AnalyticsQuery) -> ClientResult<Analytics> {
        self.fetch_json(&query.to_path()).await
    }

    /// Monthly bookings, steps and subsidy split
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn project_stages(&self, timeframe: Timeframe) -> ClientResult<ProjectStages> {
        self.fetch_json(&format!(
            "/api/admin/dashboard/project-stages?timeFrame={}",
            timeframe.as_str()
        ))
        .await
    }

    /// All bookings
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn leads(&self) -> ClientResult<Vec<Lead>> {
        self.fetch_list("/api/admin/leads").await
    }

    /// One booking with its steps, complaints and AMC requests
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn lead(&self, id: &str) -> ClientResult<Lead> {
        self.fetch_json(&format!("/api/admin/leads/{}", urlencoding::encode(id)))
            .await
    }

    /// Assign a booking to a staff member
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the assignment is rejected.
    pub async fn assign_lead(&self, id: &str, staff_id: &str) -> ClientResult<Value> {
        self.send_json(
            Method::POST,
            &format!("/api/admin/leads/{}/assign", urlencoding::encode(id)),
            &json!({ "staffId": staff_id }),
        )
        .await
    }

    /// Remove a booking's staff assignment
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the request is rejected.
    pub async fn unassign_lead(&self, id: &str) -> ClientResult<Value> {
        self.send_empty(
            Method::POST,
            &format!("/api/admin/leads/{}/unassign", urlencoding::encode(id)),
        )
        .await
    }

    /// Field staff
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn staff(&self) -> ClientResult<Vec<Staff>> {
        self.fetch_list("/api/admin/staff").await
    }

    /// Add a staff member
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the account cannot be created.
    pub async fn create_staff(&self, staff: &NewStaff) -> ClientResult<Value> {
        self.send_json(Method::POST, "/api/admin/staff", staff).await
    }

    /// Delete a staff member
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the member cannot be deleted.
    pub async fn delete_staff(&self, id: &str) -> ClientResult<Value> {
        self.send_empty(
            Method::DELETE,
            &format!("/api/admin/staff/{}", urlencoding::encode(id)),
        )
        .await
    }

    /// AMC requests
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn amc_requests(&self) -> ClientResult<Vec<AmcRequest>> {
        self.fetch_list("/api/admin/amc-requests").await
    }

    /// Hand an AMC request to a staff member
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the update is rejected.
    pub async fn assign_amc(&self, id: &str, staff_id: &str) -> ClientResult<Value> {
        self.send_json(
            Method::PATCH,
            &format!("/api/admin/amc-requests/{}", urlencoding::encode(id)),
            &json!({ "assignedStaffId": staff_id }),
        )
        .await
    }

    /// Mark an AMC request resolved
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the update is rejected.
    pub async fn resolve_amc(&self, id: &str) -> ClientResult<Value> {
        self.send_json(
            Method::PATCH,
            &format!("/api/admin/amc-requests/{}", urlencoding::encode(id)),
            &json!({ "status": "resolved" }),
        )
        .await
    }

    /// Complaints
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn complaints(&self) -> ClientResult<Vec<Complaint>> {
        self.fetch_list("/api/admin/complaints").await
    }

    /// Mark a complaint resolved
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the update is rejected.
    pub async fn resolve_complaint(&self, id: &str) -> ClientResult<Value> {
        self.send_empty(
            Method::POST,
            &format!("/api/admin/complaints/{}/resolve", urlencoding::encode(id)),
        )
        .await
    }

    /// App customers
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn customers(&self) -> ClientResult<Vec<Customer>> {
        self.fetch_list("/api/admin/customers").await
    }

    /// Referral network overview
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn referral_overview(&self) -> ClientResult<ReferralOverview> {
        self.fetch_json("/api/admin/referrals/overview").await
    }

    /// Downline members of one referral user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn referral_user(&self, id: &str) -> ClientResult<ReferralUserDetails> {
        self.fetch_json(&format!(
            "/api/admin/referrals/user/{}",
            urlencoding::encode(id)
        ))
        .await
    }

    /// Send or schedule a broadcast
    ///
    /// # Errors
    ///
    /// Returns the backend's message if the broadcast is rejected.
    pub async fn send_broadcast(&self, broadcast: &BroadcastRequest) -> ClientResult<Value> {
        self.send_json(Method::POST, "/api/admin/broadcast/send", broadcast)
            .await
    }

    /// Admin notifications
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an element cannot be decoded.
    pub async fn notifications(&self) -> ClientResult<Vec<Notification>> {
        self.fetch_list("/api/admin/notifications").await
    }
}
