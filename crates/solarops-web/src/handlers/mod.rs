//! Request handlers
//!
//! Pages fetch and render; actions forward a form to the backend and redirect
//! back to the page with a flash message in the query string.

pub mod actions;
pub mod api;
pub mod pages;

use serde::Deserialize;
use solarops_client::ClientResult;
use solarops_core::{QueueTab, Timeframe};
use tracing::error;

/// Query parameters understood by the pages
///
/// Each page reads only the ones it needs; unknown values fall back to the
/// page default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    /// `all`, `month`, `3months` or `6months`
    pub timeframe: String,
    /// Location filter: state
    pub state: String,
    /// Location filter: city, only used with a state
    pub city: String,
    /// `pending` or `resolved`
    pub tab: String,
    /// Free-text search
    pub q: String,
    /// Id of the record shown in the detail panel
    pub selected: String,
    /// Success message from a previous action
    pub notice: Option<String>,
    /// Failure message from a previous action
    pub error: Option<String>,
}

impl PageQuery {
    /// Selected timeframe
    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        Timeframe::parse(&self.timeframe)
    }

    /// Selected queue tab
    #[must_use]
    pub fn tab(&self) -> QueueTab {
        QueueTab::parse(&self.tab)
    }

    /// Trimmed search text
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.trim()
    }

    /// Selected record id, if any
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        Some(self.selected.trim()).filter(|id| !id.is_empty())
    }

    /// Flash message carried by the redirect, errors first
    #[must_use]
    pub fn flash(&self) -> Option<Flash> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        non_blank(&self.error)
            .map(Flash::Error)
            .or_else(|| non_blank(&self.notice).map(Flash::Notice))
    }
}

/// One-shot message shown at the top of a page after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    /// The action succeeded
    Notice(String),
    /// The action failed
    Error(String),
}

impl Flash {
    /// Query parameter name carrying this message
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Notice(_) => "notice",
            Self::Error(_) => "error",
        }
    }

    /// Message text
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Notice(message) | Self::Error(message) => message,
        }
    }

    /// Append this message to a page URL
    #[must_use]
    pub fn location(&self, target: &str) -> String {
        let separator = if target.contains('?') { '&' } else { '?' };
        format!(
            "{target}{separator}{}={}",
            self.key(),
            urlencoding::encode(self.message())
        )
    }
}

/// Unwrap a backend result for rendering, logging the failure
pub(crate) fn loaded<T>(what: &str, result: ClientResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Failed to load {}: {}", what, e);
            None
        }
    }
}
