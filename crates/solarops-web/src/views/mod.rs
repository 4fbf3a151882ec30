//! HTML rendering
//!
//! Views take already-fetched data and return markup strings. Anything that
//! came from the backend or the query string goes through [`esc`].

pub mod amc;
pub mod analytics;
pub mod complaints;
pub mod dashboard;
pub mod data;
pub mod leads;
pub mod pulse;
pub mod referrals;
pub mod staff;

use crate::handlers::Flash;
use axum::response::Html;
use chrono::{DateTime, Utc};
use solarops_core::types::Notification;
use solarops_core::utils::format_time_ago;
use solarops_core::{QueueTab, Timeframe};
use v_htmlescape::escape;

/// Escape text for element content and attribute values
#[must_use]
pub fn esc(text: &str) -> String {
    escape(text).to_string()
}

/// Dashboard sections, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Headline numbers and charts
    Dashboard,
    /// Revenue and project mix
    Analytics,
    /// Bookings
    Leads,
    /// Staff members
    Staff,
    /// Maintenance requests
    Amc,
    /// Customer complaints
    Complaints,
    /// Referral network
    Referrals,
    /// Customer records
    Data,
    /// Broadcast messaging
    Pulse,
}

impl Page {
    /// Every page, in navigation order
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::Analytics,
        Self::Leads,
        Self::Staff,
        Self::Amc,
        Self::Complaints,
        Self::Referrals,
        Self::Data,
        Self::Pulse,
    ];

    /// URL path of the page
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Analytics => "/analytics",
            Self::Leads => "/leads",
            Self::Staff => "/staff",
            Self::Amc => "/amc",
            Self::Complaints => "/complaints",
            Self::Referrals => "/referrals",
            Self::Data => "/data",
            Self::Pulse => "/pulse",
        }
    }

    /// Navigation label and page title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analytics => "Analytics",
            Self::Leads => "Bookings",
            Self::Staff => "Staff",
            Self::Amc => "AMC Requests",
            Self::Complaints => "Complaints",
            Self::Referrals => "Referrals",
            Self::Data => "Customer Data",
            Self::Pulse => "Pulse",
        }
    }
}

/// Everything around a page body: navigation, notifications and flash
#[derive(Debug)]
pub struct Chrome<'a> {
    /// Highlighted navigation entry
    pub page: Page,
    /// Notifications, `None` when they failed to load
    pub notifications: Option<&'a [Notification]>,
    /// Message from a previous action
    pub flash: Option<Flash>,
    /// Reference time for relative timestamps
    pub now: DateTime<Utc>,
}

const STYLE: &str = r"
body{margin:0;font-family:system-ui,sans-serif;background:#F9FAFB;color:#111827}
.shell{display:flex;min-height:100vh}
nav.sidebar{width:220px;background:#1C1C1E;padding:24px 12px}
nav.sidebar a{display:block;color:#D1D5DB;text-decoration:none;padding:10px 14px;border-radius:8px}
nav.sidebar a.active{background:#F59E0B;color:#1C1C1E;font-weight:700}
main{flex:1;padding:24px 32px}
.topbar{display:flex;justify-content:space-between;align-items:center}
.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:16px;margin:16px 0}
.card{background:white;border-radius:12px;padding:16px;box-shadow:0 1px 2px rgba(0,0,0,.06)}
.card .value{font-size:26px;font-weight:800}
.panel{background:white;border-radius:12px;padding:16px;margin:16px 0}
.flash{padding:12px 16px;border-radius:8px;margin:12px 0}
.flash.notice{background:#ECFDF5;color:#065F46}
.flash.error,.load-error{background:#FEF2F2;color:#B91C1C;padding:12px 16px;border-radius:8px}
table{width:100%;border-collapse:collapse}
th,td{text-align:left;padding:8px;border-bottom:1px solid #E5E7EB}
.tabs a{margin-right:12px}
.tabs a.active{font-weight:700;text-decoration:underline}
.badge{display:inline-block;padding:2px 8px;border-radius:999px;font-size:12px;border:1px solid}
.chart{width:100%;height:auto}
.notifications li.unread{font-weight:600}
";

/// Wrap a page body in the shared layout
#[must_use]
pub fn layout(chrome: &Chrome<'_>, body: &str) -> Html<String> {
    let mut out = format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} | SolarOps Admin</title><style>{STYLE}</style></head><body><div class="shell"><nav class="sidebar">"#,
        title = chrome.page.title(),
    );
    for page in Page::ALL {
        let class = if page == chrome.page { r#" class="active""# } else { "" };
        out.push_str(&format!(
            r#"<a href="{}"{class}>{}</a>"#,
            page.path(),
            page.title()
        ));
    }
    out.push_str(&format!(
        r#"</nav><main><div class="topbar"><h1>{}</h1>{}</div>"#,
        chrome.page.title(),
        notifications(chrome.notifications, chrome.now)
    ));
    if let Some(ref flash) = chrome.flash {
        out.push_str(&flash_banner(flash));
    }
    out.push_str(body);
    out.push_str("</main></div></body></html>");
    Html(out)
}

fn flash_banner(flash: &Flash) -> String {
    let class = match flash {
        Flash::Notice(_) => "notice",
        Flash::Error(_) => "error",
    };
    format!(
        r#"<div class="flash {class}" role="status">{}</div>"#,
        esc(flash.message())
    )
}

/// Notification dropdown with the unread count
fn notifications(items: Option<&[Notification]>, now: DateTime<Utc>) -> String {
    let Some(items) = items else {
        return r#"<details class="notifications"><summary>Notifications</summary><p class="load-error">Failed to load notifications</p></details>"#.to_string();
    };
    let unread = items.iter().filter(|n| n.unread).count();
    let mut out = format!(
        r#"<details class="notifications"><summary>Notifications <span class="badge" data-unread="{unread}">{unread}</span></summary>"#
    );
    if items.is_empty() {
        out.push_str("<p>No notifications</p>");
    } else {
        out.push_str("<ul>");
        for item in items {
            let class = if item.unread { "unread" } else { "read" };
            let when = item
                .time
                .map_or_else(String::new, |time| format_time_ago(time, now));
            out.push_str(&format!(
                r#"<li class="{class}" style="border-left:3px solid {color}"><strong>{title}</strong><p>{message}</p><small>{when}</small></li>"#,
                color = esc(item.color.as_deref().unwrap_or("#F59E0B")),
                title = esc(&item.title),
                message = esc(&item.message),
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str("</details>");
    out
}

/// Static notice for a section whose data could not be fetched
#[must_use]
pub fn load_error(what: &str) -> String {
    format!(r#"<div class="load-error">Failed to load {}</div>"#, esc(what))
}

/// Headline number card
#[must_use]
pub fn stat_card(label: &str, value: &str) -> String {
    format!(
        r#"<div class="card"><div class="label">{}</div><div class="value">{}</div></div>"#,
        esc(label),
        esc(value)
    )
}

/// Query string from name/value pairs, skipping empty values
#[must_use]
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

/// Link for a page with the given query parameters, ready for an attribute
///
/// Values are percent-encoded, so only the separators need escaping.
#[must_use]
pub fn href(path: &str, pairs: &[(&str, &str)]) -> String {
    format!("{path}{}", query_string(pairs)).replace('&', "&amp;")
}

/// Timeframe selector; `keep` carries the other active filters
#[must_use]
pub fn timeframe_tabs(path: &str, current: Timeframe, keep: &[(&str, &str)]) -> String {
    let mut out = String::from(r#"<div class="tabs timeframe">"#);
    for timeframe in Timeframe::ALL {
        let mut pairs = vec![("timeframe", timeframe.as_str())];
        pairs.extend_from_slice(keep);
        let class = if timeframe == current { r#" class="active""# } else { "" };
        out.push_str(&format!(
            r#"<a href="{}"{class}>{}</a>"#,
            href(path, &pairs),
            timeframe.label()
        ));
    }
    out.push_str("</div>");
    out
}

/// Pending/resolved tabs with counts
#[must_use]
pub fn queue_tabs(path: &str, current: QueueTab, counts: (usize, usize), query: &str) -> String {
    let mut out = String::from(r#"<div class="tabs queue">"#);
    for (tab, label, count) in [
        (QueueTab::Pending, "Pending", counts.0),
        (QueueTab::Resolved, "Resolved", counts.1),
    ] {
        let class = if tab == current { r#" class="active""# } else { "" };
        out.push_str(&format!(
            r#"<a href="{}"{class}>{label} ({count})</a>"#,
            href(path, &[("tab", tab.as_str()), ("q", query)])
        ));
    }
    out.push_str("</div>");
    out
}

/// GET search form; `keep` becomes hidden inputs
#[must_use]
pub fn search_form(path: &str, query: &str, placeholder: &str, keep: &[(&str, &str)]) -> String {
    let mut out = format!(r#"<form class="search" method="get" action="{path}">"#);
    for (name, value) in keep.iter().filter(|(_, v)| !v.is_empty()) {
        out.push_str(&format!(
            r#"<input type="hidden" name="{name}" value="{}">"#,
            esc(value)
        ));
    }
    out.push_str(&format!(
        r#"<input type="search" name="q" value="{}" placeholder="{}"><button type="submit">Search</button></form>"#,
        esc(query),
        esc(placeholder)
    ));
    out
}

/// `<option>` list with one entry marked selected
#[must_use]
pub fn options(values: &[String], selected: &str, placeholder: &str) -> String {
    let mut out = format!(r#"<option value="">{}</option>"#, esc(placeholder));
    for value in values {
        let mark = if value == selected { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{v}"{mark}>{v}</option>"#,
            v = esc(value)
        ));
    }
    out
}

/// Small coloured pill
#[must_use]
pub fn badge(text: &str, bg: &str, border: &str, color: &str) -> String {
    format!(
        r#"<span class="badge" style="background:{bg};border-color:{border};color:{color}">{}</span>"#,
        esc(text)
    )
}

/// Text or a dash when missing
#[must_use]
pub fn or_dash(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| "-".to_string(), esc)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn chrome(notifications: Option<&[Notification]>, flash: Option<Flash>) -> Chrome<'_> {
        Chrome {
            page: Page::Leads,
            notifications,
            flash,
            now: Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_query_string_skips_empty_and_encodes() {
        assert_eq!(
            query_string(&[("state", "Tamil Nadu"), ("city", ""), ("q", "a&b")]),
            "?state=Tamil%20Nadu&q=a%26b"
        );
        assert_eq!(query_string(&[("city", "")]), "");
    }

    #[test]
    fn test_layout_marks_active_page_and_escapes_flash() {
        let Html(page) = layout(
            &chrome(Some(&[]), Some(Flash::Error("<b>nope".to_string()))),
            "<p>body</p>",
        );
        assert!(page.contains(r#"<a href="/leads" class="active">Bookings</a>"#));
        assert!(page.contains("&lt;b&gt;nope"));
        assert!(page.contains(r#"class="flash error""#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_notifications_unread_count_and_relative_time() {
        let items = vec![
            Notification {
                title: "New booking".to_string(),
                message: "KS-0042".to_string(),
                time: Some(Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()),
                unread: true,
                ..Notification::default()
            },
            Notification {
                title: "Complaint resolved".to_string(),
                unread: false,
                ..Notification::default()
            },
        ];
        let Html(page) = layout(&chrome(Some(&items), None), "");
        assert!(page.contains(r#"data-unread="1""#));
        assert!(page.contains("3 hours ago"));
        assert!(page.contains("New booking"));
    }

    #[test]
    fn test_failed_notifications_render_notice() {
        let Html(page) = layout(&chrome(None, None), "");
        assert!(page.contains("Failed to load notifications"));
    }

    #[test]
    fn test_options_marks_selection() {
        let values = vec!["Kerala".to_string(), "Tamil Nadu".to_string()];
        let html = options(&values, "Tamil Nadu", "All states");
        assert!(html.contains(r#"<option value="Tamil Nadu" selected>"#));
        assert!(html.contains(r#"<option value="">All states</option>"#));
    }
}
