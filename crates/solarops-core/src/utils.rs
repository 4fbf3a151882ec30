//! Formatting, filtering and validation helpers shared by every page

use crate::types::{
    AmcRequest, BroadcastRecipient, Complaint, Customer, Lead, LeadStep, NewStaff, QueueTab,
    ReferralUser, Staff, Timeframe,
};
use chrono::{DateTime, Datelike, Months, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Group an integer the Indian way: last three digits, then pairs
///
/// `12345678` becomes `1,23,45,678`.
#[must_use]
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Format a number in the `en-IN` locale with at most two decimals
#[must_use]
pub fn format_indian(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * 100.0).round() as u64;

    let mut out = group_indian(whole as u64);
    if cents > 0 {
        let fraction = format!("{cents:02}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    if value < 0.0 && (whole > 0.0 || cents > 0) {
        out.insert(0, '-');
    }
    out
}

/// Format a rupee amount, e.g. `₹2,50,000`
#[must_use]
pub fn format_inr(value: f64) -> String {
    format!("₹{}", format_indian(value))
}

/// Format an optional rupee amount, treating a missing value as zero
#[must_use]
pub fn format_inr_or_zero(value: Option<f64>) -> String {
    format_inr(value.unwrap_or(0.0))
}

/// Calendar date as `d/m/yyyy`, or an em-width placeholder when absent
#[must_use]
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |dt| dt.format("%-d/%-m/%Y").to_string())
}

/// Short date and time for queue cards, e.g. `4 Mar, 10:05 AM`
#[must_use]
pub fn format_short_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |dt| dt.format("%-d %b, %I:%M %p").to_string(),
    )
}

/// Relative time used by the notifications list
#[must_use]
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} min ago")
    } else if hours < 24 {
        format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" })
    } else {
        format!("{days} day{} ago", if days > 1 { "s" } else { "" })
    }
}

/// Share of completed bookings as a whole percentage
#[must_use]
pub fn completion_rate(completed: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u64
}

/// Case-insensitive substring match; an empty needle matches everything
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a creation time falls inside the timeframe
///
/// Records without a timestamp only pass the `all` filter.
#[must_use]
pub fn matches_timeframe(
    created_at: Option<DateTime<Utc>>,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> bool {
    let months_back = match timeframe {
        Timeframe::All => return true,
        Timeframe::Month => {
            return created_at
                .is_some_and(|date| date.month() == now.month() && date.year() == now.year());
        }
        Timeframe::ThreeMonths => 3,
        Timeframe::SixMonths => 6,
    };
    let Some(created_at) = created_at else {
        return false;
    };
    now.checked_sub_months(Months::new(months_back))
        .is_none_or(|cutoff| created_at >= cutoff)
}

/// State filter, narrowed by city only when a state is selected
#[must_use]
pub fn matches_location(
    record_state: Option<&str>,
    record_city: Option<&str>,
    state: &str,
    city: &str,
) -> bool {
    if state.is_empty() {
        return true;
    }
    if record_state != Some(state) {
        return false;
    }
    city.is_empty() || record_city == Some(city)
}

/// Apply the booking list's timeframe and location filters
#[must_use]
pub fn filter_leads<'a>(
    leads: &'a [Lead],
    timeframe: Timeframe,
    state: &str,
    city: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Lead> {
    leads
        .iter()
        .filter(|lead| matches_timeframe(lead.created_at, timeframe, now))
        .filter(|lead| matches_location(lead.state.as_deref(), lead.city.as_deref(), state, city))
        .collect()
}

/// Distinct, sorted states across a set of bookings
#[must_use]
pub fn distinct_states(leads: &[Lead]) -> Vec<String> {
    let mut states: Vec<String> = leads
        .iter()
        .filter_map(|lead| lead.state.clone())
        .filter(|state| !state.trim().is_empty())
        .collect();
    states.sort();
    states.dedup();
    states
}

/// Distinct, sorted cities of one state
#[must_use]
pub fn cities_in_state(leads: &[Lead], state: &str) -> Vec<String> {
    let mut cities: Vec<String> = leads
        .iter()
        .filter(|lead| lead.state.as_deref() == Some(state))
        .filter_map(|lead| lead.city.clone())
        .filter(|city| !city.trim().is_empty())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

/// The twelve installation steps every booking goes through
pub const STANDARD_STEPS: [&str; 12] = [
    "Meeting",
    "Survey",
    "Structure Install",
    "Civil Work",
    "Wiring",
    "Panel Installation",
    "Net Metering",
    "Testing",
    "Full Plant Start",
    "Subsidy Process Request",
    "Subsidy Disbursement",
    "Certificate",
];

/// Lay the backend's steps over the standard list
///
/// A backend step is matched by its 1-based order first, then by name when it
/// carries no order. Matched steps take the standard label; unmatched labels
/// become incomplete placeholders with a `default-N` id. The result is
/// 0-based.
#[must_use]
pub fn merge_lead_steps(backend: &[LeadStep]) -> Vec<LeadStep> {
    STANDARD_STEPS
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let position = idx as u32;
            let found = backend
                .iter()
                .find(|step| step.order == Some(position + 1))
                .or_else(|| {
                    backend
                        .iter()
                        .find(|step| step.order.is_none() && step.name == *label)
                });

            found.map_or_else(
                || LeadStep {
                    id: format!("default-{idx}"),
                    name: (*label).to_string(),
                    order: Some(position),
                    completed: false,
                    due_days: None,
                },
                |step| LeadStep {
                    name: (*label).to_string(),
                    order: Some(position),
                    ..step.clone()
                },
            )
        })
        .collect()
}

/// Colour set for a badge or card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background
    pub bg: &'static str,
    /// Border
    pub border: &'static str,
    /// Text
    pub text: &'static str,
}

/// How overdue a workflow step is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    /// One day over
    DueSoon,
    /// Two days over
    Attention,
    /// Three days over
    Urgent,
    /// Four days over
    VeryUrgent,
    /// Five or more days over
    Critical,
}

impl Urgency {
    /// Tier for a number of overdue days; zero or missing means not overdue
    #[must_use]
    pub fn from_due_days(days: Option<u32>) -> Option<Self> {
        match days.unwrap_or(0).min(5) {
            0 => None,
            1 => Some(Self::DueSoon),
            2 => Some(Self::Attention),
            3 => Some(Self::Urgent),
            4 => Some(Self::VeryUrgent),
            _ => Some(Self::Critical),
        }
    }

    /// Badge label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DueSoon => "Due Soon",
            Self::Attention => "Attention",
            Self::Urgent => "Urgent",
            Self::VeryUrgent => "Very Urgent",
            Self::Critical => "CRITICAL",
        }
    }

    /// Step card colours
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::DueSoon => Palette {
                bg: "#FFF9E6",
                border: "#F59E0B",
                text: "#F59E0B",
            },
            Self::Attention => Palette {
                bg: "#FFF4E0",
                border: "#FB923C",
                text: "#FB923C",
            },
            Self::Urgent => Palette {
                bg: "#FFEDD5",
                border: "#F97316",
                text: "#F97316",
            },
            Self::VeryUrgent => Palette {
                bg: "#FEE2E2",
                border: "#EF4444",
                text: "#EF4444",
            },
            Self::Critical => Palette {
                bg: "#FFF5F5",
                border: "#E53935",
                text: "#E53935",
            },
        }
    }
}

/// Complaint severity colours; unknown severities are grey
#[must_use]
pub fn severity_palette(severity: &str) -> Palette {
    match severity {
        "critical" => Palette {
            bg: "#FEF2F2",
            border: "#FEE2E2",
            text: "#B91C1C",
        },
        "high" => Palette {
            bg: "#FFF7ED",
            border: "#FFEDD5",
            text: "#C2410C",
        },
        "medium" => Palette {
            bg: "#FFFBEB",
            border: "#FEF3C7",
            text: "#B45309",
        },
        "low" => Palette {
            bg: "#F0FDF4",
            border: "#DCFCE7",
            text: "#15803D",
        },
        _ => Palette {
            bg: "#F3F4F6",
            border: "#E5E7EB",
            text: "#374151",
        },
    }
}

/// Severity shown when the backend sends none
pub const DEFAULT_SEVERITY: &str = "medium";

/// Whether an AMC status belongs on the tab
#[must_use]
pub fn amc_in_tab(status: &str, tab: QueueTab) -> bool {
    match tab {
        QueueTab::Pending => matches!(status, "pending" | "in_progress" | "rejected"),
        QueueTab::Resolved => status == "resolved",
    }
}

/// Whether a complaint status belongs on the tab
#[must_use]
pub fn complaint_in_tab(status: &str, tab: QueueTab) -> bool {
    match tab {
        QueueTab::Pending => matches!(status, "pending" | "in_progress"),
        QueueTab::Resolved => status == "resolved",
    }
}

/// AMC queue filter: tab, then customer name, project type or note
#[must_use]
pub fn filter_amc<'a>(requests: &'a [AmcRequest], tab: QueueTab, query: &str) -> Vec<&'a AmcRequest> {
    requests
        .iter()
        .filter(|req| amc_in_tab(&req.status, tab))
        .filter(|req| {
            contains_ci(req.customer_name(), query)
                || contains_ci(req.project_type(), query)
                || contains_ci(req.note.as_deref().unwrap_or_default(), query)
        })
        .collect()
}

/// Complaint queue filter: tab, then customer name, type or message
#[must_use]
pub fn filter_complaints<'a>(
    complaints: &'a [Complaint],
    tab: QueueTab,
    query: &str,
) -> Vec<&'a Complaint> {
    complaints
        .iter()
        .filter(|c| complaint_in_tab(&c.status, tab))
        .filter(|c| {
            contains_ci(c.customer_name(), query)
                || contains_ci(Complaint::TYPE_LABEL, query)
                || contains_ci(c.message.as_deref().unwrap_or_default(), query)
        })
        .collect()
}

/// Staff search over name or role
#[must_use]
pub fn filter_staff<'a>(staff: &'a [Staff], query: &str) -> Vec<&'a Staff> {
    staff
        .iter()
        .filter(|s| contains_ci(&s.name, query) || contains_ci(&s.role, query))
        .collect()
}

/// Customer search: mobile substring, or referral code ignoring case
#[must_use]
pub fn filter_customers<'a>(customers: &'a [Customer], query: &str) -> Vec<&'a Customer> {
    customers
        .iter()
        .filter(|c| {
            c.mobile.contains(query)
                || c.referral_code
                    .as_deref()
                    .is_some_and(|code| contains_ci(code, query))
        })
        .collect()
}

/// Referrer search: phone substring, or referral code ignoring case
#[must_use]
pub fn filter_referrers<'a>(users: &'a [ReferralUser], query: &str) -> Vec<&'a ReferralUser> {
    users
        .iter()
        .filter(|u| u.phone_number.contains(query) || contains_ci(&u.referral_code, query))
        .collect()
}

/// Broadcast recipient search over name, phone or city
#[must_use]
pub fn filter_recipients<'a>(
    recipients: &'a [BroadcastRecipient],
    query: &str,
) -> Vec<&'a BroadcastRecipient> {
    recipients
        .iter()
        .filter(|r| {
            contains_ci(&r.full_name, query) || r.phone.contains(query) || contains_ci(&r.city, query)
        })
        .collect()
}

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Loose email shape check: something, `@`, something, `.`, something
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Validate the add-staff form before it is posted
///
/// # Errors
///
/// Returns a validation error naming the first offending field.
pub fn validate_new_staff(form: &NewStaff) -> crate::Result<()> {
    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.password.trim().is_empty()
    {
        return Err(crate::Error::validation(
            "staff",
            "Please fill in all required fields (Name, Email, Password)",
        ));
    }
    if !is_valid_email(form.email.trim()) {
        return Err(crate::Error::validation(
            "email",
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

/// Validate a broadcast before it is posted
///
/// # Errors
///
/// Returns a validation error when no recipient is selected or the message is
/// blank.
pub fn validate_broadcast(recipients: &[String], message: &str) -> crate::Result<()> {
    if recipients.is_empty() {
        return Err(crate::Error::validation(
            "recipients",
            "Please select at least one recipient",
        ));
    }
    if message.trim().is_empty() {
        return Err(crate::Error::validation("message", "Please enter a message"));
    }
    Ok(())
}

/// Combine a schedule date and time as `{date}T{time}`; either missing means now
#[must_use]
pub fn schedule_at(date: &str, time: &str) -> Option<String> {
    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        None
    } else {
        Some(format!("{date}T{time}"))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::unreadable_literal,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(100000, "1,00,000")]
    #[case(12345678, "1,23,45,678")]
    #[case(250000, "2,50,000")]
    fn test_group_indian(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(group_indian(value), expected);
    }

    #[rstest]
    #[case(272500.0, "2,72,500")]
    #[case(1234.5, "1,234.5")]
    #[case(99.999, "100")]
    #[case(-1500.25, "-1,500.25")]
    #[case(-0.001, "0")]
    #[case(f64::NAN, "0")]
    fn test_format_indian(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_indian(value), expected);
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(250000.0), "₹2,50,000");
        assert_eq!(format_inr_or_zero(None), "₹0");
    }

    #[test]
    fn test_format_dates() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 4, 10, 5, 0).unwrap();
        assert_eq!(format_date(Some(dt)), "4/3/2026");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_short_datetime(Some(dt)), "4 Mar, 10:05 AM");
    }

    #[rstest]
    #[case(0, "Just now")]
    #[case(59, "Just now")]
    #[case(60, "1 min ago")]
    #[case(59 * 60, "59 min ago")]
    #[case(3600, "1 hour ago")]
    #[case(5 * 3600, "5 hours ago")]
    #[case(86400, "1 day ago")]
    #[case(3 * 86400 + 10, "3 days ago")]
    fn test_format_time_ago(#[case] seconds: i64, #[case] expected: &str) {
        let now = at(2026, 5, 10);
        let then = now - chrono::Duration::seconds(seconds);
        assert_eq!(format_time_ago(then, now), expected);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(5, 5), 100);
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Ravi Kumar", "kumar"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Installer", "wiring"));
    }

    #[test]
    fn test_matches_timeframe() {
        let now = at(2026, 5, 20);

        assert!(matches_timeframe(None, Timeframe::All, now));
        assert!(!matches_timeframe(None, Timeframe::Month, now));
        assert!(!matches_timeframe(None, Timeframe::ThreeMonths, now));

        assert!(matches_timeframe(Some(at(2026, 5, 1)), Timeframe::Month, now));
        assert!(!matches_timeframe(Some(at(2025, 5, 1)), Timeframe::Month, now));
        assert!(!matches_timeframe(Some(at(2026, 4, 30)), Timeframe::Month, now));

        assert!(matches_timeframe(Some(at(2026, 2, 21)), Timeframe::ThreeMonths, now));
        assert!(!matches_timeframe(Some(at(2026, 2, 19)), Timeframe::ThreeMonths, now));
        assert!(matches_timeframe(Some(at(2025, 12, 1)), Timeframe::SixMonths, now));
        assert!(!matches_timeframe(Some(at(2025, 11, 1)), Timeframe::SixMonths, now));
    }

    #[test]
    fn test_matches_location() {
        assert!(matches_location(None, None, "", ""));
        assert!(matches_location(Some("Gujarat"), None, "Gujarat", ""));
        assert!(!matches_location(Some("Kerala"), None, "Gujarat", ""));
        assert!(matches_location(Some("Gujarat"), Some("Surat"), "Gujarat", "Surat"));
        assert!(!matches_location(Some("Gujarat"), Some("Rajkot"), "Gujarat", "Surat"));
        // a city without a state is ignored
        assert!(matches_location(Some("Kerala"), Some("Kochi"), "", "Surat"));
    }

    fn lead(id: &str, state: &str, city: &str, created: DateTime<Utc>) -> Lead {
        Lead {
            id: id.to_string(),
            state: Some(state.to_string()),
            city: Some(city.to_string()),
            created_at: Some(created),
            ..Lead::default()
        }
    }

    #[test]
    fn test_filter_leads_and_locations() {
        let now = at(2026, 5, 20);
        let leads = vec![
            lead("1", "Gujarat", "Surat", at(2026, 5, 2)),
            lead("2", "Gujarat", "Rajkot", at(2026, 1, 2)),
            lead("3", "Kerala", "Kochi", at(2026, 5, 3)),
        ];

        let ids = |found: Vec<&Lead>| found.iter().map(|l| l.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(filter_leads(&leads, Timeframe::All, "", "", now)), ["1", "2", "3"]);
        assert_eq!(ids(filter_leads(&leads, Timeframe::Month, "", "", now)), ["1", "3"]);
        assert_eq!(ids(filter_leads(&leads, Timeframe::All, "Gujarat", "", now)), ["1", "2"]);
        assert_eq!(
            ids(filter_leads(&leads, Timeframe::Month, "Gujarat", "Surat", now)),
            ["1"]
        );

        assert_eq!(distinct_states(&leads), ["Gujarat", "Kerala"]);
        assert_eq!(cities_in_state(&leads, "Gujarat"), ["Rajkot", "Surat"]);
    }

    #[test]
    fn test_merge_lead_steps() {
        let backend = vec![
            LeadStep {
                id: "a".to_string(),
                name: "kickoff".to_string(),
                order: Some(1),
                completed: true,
                due_days: None,
            },
            LeadStep {
                id: "b".to_string(),
                name: "Wiring".to_string(),
                order: None,
                completed: true,
                due_days: Some(2),
            },
            LeadStep {
                id: "c".to_string(),
                name: "Testing".to_string(),
                order: Some(99),
                completed: true,
                due_days: None,
            },
        ];

        let merged = merge_lead_steps(&backend);
        assert_eq!(merged.len(), 12);

        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].name, "Meeting");
        assert_eq!(merged[0].order, Some(0));
        assert!(merged[0].completed);

        assert_eq!(merged[4].id, "b");
        assert_eq!(merged[4].due_days, Some(2));

        // an ordered step never matches by name
        assert_eq!(merged[7].id, "default-7");
        assert!(!merged[7].completed);
        assert_eq!(merged[11].name, "Certificate");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(0), None)]
    #[case(Some(1), Some("Due Soon"))]
    #[case(Some(2), Some("Attention"))]
    #[case(Some(3), Some("Urgent"))]
    #[case(Some(4), Some("Very Urgent"))]
    #[case(Some(5), Some("CRITICAL"))]
    #[case(Some(40), Some("CRITICAL"))]
    fn test_urgency_tiers(#[case] days: Option<u32>, #[case] label: Option<&str>) {
        assert_eq!(Urgency::from_due_days(days).map(Urgency::label), label);
    }

    #[test]
    fn test_severity_palette_fallback() {
        assert_eq!(severity_palette("critical").text, "#B91C1C");
        assert_eq!(severity_palette(DEFAULT_SEVERITY).text, "#B45309");
        assert_eq!(severity_palette("weird").text, "#374151");
    }

    #[rstest]
    #[case("pending", true, false)]
    #[case("in_progress", true, false)]
    #[case("rejected", true, false)]
    #[case("resolved", false, true)]
    fn test_amc_tabs(#[case] status: &str, #[case] pending: bool, #[case] resolved: bool) {
        assert_eq!(amc_in_tab(status, QueueTab::Pending), pending);
        assert_eq!(amc_in_tab(status, QueueTab::Resolved), resolved);
    }

    #[test]
    fn test_complaint_tabs_exclude_rejected() {
        assert!(complaint_in_tab("in_progress", QueueTab::Pending));
        assert!(!complaint_in_tab("rejected", QueueTab::Pending));
        assert!(!complaint_in_tab("rejected", QueueTab::Resolved));
    }

    #[test]
    fn test_filter_amc_searches_name_type_and_note() {
        let requests: Vec<AmcRequest> = serde_json::from_value(serde_json::json!([
            { "id": "1", "status": "pending", "note": "Inverter beeping",
              "customer": { "id": "c1", "name": "Asha" } },
            { "id": "2", "status": "resolved", "note": "Cleaning",
              "lead": { "fullName": "Vikram", "projectType": "Industrial" } },
            { "id": "3", "status": "rejected", "note": "Panel crack" }
        ]))
        .unwrap();

        let ids = |found: Vec<&AmcRequest>| found.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(filter_amc(&requests, QueueTab::Pending, "")), ["1", "3"]);
        assert_eq!(ids(filter_amc(&requests, QueueTab::Pending, "INVERTER")), ["1"]);
        assert_eq!(ids(filter_amc(&requests, QueueTab::Pending, "crack")), ["3"]);
        assert_eq!(ids(filter_amc(&requests, QueueTab::Pending, "asha")), ["1"]);
        assert_eq!(ids(filter_amc(&requests, QueueTab::Resolved, "industrial")), ["2"]);
    }

    #[test]
    fn test_filter_complaints_matches_type_label() {
        let complaints = vec![Complaint {
            id: "1".to_string(),
            status: "pending".to_string(),
            message: Some("Low output".to_string()),
            ..Complaint::default()
        }];
        assert_eq!(filter_complaints(&complaints, QueueTab::Pending, "general").len(), 1);
        assert_eq!(filter_complaints(&complaints, QueueTab::Pending, "output").len(), 1);
        assert!(filter_complaints(&complaints, QueueTab::Resolved, "").is_empty());
    }

    #[test]
    fn test_filter_staff_customers_referrers_recipients() {
        let staff = vec![
            Staff {
                name: "Ravi".to_string(),
                role: "Electrician".to_string(),
                ..Staff::default()
            },
            Staff {
                name: "Meena".to_string(),
                role: "Surveyor".to_string(),
                ..Staff::default()
            },
        ];
        assert_eq!(filter_staff(&staff, "ELEC").len(), 1);
        assert_eq!(filter_staff(&staff, "").len(), 2);

        let customers = vec![Customer {
            mobile: "9876543210".to_string(),
            referral_code: Some("KLD42".to_string()),
            ..Customer::default()
        }];
        assert_eq!(filter_customers(&customers, "5432").len(), 1);
        assert_eq!(filter_customers(&customers, "kld").len(), 1);
        assert!(filter_customers(&customers, "zz").is_empty());

        let users = vec![ReferralUser {
            phone_number: "9000011111".to_string(),
            referral_code: "ABC1".to_string(),
            ..ReferralUser::default()
        }];
        assert_eq!(filter_referrers(&users, "abc").len(), 1);
        assert_eq!(filter_referrers(&users, "0001").len(), 1);

        let recipients = vec![BroadcastRecipient {
            full_name: "Priya".to_string(),
            phone: "9123".to_string(),
            city: "Indore".to_string(),
            ..BroadcastRecipient::default()
        }];
        assert_eq!(filter_recipients(&recipients, "indore").len(), 1);
        assert_eq!(filter_recipients(&recipients, "912").len(), 1);
        assert!(filter_recipients(&recipients, "delhi").is_empty());
    }

    #[rstest]
    #[case("ravi@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign.com", false)]
    #[case("two@@example.com", false)]
    #[case("spaces in@example.com", false)]
    #[case("nodot@example", false)]
    fn test_is_valid_email(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[test]
    fn test_validate_new_staff() {
        let mut form = NewStaff {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: String::new(),
            password: "secret".to_string(),
        };
        assert!(validate_new_staff(&form).is_ok());

        form.email = "ravi".to_string();
        let err = validate_new_staff(&form).unwrap_err();
        assert_eq!(err.user_message(), "Please enter a valid email address");

        form.password = "  ".to_string();
        assert!(validate_new_staff(&form).is_err());
    }

    #[test]
    fn test_validate_broadcast_and_schedule() {
        assert!(validate_broadcast(&[], "hello").is_err());
        assert!(validate_broadcast(&["c1".to_string()], "   ").is_err());
        assert!(validate_broadcast(&["c1".to_string()], "hello").is_ok());

        assert_eq!(schedule_at("2026-06-01", "09:30").as_deref(), Some("2026-06-01T09:30"));
        assert_eq!(schedule_at("2026-06-01", ""), None);
        assert_eq!(schedule_at("", "09:30"), None);
    }

    proptest! {
        #[test]
        fn prop_group_indian_keeps_digits(value in any::<u64>()) {
            let grouped = group_indian(value);
            prop_assert_eq!(grouped.replace(',', ""), value.to_string());
        }

        #[test]
        fn prop_group_indian_groups_are_two_wide(value in 1_000u64..u64::MAX) {
            let grouped = group_indian(value);
            let groups: Vec<&str> = grouped.split(',').collect();
            prop_assert_eq!(groups.last().map(|g| g.len()), Some(3));
            for group in &groups[1..groups.len() - 1] {
                prop_assert_eq!(group.len(), 2);
            }
        }

        #[test]
        fn prop_completion_rate_is_a_percentage(total in 1u64..100_000, pick in 0u64..100_000) {
            let completed = pick % (total + 1);
            prop_assert!(completion_rate(completed, total) <= 100);
        }
    }
}
