//! Booking list and booking detail

use super::{badge, esc, href, load_error, options, or_dash, timeframe_tabs};
use crate::handlers::PageQuery;
use chrono::{DateTime, Utc};
use solarops_core::types::{Lead, LeadStep, Staff, UNKNOWN};
use solarops_core::utils::{
    Urgency, cities_in_state, distinct_states, filter_leads, format_date, format_indian,
    format_inr, format_inr_or_zero, merge_lead_steps,
};

fn location_filter(query: &PageQuery, leads: &[Lead]) -> String {
    let state = query.state.trim();
    let cities = if state.is_empty() {
        Vec::new()
    } else {
        cities_in_state(leads, state)
    };
    format!(
        r#"<form class="filters" method="get" action="/leads"><input type="hidden" name="timeframe" value="{}"><select name="state">{}</select><select name="city"{}>{}</select><button type="submit">Apply</button></form>"#,
        query.timeframe().as_str(),
        options(&distinct_states(leads), state, "All States"),
        if state.is_empty() { " disabled" } else { "" },
        options(&cities, query.city.trim(), "All Cities"),
    )
}

fn status_badge(status: Option<&str>) -> String {
    let status = status.filter(|s| !s.is_empty()).unwrap_or("pending");
    let (bg, fg) = match status {
        "completed" => ("#ECFDF5", "#065F46"),
        "in_progress" => ("#EFF6FF", "#1D4ED8"),
        "cancelled" => ("#FEF2F2", "#B91C1C"),
        _ => ("#FFFBEB", "#B45309"),
    };
    badge(&status.replace('_', " "), bg, fg, fg)
}

/// Booking table
#[must_use]
pub fn list(query: &PageQuery, leads: Option<&[Lead]>, now: DateTime<Utc>) -> String {
    let timeframe = query.timeframe();
    let state = query.state.trim();
    // a city only narrows an active state
    let city = if state.is_empty() { "" } else { query.city.trim() };

    let mut out = timeframe_tabs("/leads", timeframe, &[("state", state), ("city", city)]);
    let Some(leads) = leads else {
        out.push_str(&load_error("bookings"));
        return out;
    };
    out.push_str(&location_filter(query, leads));

    let shown = filter_leads(leads, timeframe, state, city, now);
    out.push_str(&format!(
        r#"<p class="count">Showing {} of {} bookings</p>"#,
        shown.len(),
        leads.len()
    ));
    if shown.is_empty() {
        out.push_str(r#"<p class="empty">No bookings match these filters</p>"#);
        return out;
    }

    out.push_str("<table><thead><tr><th>Booking</th><th>Customer</th><th>Phone</th><th>Project</th><th>Size</th><th>Total</th><th>Created</th><th>Status</th><th>Staff</th></tr></thead><tbody>");
    for lead in shown {
        out.push_str(&format!(
            r#"<tr><td><a href="{link}">{code}</a></td><td>{name}</td><td>{phone}</td><td>{project}</td><td>{size}</td><td>{total}</td><td>{created}</td><td>{status}</td><td>{staff}</td></tr>"#,
            link = href(&format!("/leads/{}", urlencoding::encode(&lead.id)), &[]),
            code = esc(lead.booking_code.as_deref().unwrap_or(&lead.id)),
            name = esc(lead.customer_name().unwrap_or(UNKNOWN)),
            phone = or_dash(lead.contact_phone()),
            project = or_dash(lead.project_type.as_deref()),
            size = lead
                .sized_kw
                .map_or_else(|| "-".to_string(), |kw| format!("{} kW", format_indian(kw))),
            total = format_inr(lead.total_with_gst()),
            created = format_date(lead.created_at),
            status = status_badge(lead.status.as_deref()),
            staff = lead
                .assigned_staff
                .as_ref()
                .map_or_else(|| "Unassigned".to_string(), |s| esc(&s.name)),
        ));
    }
    out.push_str("</tbody></table>");
    out
}

fn receipt_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("<tr><th>{label}</th><td>{value}</td></tr>"));
}

fn receipt(lead: &Lead) -> String {
    let mut out = String::from(r#"<section class="panel receipt"><h2>Receipt</h2><table>"#);
    receipt_row(&mut out, "Booking Code", &or_dash(lead.booking_code.as_deref()));
    receipt_row(&mut out, "Date", &format_date(lead.created_at));
    receipt_row(&mut out, "Customer", &esc(lead.customer_name().unwrap_or(UNKNOWN)));
    receipt_row(&mut out, "Phone", &or_dash(lead.contact_phone()));
    receipt_row(&mut out, "Email", &or_dash(lead.contact_email()));
    receipt_row(&mut out, "Address", &or_dash(Some(lead.full_address().as_str())));
    receipt_row(&mut out, "Project Type", &or_dash(lead.project_type.as_deref()));
    receipt_row(
        &mut out,
        "System Size",
        &lead
            .sized_kw
            .map_or_else(|| "-".to_string(), |kw| format!("{} kW", format_indian(kw))),
    );
    receipt_row(&mut out, "Provider", &or_dash(lead.provider.as_deref()));
    receipt_row(&mut out, "Rate per kW", &format_inr_or_zero(lead.rate_per_kw));
    receipt_row(&mut out, "Monthly Bill", &format_inr_or_zero(lead.monthly_bill));
    receipt_row(
        &mut out,
        "Subsidy",
        if lead.with_subsidy { "Yes" } else { "No" },
    );
    receipt_row(&mut out, "Total Investment", &format_inr_or_zero(lead.total_investment));
    receipt_row(
        &mut out,
        &format!("GST ({}%)", format_indian(lead.gst_pct.unwrap_or(0.0))),
        &format_inr_or_zero(lead.gst_amount),
    );
    receipt_row(
        &mut out,
        "Total",
        &format!("<strong>{}</strong>", format_inr(lead.total_with_gst())),
    );
    out.push_str("</table></section>");
    out
}

fn step_card(step: &LeadStep) -> String {
    let number = step.order.unwrap_or(0) + 1;
    if step.completed {
        return format!(
            r#"<li class="step done"><span class="num">{number}</span> {} <span class="check">&#10003;</span></li>"#,
            esc(&step.name)
        );
    }
    match Urgency::from_due_days(step.due_days) {
        Some(urgency) => {
            let palette = urgency.palette();
            format!(
                r#"<li class="step overdue" style="background:{bg};border-left:4px solid {border}"><span class="num">{number}</span> {name} {badge}</li>"#,
                bg = palette.bg,
                border = palette.border,
                name = esc(&step.name),
                badge = badge(urgency.label(), palette.bg, palette.border, palette.text),
            )
        }
        None => format!(
            r#"<li class="step"><span class="num">{number}</span> {}</li>"#,
            esc(&step.name)
        ),
    }
}

fn steps(lead: &Lead) -> String {
    let merged = merge_lead_steps(&lead.steps);
    let done = merged.iter().filter(|s| s.completed).count();
    let mut out = format!(
        r#"<section class="panel"><h2>Progress</h2><p>{done} of {} steps completed</p><ol class="steps">"#,
        merged.len()
    );
    for step in &merged {
        out.push_str(&step_card(step));
    }
    out.push_str("</ol></section>");
    out
}

fn assignment(lead: &Lead, staff: Option<&[Staff]>) -> String {
    let action = href(&format!("/leads/{}", urlencoding::encode(&lead.id)), &[]);
    let mut out = String::from(r#"<section class="panel"><h2>Assigned Staff</h2>"#);
    if let Some(ref assigned) = lead.assigned_staff {
        out.push_str(&format!(
            r#"<p><strong>{}</strong> {}</p><form method="post" action="{action}/unassign"><button type="submit">Unassign</button></form>"#,
            esc(&assigned.name),
            or_dash(assigned.email.as_deref()),
        ));
    } else {
        out.push_str("<p>Not assigned</p>");
    }

    match staff {
        Some(staff) => {
            out.push_str(&format!(
                r#"<form method="post" action="{action}/assign"><select name="staff_id"><option value="">Select staff</option>"#
            ));
            for member in staff {
                let mark = if lead.is_assigned_to(&member.id) { " selected" } else { "" };
                out.push_str(&format!(
                    r#"<option value="{}"{mark}>{} ({})</option>"#,
                    esc(&member.id),
                    esc(&member.name),
                    esc(&member.role)
                ));
            }
            out.push_str(r#"</select><button type="submit">Assign</button></form>"#);
        }
        None => out.push_str(&load_error("staff")),
    }
    out.push_str("</section>");
    out
}

fn related(lead: &Lead) -> String {
    let mut out = String::from(r#"<section class="panel"><h2>Complaints</h2>"#);
    if lead.complaints.is_empty() {
        out.push_str("<p>No complaints</p>");
    } else {
        out.push_str("<ul>");
        for complaint in &lead.complaints {
            out.push_str(&format!(
                "<li>{} <em>{}</em></li>",
                or_dash(complaint.message.as_deref()),
                or_dash(complaint.status.as_deref())
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str(r#"</section><section class="panel"><h2>AMC Requests</h2>"#);
    if lead.amc_requests.is_empty() {
        out.push_str("<p>No AMC requests</p>");
    } else {
        out.push_str("<ul>");
        for request in &lead.amc_requests {
            out.push_str(&format!(
                "<li>{} <em>{}</em></li>",
                or_dash(request.note.as_deref()),
                or_dash(request.status.as_deref())
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str("</section>");
    out
}

/// Booking detail: receipt, steps, assignment and related records
#[must_use]
pub fn detail(lead: &Lead, staff: Option<&[Staff]>) -> String {
    format!(
        r#"<p><a href="/leads">&larr; All bookings</a></p><div class="detail">{}{}{}{}</div>"#,
        receipt(lead),
        steps(lead),
        assignment(lead, staff),
        related(lead)
    )
}

/// Placeholder for an unknown booking id
#[must_use]
pub fn not_found(id: &str) -> String {
    format!(
        r#"<p><a href="/leads">&larr; All bookings</a></p><div class="load-error">Booking {} not found</div>"#,
        esc(id)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use solarops_core::types::StaffRef;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap()
    }

    fn lead(id: &str, state: &str, city: &str, month: u32) -> Lead {
        Lead {
            id: id.to_string(),
            booking_code: Some(format!("KS-{id}")),
            full_name: Some(format!("Customer {id}")),
            state: Some(state.to_string()),
            city: Some(city.to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2026, month, 2, 9, 0, 0).unwrap()),
            ..Lead::default()
        }
    }

    #[test]
    fn test_list_applies_timeframe_and_location() {
        let leads = vec![
            lead("1", "Kerala", "Kochi", 5),
            lead("2", "Kerala", "Thrissur", 5),
            lead("3", "Tamil Nadu", "Chennai", 1),
        ];
        let query = PageQuery {
            timeframe: "month".to_string(),
            state: "Kerala".to_string(),
            city: "Kochi".to_string(),
            ..PageQuery::default()
        };
        let html = list(&query, Some(&leads), now());
        assert!(html.contains("Showing 1 of 3 bookings"));
        assert!(html.contains("KS-1"));
        assert!(!html.contains("KS-2"));
        assert!(!html.contains("KS-3"));
    }

    #[test]
    fn test_city_ignored_without_state() {
        let leads = vec![lead("1", "Kerala", "Kochi", 5), lead("2", "Goa", "Panaji", 5)];
        let query = PageQuery {
            city: "Kochi".to_string(),
            ..PageQuery::default()
        };
        assert!(list(&query, Some(&leads), now()).contains("Showing 2 of 2 bookings"));
    }

    #[test]
    fn test_list_load_failure() {
        let html = list(&PageQuery::default(), None, now());
        assert!(html.contains("Failed to load bookings"));
    }

    #[test]
    fn test_detail_receipt_total_includes_gst() {
        let lead = Lead {
            id: "L-1".to_string(),
            total_investment: Some(250_000.0),
            gst_pct: Some(9.0),
            gst_amount: Some(22_500.0),
            ..Lead::default()
        };
        let html = detail(&lead, Some(&[]));
        assert!(html.contains("<strong>₹2,72,500</strong>"));
        assert!(html.contains("GST (9%)"));
        assert!(html.contains("0 of 12 steps completed"));
        assert!(html.contains("Not assigned"));
    }

    #[test]
    fn test_detail_steps_show_urgency_and_assignment() {
        let lead = Lead {
            id: "L-1".to_string(),
            steps: vec![
                LeadStep {
                    id: "s1".to_string(),
                    name: "Meeting".to_string(),
                    order: Some(1),
                    completed: true,
                    due_days: None,
                },
                LeadStep {
                    id: "s2".to_string(),
                    name: "Survey".to_string(),
                    order: Some(2),
                    completed: false,
                    due_days: Some(9),
                },
            ],
            assigned_staff: Some(StaffRef {
                id: "S-1".to_string(),
                name: "Ravi".to_string(),
                email: None,
            }),
            ..Lead::default()
        };
        let staff = vec![Staff {
            id: "S-1".to_string(),
            name: "Ravi".to_string(),
            role: "Installer".to_string(),
            ..Staff::default()
        }];
        let html = detail(&lead, Some(&staff));
        assert!(html.contains("1 of 12 steps completed"));
        assert!(html.contains("CRITICAL"));
        assert!(html.contains(r#"action="/leads/L-1/unassign""#));
        assert!(html.contains(r#"<option value="S-1" selected>Ravi (Installer)</option>"#));
    }

    #[test]
    fn test_not_found_escapes_id() {
        assert!(not_found("<x>").contains("Booking &lt;x&gt; not found"));
    }
}
