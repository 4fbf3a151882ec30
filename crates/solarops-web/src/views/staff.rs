//! Staff directory

use super::{esc, href, load_error, or_dash, search_form};
use crate::handlers::PageQuery;
use solarops_core::types::{AmcRequest, Lead, Staff, UNKNOWN};
use solarops_core::utils::{filter_staff, format_indian};

const ADD_FORM: &str = r#"<section class="panel"><h2>Add Staff</h2><form method="post" action="/staff"><input name="name" placeholder="Name *" required><input name="email" type="email" placeholder="Email *" required><input name="phone" placeholder="Phone"><input name="password" type="password" placeholder="Password *" required><button type="submit">Add Staff</button></form></section>"#;

fn detail(member: &Staff, leads: &[Lead], amc: &[AmcRequest]) -> String {
    let mut out = format!(
        r#"<section class="panel staff-detail"><h2>{name}</h2><p>{role} &middot; {status}</p><table><tr><th>Phone</th><td>{phone}</td></tr><tr><th>Email</th><td>{email}</td></tr><tr><th>Joined</th><td>{joined}</td></tr><tr><th>Address</th><td>{address}</td></tr><tr><th>Emergency Contact</th><td>{emergency}</td></tr></table>"#,
        name = esc(&member.name),
        role = esc(&member.role),
        status = or_dash(member.status.as_deref()),
        phone = or_dash(member.phone.as_deref()),
        email = or_dash(member.email.as_deref()),
        joined = or_dash(member.joined_date.as_deref()),
        address = or_dash(member.address.as_deref()),
        emergency = or_dash(member.emergency_contact.as_deref()),
    );

    let assigned: Vec<&Lead> = leads.iter().filter(|l| l.is_assigned_to(&member.id)).collect();
    out.push_str(&format!("<h3>Assigned Bookings ({})</h3>", assigned.len()));
    if assigned.is_empty() {
        out.push_str("<p>No bookings assigned</p>");
    } else {
        out.push_str("<ul>");
        for lead in assigned {
            out.push_str(&format!(
                r#"<li><a href="{}">{}</a> {} <em>{}</em></li>"#,
                href(&format!("/leads/{}", urlencoding::encode(&lead.id)), &[]),
                esc(lead.booking_code.as_deref().unwrap_or(&lead.id)),
                esc(lead.customer_name().unwrap_or(UNKNOWN)),
                or_dash(lead.status.as_deref()),
            ));
        }
        out.push_str("</ul>");
    }

    let requests: Vec<&AmcRequest> = amc.iter().filter(|r| r.is_assigned_to(&member.id)).collect();
    out.push_str(&format!("<h3>Assigned AMC Requests ({})</h3>", requests.len()));
    if requests.is_empty() {
        out.push_str("<p>No AMC requests assigned</p>");
    } else {
        out.push_str("<ul>");
        for request in requests {
            out.push_str(&format!(
                "<li>{} &middot; {} <em>{}</em></li>",
                esc(request.customer_name()),
                esc(request.project_type()),
                esc(&request.status),
            ));
        }
        out.push_str("</ul>");
    }

    out.push_str(&format!(
        r#"<form method="post" action="{}/delete" onsubmit="return confirm('Delete this staff member?')"><button type="submit" class="danger">Delete Staff</button></form></section>"#,
        href(&format!("/staff/{}", urlencoding::encode(&member.id)), &[]),
    ));
    out
}

/// Page body
#[must_use]
pub fn render(
    query: &PageQuery,
    staff: Option<&[Staff]>,
    leads: &[Lead],
    amc: &[AmcRequest],
) -> String {
    let search = query.search();
    let mut out = search_form("/staff", search, "Search by name or role", &[]);

    let Some(staff) = staff else {
        out.push_str(&load_error("staff"));
        out.push_str(ADD_FORM);
        return out;
    };

    let shown = filter_staff(staff, search);
    if shown.is_empty() {
        out.push_str(r#"<p class="empty">No staff found</p>"#);
    } else {
        out.push_str("<table><thead><tr><th>Name</th><th>Role</th><th>Status</th><th>Rating</th><th>Phone</th></tr></thead><tbody>");
        for member in &shown {
            out.push_str(&format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                href("/staff", &[("q", search), ("selected", &member.id)]),
                esc(&member.name),
                esc(&member.role),
                or_dash(member.status.as_deref()),
                member
                    .rating
                    .map_or_else(|| "-".to_string(), format_indian),
                or_dash(member.phone.as_deref()),
            ));
        }
        out.push_str("</tbody></table>");
    }

    if let Some(member) = query
        .selected()
        .and_then(|id| staff.iter().find(|s| s.id == id))
    {
        out.push_str(&detail(member, leads, amc));
    }
    out.push_str(ADD_FORM);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use solarops_core::types::StaffRef;

    fn member(id: &str, name: &str, role: &str) -> Staff {
        Staff {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            ..Staff::default()
        }
    }

    #[test]
    fn test_search_by_role() {
        let staff = vec![
            member("S-1", "Ravi", "Installer"),
            member("S-2", "Meena", "Surveyor"),
        ];
        let query = PageQuery {
            q: "install".to_string(),
            ..PageQuery::default()
        };
        let html = render(&query, Some(&staff), &[], &[]);
        assert!(html.contains("Ravi"));
        assert!(!html.contains("Meena"));
    }

    #[test]
    fn test_selected_member_lists_assigned_work() {
        let staff = vec![member("S-1", "Ravi", "Installer")];
        let assigned = Some(StaffRef {
            id: "S-1".to_string(),
            name: "Ravi".to_string(),
            email: None,
        });
        let leads = vec![
            Lead {
                id: "L-1".to_string(),
                booking_code: Some("KS-0001".to_string()),
                assigned_staff: assigned.clone(),
                ..Lead::default()
            },
            Lead {
                id: "L-2".to_string(),
                booking_code: Some("KS-0002".to_string()),
                ..Lead::default()
            },
        ];
        let amc = vec![AmcRequest {
            id: "A-1".to_string(),
            status: "pending".to_string(),
            assigned_staff: assigned,
            ..AmcRequest::default()
        }];
        let query = PageQuery {
            selected: "S-1".to_string(),
            ..PageQuery::default()
        };
        let html = render(&query, Some(&staff), &leads, &amc);
        assert!(html.contains("Assigned Bookings (1)"));
        assert!(html.contains("KS-0001"));
        assert!(!html.contains("KS-0002"));
        assert!(html.contains("Assigned AMC Requests (1)"));
        assert!(html.contains(r#"action="/staff/S-1/delete""#));
    }

    #[test]
    fn test_failed_load_keeps_add_form() {
        let html = render(&PageQuery::default(), None, &[], &[]);
        assert!(html.contains("Failed to load staff"));
        assert!(html.contains(r#"action="/staff""#));
    }
}
