//! AMC request queue

use super::{esc, href, load_error, or_dash, queue_tabs, search_form};
use crate::handlers::PageQuery;
use solarops_core::QueueTab;
use solarops_core::types::{AmcRequest, Staff};
use solarops_core::utils::{amc_in_tab, filter_amc, format_short_datetime};

fn assign_form(request: &AmcRequest, staff: &[Staff]) -> String {
    let mut out = format!(
        r#"<form method="post" action="{}/assign"><select name="staff_id"><option value="">Assign staff</option>"#,
        href(&format!("/amc/{}", urlencoding::encode(&request.id)), &[])
    );
    for member in staff {
        let mark = if request.is_assigned_to(&member.id) { " selected" } else { "" };
        out.push_str(&format!(
            r#"<option value="{}"{mark}>{}</option>"#,
            esc(&member.id),
            esc(&member.name)
        ));
    }
    out.push_str(r#"</select><button type="submit">Assign</button></form>"#);
    out
}

fn card(request: &AmcRequest, tab: QueueTab, staff: &[Staff]) -> String {
    let mut out = format!(
        r#"<article class="panel amc"><header><strong>{name}</strong> <span class="badge">{status}</span></header><p>{project}</p><p>{note}</p><small>Requested {created}</small>"#,
        name = esc(request.customer_name()),
        status = esc(&request.status.replace('_', " ")),
        project = esc(request.project_type()),
        note = or_dash(request.note.as_deref()),
        created = format_short_datetime(request.created_at),
    );
    out.push_str(&format!(
        "<p>Assigned to: {}</p>",
        request
            .assigned_staff
            .as_ref()
            .map_or_else(|| "Unassigned".to_string(), |s| esc(&s.name))
    ));
    match tab {
        QueueTab::Pending => {
            out.push_str(&assign_form(request, staff));
            out.push_str(&format!(
                r#"<form method="post" action="{}/complete"><button type="submit">Mark Complete</button></form>"#,
                href(&format!("/amc/{}", urlencoding::encode(&request.id)), &[])
            ));
        }
        QueueTab::Resolved => {
            out.push_str(&format!(
                "<small>Resolved {}</small>",
                format_short_datetime(request.resolved_at)
            ));
        }
    }
    out.push_str("</article>");
    out
}

/// Page body
#[must_use]
pub fn render(query: &PageQuery, requests: Option<&[AmcRequest]>, staff: &[Staff]) -> String {
    let Some(requests) = requests else {
        return load_error("AMC requests");
    };
    let tab = query.tab();
    let search = query.search();
    let counts = (
        requests.iter().filter(|r| amc_in_tab(&r.status, QueueTab::Pending)).count(),
        requests.iter().filter(|r| amc_in_tab(&r.status, QueueTab::Resolved)).count(),
    );

    let mut out = queue_tabs("/amc", tab, counts, search);
    out.push_str(&search_form(
        "/amc",
        search,
        "Search customer, project or note",
        &[("tab", tab.as_str())],
    ));

    let shown = filter_amc(requests, tab, search);
    if shown.is_empty() {
        out.push_str(r#"<p class="empty">No AMC requests</p>"#);
    }
    for request in shown {
        out.push_str(&card(request, tab, staff));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use solarops_core::types::CustomerRef;

    fn request(id: &str, status: &str, name: &str) -> AmcRequest {
        AmcRequest {
            id: id.to_string(),
            status: status.to_string(),
            customer: Some(CustomerRef {
                name: Some(name.to_string()),
                ..CustomerRef::default()
            }),
            ..AmcRequest::default()
        }
    }

    fn requests() -> Vec<AmcRequest> {
        vec![
            request("A-1", "pending", "Asha"),
            request("A-2", "in_progress", "Bala"),
            request("A-3", "rejected", "Chitra"),
            request("A-4", "resolved", "Devi"),
        ]
    }

    #[test]
    fn test_pending_tab_counts_and_actions() {
        let staff = vec![Staff {
            id: "S-1".to_string(),
            name: "Ravi".to_string(),
            ..Staff::default()
        }];
        let html = render(&PageQuery::default(), Some(&requests()), &staff);
        assert!(html.contains("Pending (3)"));
        assert!(html.contains("Resolved (1)"));
        assert!(html.contains("Chitra"));
        assert!(!html.contains("Devi"));
        assert!(html.contains(r#"action="/amc/A-1/assign""#));
        assert!(html.contains(r#"action="/amc/A-1/complete""#));
    }

    #[test]
    fn test_resolved_tab_has_no_actions() {
        let query = PageQuery {
            tab: "resolved".to_string(),
            ..PageQuery::default()
        };
        let html = render(&query, Some(&requests()), &[]);
        assert!(html.contains("Devi"));
        assert!(!html.contains("Asha"));
        assert!(!html.contains("/complete"));
    }

    #[test]
    fn test_search_by_customer() {
        let query = PageQuery {
            q: "bal".to_string(),
            ..PageQuery::default()
        };
        let html = render(&query, Some(&requests()), &[]);
        assert!(html.contains("Bala"));
        assert!(!html.contains("Asha"));
    }
}
