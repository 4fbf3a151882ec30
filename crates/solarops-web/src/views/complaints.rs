//! Complaint queue

use super::{badge, esc, href, load_error, or_dash, queue_tabs, search_form};
use crate::handlers::PageQuery;
use solarops_core::QueueTab;
use solarops_core::types::Complaint;
use solarops_core::utils::{
    DEFAULT_SEVERITY, complaint_in_tab, filter_complaints, format_short_datetime,
    severity_palette,
};

fn card(complaint: &Complaint, tab: QueueTab) -> String {
    let severity = complaint
        .severity
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SEVERITY);
    let palette = severity_palette(severity);
    let mut out = format!(
        r#"<article class="panel complaint" style="border-left:4px solid {border}"><header><strong>{name}</strong> {badge}</header><p class="type">{kind}</p><p>{message}</p><small>{created}</small>"#,
        border = palette.border,
        name = esc(complaint.customer_name()),
        badge = badge(severity, palette.bg, palette.border, palette.text),
        kind = Complaint::TYPE_LABEL,
        message = or_dash(complaint.message.as_deref()),
        created = format_short_datetime(complaint.created_at),
    );
    if tab == QueueTab::Pending {
        out.push_str(&format!(
            r#"<form method="post" action="{}/resolve"><button type="submit">Resolve</button></form>"#,
            href(
                &format!("/complaints/{}", urlencoding::encode(&complaint.id)),
                &[]
            )
        ));
    }
    out.push_str("</article>");
    out
}

/// Page body
#[must_use]
pub fn render(query: &PageQuery, complaints: Option<&[Complaint]>) -> String {
    let Some(complaints) = complaints else {
        return load_error("complaints");
    };
    let tab = query.tab();
    let search = query.search();
    let counts = (
        complaints
            .iter()
            .filter(|c| complaint_in_tab(&c.status, QueueTab::Pending))
            .count(),
        complaints
            .iter()
            .filter(|c| complaint_in_tab(&c.status, QueueTab::Resolved))
            .count(),
    );

    let mut out = queue_tabs("/complaints", tab, counts, search);
    out.push_str(&search_form(
        "/complaints",
        search,
        "Search customer, type or message",
        &[("tab", tab.as_str())],
    ));

    let shown = filter_complaints(complaints, tab, search);
    if shown.is_empty() {
        out.push_str(r#"<p class="empty">No complaints</p>"#);
    }
    for complaint in shown {
        out.push_str(&card(complaint, tab));
    }
    out
}
