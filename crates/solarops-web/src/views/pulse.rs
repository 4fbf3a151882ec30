//! Broadcast composer

use super::{esc, load_error, search_form};
use crate::handlers::PageQuery;
use solarops_core::types::BroadcastRecipient;
use solarops_core::utils::filter_recipients;

/// Page body
#[must_use]
pub fn render(query: &PageQuery, recipients: Option<&[BroadcastRecipient]>) -> String {
    let search = query.search();
    let mut out = search_form("/pulse", search, "Search name, phone or city", &[]);
    let Some(recipients) = recipients else {
        out.push_str(&load_error("customers"));
        return out;
    };

    let shown = filter_recipients(recipients, search);
    out.push_str(&format!(
        r#"<form class="panel broadcast" method="post" action="/pulse/send"><h2>Recipients ({} of {})</h2>"#,
        shown.len(),
        recipients.len()
    ));
    if shown.is_empty() {
        out.push_str(r#"<p class="empty">No customers found</p>"#);
    } else {
        out.push_str(r#"<ul class="recipients">"#);
        for recipient in shown {
            out.push_str(&format!(
                r#"<li><label><input type="checkbox" name="recipients" value="{id}"> <strong>{name}</strong> {phone} <small>{city}</small></label></li>"#,
                id = esc(&recipient.id),
                name = esc(&recipient.full_name),
                phone = esc(&recipient.phone),
                city = esc(&recipient.city),
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str(r#"<textarea name="message" rows="4" placeholder="Type your message"></textarea><fieldset><legend>Schedule (optional)</legend><input type="date" name="date"><input type="time" name="time"></fieldset><button type="submit">Send Broadcast</button></form>"#);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn recipient(id: &str, name: &str, phone: &str, city: &str) -> BroadcastRecipient {
        BroadcastRecipient {
            id: id.to_string(),
            full_name: name.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            state: String::new(),
        }
    }

    #[test]
    fn test_search_by_city() {
        let recipients = vec![
            recipient("C-1", "Asha", "9876543210", "Kochi"),
            recipient("C-2", "Customer 9123456780", "9123456780", "Unknown"),
        ];
        let query = PageQuery {
            q: "kochi".to_string(),
            ..PageQuery::default()
        };
        let html = render(&query, Some(&recipients));
        assert!(html.contains("Recipients (1 of 2)"));
        assert!(html.contains(r#"name="recipients" value="C-1""#));
        assert!(!html.contains("C-2"));
    }

    #[test]
    fn test_load_failure() {
        assert!(render(&PageQuery::default(), None).contains("Failed to load customers"));
    }
}
