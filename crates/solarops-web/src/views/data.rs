//! Customer records

use super::{esc, href, load_error, or_dash, search_form};
use crate::handlers::PageQuery;
use solarops_core::types::Customer;
use solarops_core::utils::{filter_customers, format_date, format_indian, format_inr_or_zero};

fn detail(customer: &Customer) -> String {
    let mut out = format!(
        r#"<section class="panel customer-detail"><h2>{mobile}</h2><table><tr><th>Name</th><td>{name}</td></tr><tr><th>Referral Code</th><td>{code}</td></tr><tr><th>Level</th><td>{level}</td></tr><tr><th>Location</th><td>{city}, {state}</td></tr><tr><th>Joined</th><td>{joined}</td></tr><tr><th>Referred By</th><td>{referrer}</td></tr><tr><th>Downline</th><td>{downline}</td></tr><tr><th>Wallet Balance</th><td>{wallet}</td></tr></table>"#,
        mobile = esc(&customer.mobile),
        name = or_dash(customer.name.as_deref()),
        code = or_dash(customer.referral_code.as_deref()),
        level = customer.level,
        city = or_dash(customer.city.as_deref()),
        state = or_dash(customer.state.as_deref()),
        joined = format_date(customer.created_at),
        referrer = or_dash(
            customer
                .referred_by_customer
                .as_ref()
                .map(|r| r.mobile.as_str())
        ),
        downline = customer.downlines.len(),
        wallet = format_inr_or_zero(customer.wallet.as_ref().and_then(|w| w.balance)),
    );

    out.push_str(&format!("<h3>Bookings ({})</h3>", customer.leads.len()));
    if customer.leads.is_empty() {
        out.push_str("<p>No bookings</p>");
    } else {
        out.push_str("<table><thead><tr><th>Project</th><th>Progress</th><th>Created</th></tr></thead><tbody>");
        for lead in &customer.leads {
            out.push_str(&format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}%</td><td>{}</td></tr>"#,
                href(&format!("/leads/{}", urlencoding::encode(&lead.id)), &[]),
                or_dash(lead.project_type.as_deref()),
                format_indian(lead.percent.unwrap_or(0.0)),
                format_date(lead.created_at),
            ));
        }
        out.push_str("</tbody></table>");
    }
    out.push_str("</section>");
    out
}

/// Page body
#[must_use]
pub fn render(query: &PageQuery, customers: Option<&[Customer]>) -> String {
    let search = query.search();
    let mut out = search_form("/data", search, "Search by mobile or referral code", &[]);
    let Some(customers) = customers else {
        out.push_str(&load_error("customers"));
        return out;
    };

    let shown = filter_customers(customers, search);
    out.push_str(&format!(
        r#"<p class="count">{} of {} customers</p>"#,
        shown.len(),
        customers.len()
    ));
    if !shown.is_empty() {
        out.push_str("<table><thead><tr><th>Mobile</th><th>Name</th><th>Referral Code</th><th>Level</th><th>City</th><th>Joined</th></tr></thead><tbody>");
        for customer in &shown {
            out.push_str(&format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                href("/data", &[("q", search), ("selected", &customer.id)]),
                esc(&customer.mobile),
                or_dash(customer.name.as_deref()),
                or_dash(customer.referral_code.as_deref()),
                customer.level,
                or_dash(customer.city.as_deref()),
                format_date(customer.created_at),
            ));
        }
        out.push_str("</tbody></table>");
    }

    if let Some(customer) = query
        .selected()
        .and_then(|id| customers.iter().find(|c| c.id == id))
    {
        out.push_str(&detail(customer));
    }
    out
}
