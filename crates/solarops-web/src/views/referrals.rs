//! Referral network: commission levels, growth and the 5-tier downline

use super::{esc, href, load_error, search_form, stat_card};
use crate::handlers::PageQuery;
use solarops_charts::bars::{self, PairedValue};
use solarops_charts::svg;
use solarops_core::types::{
    REFERRAL_TIERS, ReferralOverview, ReferralSettings, ReferralUser, ReferralUserDetails,
};
use solarops_core::utils::{filter_referrers, format_indian, format_inr_or_zero, group_indian};

fn levels(settings: &ReferralSettings) -> String {
    let mut out = String::from(r#"<section class="panel"><h2>Commission Levels</h2><ul class="levels">"#);
    for tier in 0..REFERRAL_TIERS {
        out.push_str(&format!(
            "<li>Level {}: <strong>{}%</strong></li>",
            tier + 1,
            format_indian(settings.level_percent(tier))
        ));
    }
    out.push_str(&format!(
        "</ul><p>Max payout: <strong>{}%</strong></p></section>",
        format_indian(settings.max_payout_percent)
    ));
    out
}

fn growth(overview: &ReferralOverview) -> String {
    let rows: Vec<PairedValue> = overview
        .network_growth
        .iter()
        .map(|g| PairedValue::new(g.month.clone(), g.direct, g.indirect))
        .collect();
    format!(
        r#"<section class="panel"><h2>Network Growth</h2>{}<p class="legend">Direct / Indirect</p></section>"#,
        svg::growth_chart(&bars::growth_bars(&rows))
    )
}

fn referrer_table(users: &[&ReferralUser], search: &str, selected: Option<&str>) -> String {
    if users.is_empty() {
        return r#"<p class="empty">No referrers found</p>"#.to_string();
    }
    let mut out = String::from("<table><thead><tr><th>Phone</th><th>Code</th><th>Referrals</th><th>Earnings</th></tr></thead><tbody>");
    for user in users {
        let class = if selected == Some(user.id.as_str()) { r#" class="selected""# } else { "" };
        out.push_str(&format!(
            r#"<tr{class}><td><a href="{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            href("/referrals", &[("q", search), ("selected", &user.id)]),
            esc(&user.phone_number),
            esc(&user.referral_code),
            group_indian(user.total_referrals),
            format_inr_or_zero(user.earnings),
        ));
    }
    out.push_str("</tbody></table>");
    out
}

fn user_panel(user: Option<&ReferralUser>, details: Option<&ReferralUserDetails>) -> String {
    let mut out = String::from(r#"<section class="panel referral-user">"#);
    if let Some(user) = user {
        out.push_str(&format!(
            "<h2>{}</h2><p>Code: {} &middot; Upline: {}</p><div class=\"tiers\">",
            esc(&user.phone_number),
            esc(&user.referral_code),
            user.upline
                .as_ref()
                .map_or_else(|| "None".to_string(), |u| esc(&u.phone_number)),
        ));
        for (tier, count) in user.downline.tiers().iter().enumerate() {
            out.push_str(&format!(
                r#"<div class="tier"><span>A{}</span><strong>{}</strong></div>"#,
                tier + 1,
                group_indian(*count)
            ));
        }
        out.push_str("</div>");
    }

    match details {
        Some(details) => {
            out.push_str(r#"<div class="downline">"#);
            for (tier, members) in details.downline.tiers().iter().enumerate() {
                out.push_str(&format!(r#"<div class="column"><h3>A{}</h3>"#, tier + 1));
                if members.is_empty() {
                    out.push_str(r#"<p class="empty">No members yet</p>"#);
                } else {
                    out.push_str("<ul>");
                    for member in *members {
                        out.push_str(&format!(
                            "<li>{} <small>{}</small></li>",
                            esc(&member.phone_number),
                            esc(&member.joined_at)
                        ));
                    }
                    out.push_str("</ul>");
                }
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
        None => out.push_str(&load_error("referral details")),
    }
    out.push_str("</section>");
    out
}

/// Page body
///
/// `failed` marks an overview that could not be fetched; `overview` is then
/// the empty default and still renders.
#[must_use]
pub fn render(
    query: &PageQuery,
    overview: &ReferralOverview,
    failed: bool,
    selected: Option<&str>,
    details: Option<&ReferralUserDetails>,
) -> String {
    let search = query.search();
    let mut out = if failed {
        load_error("referral overview")
    } else {
        String::new()
    };

    out.push_str(&format!(
        r#"<section class="cards">{}{}{}</section>"#,
        stat_card("Total Network", &group_indian(overview.total_network)),
        stat_card("Active Users", &group_indian(overview.active_users)),
        stat_card("Total Earnings", &format_inr_or_zero(overview.total_earnings)),
    ));
    out.push_str(&levels(&overview.settings));
    out.push_str(&growth(overview));

    out.push_str(r#"<section class="panel"><h2>Top Referrers</h2>"#);
    out.push_str(&search_form(
        "/referrals",
        search,
        "Search phone or referral code",
        &[],
    ));
    let shown = filter_referrers(&overview.top_referrers, search);
    out.push_str(&referrer_table(&shown, search, selected));
    out.push_str("</section>");

    if let Some(id) = selected {
        let user = overview.top_referrers.iter().find(|u| u.id == id);
        out.push_str(&user_panel(user, details));
    }
    out
}
