//! End-to-end tests for the dashboard router against a mock backend

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::json;
use solarops_core::Config;
use solarops_web::build_app;
use tower::ServiceExt;
use wiremock::matchers::{
    body_json, header as header_matcher, method, path, path_regex, query_param,
    query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer) -> Router {
    let mut config = Config::default();
    config.backend.base_url = server.uri();
    config.backend.token = Some("admin-token".to_string());
    build_app(config).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    (status, location)
}

async fn mount_notifications(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/admin/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "New booking", "message": "KS-0042", "unread": true }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_and_root_redirect() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let (status, body) = get(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = MockServer::start().await;
    let (status, _) = get(app_for(&server), "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_sections_fail_independently() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/stats"))
        .and(header_matcher("Authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalBookings": 4,
            "completedBookings": 1,
            "pendingAMC": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let (status, body) = get(app_for(&server), "/dashboard?timeframe=month").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">25%<"));
    assert!(body.contains("Failed to load analytics"));
    assert!(body.contains("Failed to load project stages"));
    assert!(body.contains(r#"data-unread="1""#));
}

#[tokio::test]
async fn test_leads_page_treats_non_array_as_empty() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let (status, body) = get(app_for(&server), "/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 0 of 0 bookings"));
}

#[tokio::test]
async fn test_missing_lead_renders_not_found_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/leads/L-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Lead not found" })))
        .mount(&server)
        .await;

    let (status, body) = get(app_for(&server), "/leads/L-404").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Booking L-404 not found"));
    assert!(body.contains("Failed to load notifications"));
}

#[tokio::test]
async fn test_flash_from_query_is_rendered() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;

    let (_, body) = get(app_for(&server), "/complaints?error=Already%20resolved").await;
    assert!(body.contains(r#"<div class="flash error" role="status">Already resolved</div>"#));
}

#[tokio::test]
async fn test_assign_lead_forwards_staff_and_redirects_with_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/leads/L-1/assign"))
        .and(body_json(json!({ "staffId": "S-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, location) =
        post_form(app_for(&server), "/leads/L-1/assign", "staff_id=S-1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/leads/L-1?notice=Staff%20assigned%20successfully");
}

#[tokio::test]
async fn test_assign_lead_failure_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/leads/L-1/assign"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (_, location) = post_form(app_for(&server), "/leads/L-1/assign", "staff_id=S-1").await;
    assert_eq!(
        location,
        "/leads/L-1?error=Failed%20to%20assign%20staff.%20Please%20try%20again."
    );
}

#[tokio::test]
async fn test_invalid_staff_form_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/staff"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (status, location) = post_form(
        app_for(&server),
        "/staff",
        "name=Ravi&email=not-an-email&phone=&password=pw",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location,
        "/staff?error=Please%20enter%20a%20valid%20email%20address"
    );
}

#[tokio::test]
async fn test_resolve_complaint_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/complaints/C-1/resolve"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Already resolved" })),
        )
        .mount(&server)
        .await;

    let (_, location) = post_form(app_for(&server), "/complaints/C-1/resolve", "").await;
    assert_eq!(location, "/complaints?error=Already%20resolved");
}

#[tokio::test]
async fn test_broadcast_collects_recipients_and_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/broadcast/send"))
        .and(body_json(json!({
            "recipients": ["C-1", "C-2"],
            "message": "Cleaning camp on Sunday",
            "scheduledAt": "2026-06-01T09:30"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sent": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, location) = post_form(
        app_for(&server),
        "/pulse/send",
        "recipients=C-1&recipients=C-2&message=Cleaning+camp+on+Sunday&date=2026-06-01&time=09%3A30",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location,
        "/pulse?notice=Broadcast%20scheduled%20for%202%20recipient%28s%29"
    );
}

#[tokio::test]
async fn test_broadcast_without_recipients_is_rejected() {
    let server = MockServer::start().await;
    let (_, location) = post_form(app_for(&server), "/pulse/send", "message=Hello").await;
    assert_eq!(
        location,
        "/pulse?error=Please%20select%20at%20least%20one%20recipient"
    );
}

async fn mount_list(server: &MockServer, api_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_analytics_forwards_location_filters() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/leads",
        json!([{ "id": "L-1", "state": "Kerala", "city": "Kochi" }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics"))
        .and(query_param("timeframe", "3months"))
        .and(query_param("state", "Kerala"))
        .and(query_param("city", "Kochi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": { "bookings": 3 },
            "projectDistribution": [{ "type": "Residential", "count": 3 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app_for(&server),
        "/analytics?timeframe=3months&state=Kerala&city=Kochi",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Last 3 Months &middot; Kochi, Kerala"));
    assert!(body.contains("chart-pie"));
}

#[tokio::test]
async fn test_analytics_drops_city_without_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics"))
        .and(query_param_is_missing("city"))
        .and(query_param_is_missing("state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (_, body) = get(app_for(&server), "/analytics?city=Kochi").await;
    assert!(body.contains("All locations"));
}

#[tokio::test]
async fn test_staff_page_shows_selected_members_work() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/staff",
        json!([
            { "id": "S-1", "name": "Ravi", "role": "Electrician", "status": null },
            { "id": "S-2", "name": "Meera", "role": "Surveyor" }
        ]),
    )
    .await;
    mount_list(
        &server,
        "/api/admin/leads",
        json!([{ "id": "L-1", "bookingCode": "KS-0042", "fullName": "Asha", "assignedStaff": { "id": "S-1", "name": "Ravi" } }]),
    )
    .await;
    mount_list(
        &server,
        "/api/admin/amc-requests",
        json!([{ "id": "A-1", "status": "pending", "assignedStaff": { "id": "S-2", "name": "Meera" } }]),
    )
    .await;

    let (status, body) = get(app_for(&server), "/staff?q=electric&selected=S-1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>Electrician</td>"));
    assert!(!body.contains("<td>Surveyor</td>"));
    assert!(body.contains("Assigned Bookings (1)"));
    assert!(body.contains("KS-0042"));
    assert!(body.contains("Assigned AMC Requests (0)"));
    assert!(body.contains(r#"action="/staff/S-1/delete""#));
}

#[tokio::test]
async fn test_amc_queue_tabs() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/amc-requests",
        json!([
            { "id": "A-1", "status": "in_progress", "customer": { "name": "Asha" }, "note": "Inverter beeping" },
            { "id": "A-2", "status": "resolved", "customer": { "name": "Bala" } }
        ]),
    )
    .await;
    mount_list(&server, "/api/admin/staff", json!([{ "id": "S-1", "name": "Ravi" }])).await;

    let app = app_for(&server);
    let (_, pending) = get(app.clone(), "/amc").await;
    assert!(pending.contains("Pending (1)"));
    assert!(pending.contains("Resolved (1)"));
    assert!(pending.contains("Inverter beeping"));
    assert!(pending.contains(r#"action="/amc/A-1/assign""#));
    assert!(pending.contains(r#"<option value="S-1">Ravi</option>"#));
    assert!(pending.contains(r#"action="/amc/A-1/complete""#));

    let (_, resolved) = get(app, "/amc?tab=resolved").await;
    assert!(resolved.contains("Bala"));
    assert!(!resolved.contains("Asha"));
    assert!(!resolved.contains("Mark Complete"));
}

#[tokio::test]
async fn test_complaints_queue_defaults_severity() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/complaints",
        json!([
            { "id": "C-1", "status": "pending", "severity": null, "message": "Panel cracked" },
            { "id": "C-2", "status": "resolved", "message": "Low output" }
        ]),
    )
    .await;

    let (status, body) = get(app_for(&server), "/complaints?q=cracked").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Panel cracked"));
    assert!(body.contains("General Issue"));
    assert!(body.contains(">medium</span>"));
    assert!(body.contains(r#"action="/complaints/C-1/resolve""#));
    assert!(!body.contains("Low output"));
}

fn overview_body() -> serde_json::Value {
    json!({
        "totalNetwork": 42,
        "topReferrers": [
            { "id": "C-7", "phoneNumber": "9000000007", "referralCode": "ASHA10", "downline": { "a1": 3, "a4": null } },
            { "id": "C-8", "phoneNumber": "9000000008", "referralCode": "BALA22" }
        ]
    })
}

#[tokio::test]
async fn test_referrals_selects_first_referrer_by_default() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(&server, "/api/admin/referrals/overview", overview_body()).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/referrals/user/C-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "downline": { "a1": [{ "id": "C-9", "phoneNumber": "9000000009", "joinedAt": "2 Jan 2026" }], "a5": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(app_for(&server), "/referrals").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<tr class="selected"><td><a href="/referrals?selected=C-7">9000000007</a>"#));
    assert!(body.contains("<span>A1</span><strong>3</strong>"));
    assert!(body.contains("<span>A4</span><strong>0</strong>"));
    assert!(body.contains("9000000009"));
    assert_eq!(body.matches("No members yet").count(), 4);
}

#[tokio::test]
async fn test_referrals_honours_selected_query() {
    let server = MockServer::start().await;
    mount_list(&server, "/api/admin/referrals/overview", overview_body()).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/referrals/user/C-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "downline": {} })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/referrals/user/C-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "downline": {} })))
        .expect(0)
        .mount(&server)
        .await;

    let (_, body) = get(app_for(&server), "/referrals?selected=C-8").await;
    assert!(body.contains("<h2>9000000008</h2>"));
}

#[tokio::test]
async fn test_referrals_overview_failure_renders_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/referrals/overview"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/api/admin/referrals/user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get(app_for(&server), "/referrals").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to load referral overview"));
    assert_eq!(body.matches("<strong>2%</strong>").count(), 5);
    assert!(body.contains("Max payout: <strong>10%</strong>"));
    assert!(body.contains("No referrers found"));
}

#[tokio::test]
async fn test_data_page_survives_null_fields() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/customers",
        json!([
            { "id": "C-1", "mobile": "9876543210", "referralCode": "ASHA10", "downlines": [{ "id": "C-3", "mobile": "9000000003" }] },
            { "id": "C-2", "mobile": null, "level": null, "leads": null }
        ]),
    )
    .await;

    let (status, body) = get(app_for(&server), "/data?q=asha&selected=C-1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("1 of 2 customers"));
    assert!(body.contains("<th>Downline</th><td>1</td>"));
}

#[tokio::test]
async fn test_pulse_drops_customers_without_phone() {
    let server = MockServer::start().await;
    mount_notifications(&server).await;
    mount_list(
        &server,
        "/api/admin/customers",
        json!([
            { "id": "C-1", "mobile": "9876543210", "city": "Kochi" },
            { "id": "C-2", "mobile": null }
        ]),
    )
    .await;

    let (status, body) = get(app_for(&server), "/pulse").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Recipients (1 of 1)"));
    assert!(body.contains("Customer 9876543210"));
    assert!(body.contains(r#"action="/pulse/send""#));
}

#[tokio::test]
async fn test_unassign_lead_redirects_with_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/leads/L-1/unassign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, location) = post_form(app_for(&server), "/leads/L-1/unassign", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/leads/L-1?notice=Staff%20unassigned%20successfully");
}

#[tokio::test]
async fn test_create_staff_posts_trimmed_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/staff"))
        .and(body_json(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "9876543210",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "S-9" })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, location) = post_form(
        app_for(&server),
        "/staff",
        "name=+Ravi+&email=ravi%40example.com&phone=9876543210&password=pw",
    )
    .await;
    assert_eq!(location, "/staff?notice=Staff%20added%20successfully%21");
}

#[tokio::test]
async fn test_delete_staff_redirects_to_directory() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/staff/S-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, location) = post_form(app_for(&server), "/staff/S-1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/staff?notice=Staff%20member%20deleted%20successfully");
}

#[tokio::test]
async fn test_assign_amc_patches_staff_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/amc-requests/A-1"))
        .and(body_json(json!({ "assignedStaffId": "S-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, location) = post_form(app_for(&server), "/amc/A-1/assign", "staff_id=S-1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/amc?notice=Staff%20assigned%20successfully");
}

#[tokio::test]
async fn test_assign_amc_requires_staff() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/amc-requests/A-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_, location) = post_form(app_for(&server), "/amc/A-1/assign", "staff_id=").await;
    assert_eq!(location, "/amc?error=Please%20select%20a%20staff%20member");
}

#[tokio::test]
async fn test_complete_amc_marks_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/amc-requests/A-1"))
        .and(body_json(json!({ "status": "resolved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, location) = post_form(app_for(&server), "/amc/A-1/complete", "").await;
    assert_eq!(location, "/amc?notice=AMC%20request%20completed");
}
