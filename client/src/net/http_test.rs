use futures::executor::block_on;

use super::*;
use crate::net::testing::{ScriptedTransport, TEST_ORIGIN, client, client_with_handler};

// =============================================================
// Request building
// =============================================================

#[test]
fn path_and_query_encodes_values() {
    let request = ApiRequest::post("/api/courses/7/comments").query("commentText", "muito bom & útil");
    assert_eq!(
        request.path_and_query(),
        "/api/courses/7/comments?commentText=muito%20bom%20%26%20%C3%BAtil"
    );
}

#[test]
fn path_and_query_without_query_is_plain_path() {
    assert_eq!(ApiRequest::get("/api/courses").path_and_query(), "/api/courses");
}

#[test]
fn form_body_keeps_field_order() {
    let request = ApiRequest::post(LOGIN_PATH).form(&[("email", "a@b.com"), ("password", "x y")]);
    let Body::Form(pairs) = &request.body else {
        panic!("expected form body");
    };
    assert_eq!(encode_pairs(pairs), "email=a%40b.com&password=x%20y");
}

#[test]
fn json_body_serializes_value() {
    let request = ApiRequest::post("/api/courses")
        .json(&serde_json::json!({ "name": "Física" }))
        .unwrap();
    assert_eq!(request.body, Body::Json(serde_json::json!({ "name": "Física" })));
}

// =============================================================
// Auth endpoint detection
// =============================================================

#[test]
fn auth_endpoints_are_detected_with_query_and_trailing_slash() {
    assert!(is_auth_endpoint("/login"));
    assert!(is_auth_endpoint("/logout/"));
    assert!(is_auth_endpoint("/login?next=/perfil"));
    assert!(is_auth_endpoint(IDENTITY_PATH));
    assert!(!is_auth_endpoint("/api/courses"));
    assert!(!is_auth_endpoint("/api/login-history"));
    assert!(!is_auth_endpoint("/"));
}

#[test]
fn should_escalate_only_auth_statuses_off_auth_endpoints() {
    assert!(should_escalate(401, "/api/user/saved-courses"));
    assert!(should_escalate(403, "/api/users"));
    assert!(!should_escalate(401, LOGIN_PATH));
    assert!(!should_escalate(403, LOGOUT_PATH));
    assert!(!should_escalate(404, "/api/users"));
    assert!(!should_escalate(500, "/api/users"));
}

// =============================================================
// Interceptor
// =============================================================

#[test]
fn success_passes_through_unchanged() {
    let transport = ScriptedTransport::new();
    transport.push_status(200, "[1,2]");
    let (api, handler) = client_with_handler(&transport);

    let response = block_on(api.send(ApiRequest::get("/api/courses"))).unwrap();

    assert_eq!(response, RawResponse { status: 200, body: "[1,2]".to_owned() });
    assert_eq!(handler.calls(), 0);
}

#[test]
fn forbidden_on_regular_endpoint_escalates_once_and_still_rejects() {
    let transport = ScriptedTransport::new();
    transport.push_status(403, "");
    let (api, handler) = client_with_handler(&transport);

    let result = block_on(api.send(ApiRequest::get("/api/user/saved-courses")));

    assert_eq!(result, Err(ApiError::Forbidden));
    assert_eq!(handler.calls(), 1);
}

#[test]
fn each_failed_request_escalates_exactly_once() {
    let transport = ScriptedTransport::new();
    transport.push_status(401, "");
    transport.push_status(403, "");
    let (api, handler) = client_with_handler(&transport);

    let first = block_on(api.send(ApiRequest::get("/api/users")));
    let second = block_on(api.send(ApiRequest::put("/api/users/3/role")));

    assert_eq!(first, Err(ApiError::Unauthorized));
    assert_eq!(second, Err(ApiError::Forbidden));
    assert_eq!(handler.calls(), 2);
}

#[test]
fn auth_failure_on_login_or_logout_does_not_escalate() {
    let transport = ScriptedTransport::new();
    transport.push_status(401, "bad credentials");
    transport.push_status(403, "");
    let (api, handler) = client_with_handler(&transport);

    let login = block_on(api.send(ApiRequest::post(LOGIN_PATH)));
    let logout = block_on(api.send(ApiRequest::get(LOGOUT_PATH)));

    assert_eq!(login, Err(ApiError::Unauthorized));
    assert_eq!(logout, Err(ApiError::Forbidden));
    assert_eq!(handler.calls(), 0);
}

#[test]
fn identity_check_rejection_does_not_escalate() {
    let transport = ScriptedTransport::new();
    transport.push_status(401, "");
    transport.push_status(403, "");
    let (api, handler) = client_with_handler(&transport);

    let raw = block_on(api.send(ApiRequest::get(IDENTITY_PATH)));
    let identity = block_on(crate::net::api::fetch_identity(&api));

    assert_eq!(raw, Err(ApiError::Unauthorized));
    assert_eq!(identity, Ok(None));
    assert_eq!(handler.calls(), 0);
}

#[test]
fn other_failures_pass_through_without_escalation() {
    let transport = ScriptedTransport::new();
    transport.push_status(500, "oops");
    transport.push_error(ApiError::Transport("offline".to_owned()));
    let (api, handler) = client_with_handler(&transport);

    let server = block_on(api.send(ApiRequest::get("/api/courses")));
    let network = block_on(api.send(ApiRequest::get("/api/courses")));

    assert_eq!(server, Err(ApiError::Status { status: 500, body: "oops".to_owned() }));
    assert_eq!(network, Err(ApiError::Transport("offline".to_owned())));
    assert_eq!(handler.calls(), 0);
}

#[test]
fn missing_handler_still_rejects_without_crashing() {
    let transport = ScriptedTransport::new();
    transport.push_status(401, "");
    let api = client(&transport);

    let result = block_on(api.send(ApiRequest::get("/api/user/saved-courses")));

    assert_eq!(result, Err(ApiError::Unauthorized));
}

#[test]
fn send_targets_configured_origin_with_query() {
    let transport = ScriptedTransport::new();
    transport.push_status(200, "[]");
    let api = client(&transport);

    block_on(api.send(ApiRequest::get("/api/courses/search").query("q", "direito"))).unwrap();

    assert_eq!(transport.urls(), vec![format!("{TEST_ORIGIN}/api/courses/search?q=direito")]);
}

#[test]
fn fetch_json_reports_decode_errors() {
    let transport = ScriptedTransport::new();
    transport.push_status(200, "not json");
    let api = client(&transport);

    let result: Result<Vec<u32>, ApiError> = block_on(api.fetch_json(ApiRequest::get("/api/courses")));

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_transport_is_unavailable_outside_hydrate() {
    let api = ApiClient::browser(crate::config::ClientConfig::with_origin(TEST_ORIGIN));
    let result = block_on(api.send(ApiRequest::get("/api/courses")));
    assert_eq!(result, Err(ApiError::Unavailable));
}
