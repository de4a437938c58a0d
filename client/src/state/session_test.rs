use std::cell::Cell;
use std::sync::Arc;

use futures::executor::block_on;

use super::*;
use crate::error::ApiError;
use crate::net::http::ApiRequest;
use crate::net::testing::{ScriptedTransport, client};
use crate::state::bookmarks::BookmarkSet;

fn identity(name: &str) -> Identity {
    serde_json::from_value(serde_json::json!({ "id": 1, "username": name, "role": "USER" })).unwrap()
}

// =============================================================
// SessionState transitions
// =============================================================

#[test]
fn default_state_is_loading_without_identity() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(state.identity.is_none());
    assert_eq!(state.phase(), SessionPhase::Loading);
}

#[test]
fn resolve_with_identity_is_authenticated() {
    let mut state = SessionState::probing();
    state.resolve(Some(identity("ana")));
    assert!(!state.loading);
    assert!(matches!(state.phase(), SessionPhase::Authenticated(id) if id.display_name() == "ana"));
}

#[test]
fn resolve_without_identity_is_anonymous() {
    let mut state = SessionState::probing();
    state.resolve(None);
    assert_eq!(state.phase(), SessionPhase::Anonymous);
}

#[test]
fn set_identity_keeps_loading_flag() {
    let mut state = SessionState::probing();
    state.set_identity(Some(identity("ana")));
    assert!(state.loading);
    assert!(state.is_authenticated());
}

#[test]
fn clear_is_idempotent() {
    let mut state = SessionState::probing();
    state.resolve(Some(identity("ana")));
    assert!(state.clear());
    assert!(!state.clear());
    assert_eq!(state.phase(), SessionPhase::Anonymous);
}

// =============================================================
// Identity check / logout
// =============================================================

#[test]
fn establish_session_resolves_identity_from_backend() {
    let transport = ScriptedTransport::new();
    transport.push_json(&serde_json::json!({ "id": 1, "username": "ana" }));
    let api = client(&transport);
    let mut state = SessionState::probing();

    block_on(establish_session(&api, |id| state.resolve(id)));

    assert_eq!(state.identity.map(|i| i.display_name()).as_deref(), Some("ana"));
    assert!(!state.loading);
}

#[test]
fn establish_session_resolves_anonymous_on_network_error() {
    let transport = ScriptedTransport::new();
    transport.push_error(ApiError::Transport("offline".to_owned()));
    let api = client(&transport);
    let mut state = SessionState::probing();

    block_on(establish_session(&api, |id| state.resolve(id)));

    assert_eq!(state.phase(), SessionPhase::Anonymous);
}

#[test]
fn end_session_clears_when_backend_succeeds() {
    let transport = ScriptedTransport::new();
    transport.push_status(200, "");
    let api = client(&transport);
    let cleared = Cell::new(false);

    block_on(end_session(&api, || cleared.set(true)));

    assert!(cleared.get());
}

#[test]
fn end_session_clears_even_when_backend_fails() {
    let transport = ScriptedTransport::new();
    transport.push_error(ApiError::Transport("offline".to_owned()));
    let api = client(&transport);
    let mut state = SessionState::probing();
    state.resolve(Some(identity("ana")));

    block_on(end_session(&api, || {
        state.clear();
    }));

    assert!(state.identity.is_none());
    assert_eq!(transport.requests()[0].path, "/logout");
}

// =============================================================
// Session handle + SessionExpiry
// =============================================================

#[test]
fn session_logout_clears_identity_despite_server_error() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_status(500, "");
        let api = client(&transport);
        let session = Session::from_state(SessionState { identity: Some(identity("ana")), loading: false });

        block_on(session.logout(&api));

        assert!(session.snapshot_untracked().identity.is_none());
    });
}

#[test]
fn login_then_identity_check_populates_identity() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_status(200, "");
        transport.push_json(&serde_json::json!({ "id": 4, "username": "bia" }));
        let api = client(&transport);
        let session = Session::new();

        let form = crate::net::types::LoginForm { email: "bia@b.com".to_owned(), password: "x".to_owned() };
        block_on(api::login(&api, &form)).unwrap();
        block_on(session.identify(&api));

        let state = session.snapshot_untracked();
        assert!(!state.loading);
        assert_eq!(state.identity.map(|i| i.display_name()).as_deref(), Some("bia"));
    });
}

#[test]
fn forbidden_response_expires_session_and_redirects_to_sign_in() {
    Owner::new().with(|| {
        let session = Session::from_state(SessionState { identity: Some(identity("ana")), loading: false });
        let notices = Notices::new();
        let navigator = Navigator::new();
        let transport = ScriptedTransport::new();
        transport.push_status(403, "");
        let api = client(&transport)
            .with_auth_failure_handler(Arc::new(SessionExpiry::new(session, Bookmarks::with_set(BookmarkSet::default()), notices, navigator)));

        let result = block_on(api.send(ApiRequest::get("/api/user/saved-courses")));

        assert_eq!(result, Err(ApiError::Forbidden));
        assert!(session.snapshot_untracked().identity.is_none());
        assert_eq!(navigator.pending_untracked().as_deref(), Some(routes::SIGN_IN));
        let shown = notices.items_untracked();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].message, SESSION_EXPIRED);
    });
}

#[test]
fn failed_login_does_not_expire_session() {
    Owner::new().with(|| {
        let session = Session::from_state(SessionState { identity: None, loading: false });
        let notices = Notices::new();
        let navigator = Navigator::new();
        let transport = ScriptedTransport::new();
        transport.push_status(401, "");
        let api = client(&transport)
            .with_auth_failure_handler(Arc::new(SessionExpiry::new(session, Bookmarks::with_set(BookmarkSet::default()), notices, navigator)));

        let form = crate::net::types::LoginForm { email: "a@b.com".to_owned(), password: "bad".to_owned() };
        let result = block_on(api::login(&api, &form));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(notices.items_untracked().is_empty());
        assert_eq!(navigator.pending_untracked(), None);
    });
}

// =============================================================
// Refresh of an established session
// =============================================================

fn signed_in(name: &str) -> Session {
    Session::from_state(SessionState { identity: Some(identity(name)), loading: false })
}

#[test]
fn refresh_keeps_identity_on_server_error() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_status(500, "boom");
        let api = client(&transport);
        let session = signed_in("ana");

        block_on(session.refresh(&api));

        let state = session.snapshot_untracked();
        assert_eq!(state.identity.map(|i| i.display_name()).as_deref(), Some("ana"));
    });
}

#[test]
fn refresh_keeps_identity_on_network_and_decode_errors() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_error(ApiError::Transport("offline".to_owned()));
        transport.push_status(200, "[1, 2]");
        let api = client(&transport);
        let session = signed_in("ana");

        block_on(session.refresh(&api));
        block_on(session.refresh(&api));

        assert!(session.snapshot_untracked().is_authenticated());
    });
}

#[test]
fn refresh_adopts_updated_identity() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_json(&serde_json::json!({ "id": 1, "username": "ana", "imageId": "77" }));
        let api = client(&transport);
        let session = signed_in("ana");

        block_on(session.refresh(&api));

        assert_eq!(session.identity().and_then(|i| i.image_id()).as_deref(), Some("77"));
    });
}

#[test]
fn refresh_signs_out_when_backend_rejects_session() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_status(401, "");
        let api = client(&transport);
        let session = signed_in("ana");

        block_on(session.refresh(&api));

        assert_eq!(session.snapshot_untracked().phase(), SessionPhase::Anonymous);
    });
}

#[test]
fn mount_check_still_falls_back_to_anonymous_on_server_error() {
    Owner::new().with(|| {
        let transport = ScriptedTransport::new();
        transport.push_status(500, "boom");
        let api = client(&transport);
        let session = Session::new();

        block_on(session.identify(&api));

        assert_eq!(session.snapshot_untracked().phase(), SessionPhase::Anonymous);
    });
}

#[test]
fn expiry_handler_clears_bookmarks() {
    Owner::new().with(|| {
        let session = signed_in("ana");
        let bookmarks = Bookmarks::with_set(BookmarkSet::default());
        bookmarks.set(5, true);
        let notices = Notices::new();
        let navigator = Navigator::new();

        SessionExpiry::new(session, bookmarks, notices, navigator).on_auth_failure();

        assert!(bookmarks.snapshot_untracked().is_empty());
        assert!(session.snapshot_untracked().identity.is_none());
    });
}
