//! Session store: who is signed in, and whether we know yet.
//!
//! SYSTEM CONTEXT
//! ==============
//! Created once when the app mounts, in `Loading`. The identity check moves it
//! to `Authenticated` or `Anonymous`. Logout and the HTTP interceptor both
//! clear it; clearing twice is a no-op, so concurrent forced logouts from
//! several failing requests collapse into one state change.
//!
//! DESIGN
//! ======
//! `SessionState` is a plain value with the transitions; `Session` is the
//! copyable reactive handle passed to every page. `SessionExpiry` is the
//! application's `AuthFailureHandler`, installed into the `ApiClient` at
//! startup.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use super::bookmarks::Bookmarks;
use super::navigation::Navigator;
use super::notice::{Notices, SESSION_EXPIRED};
use crate::net::api;
use crate::net::http::{ApiClient, AuthFailureHandler};
use crate::net::types::Identity;
use crate::routes;

// =============================================================================
// STATE
// =============================================================================

/// Snapshot of the session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True only while the initial identity check is in flight.
    pub loading: bool,
}

/// Borrowed view of where the session stands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionPhase<'a> {
    Loading,
    Authenticated(&'a Identity),
    Anonymous,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::probing()
    }
}

impl SessionState {
    /// State at mount: nothing known, identity check pending.
    pub fn probing() -> Self {
        Self { identity: None, loading: true }
    }

    pub fn phase(&self) -> SessionPhase<'_> {
        if self.loading {
            return SessionPhase::Loading;
        }
        match &self.identity {
            Some(identity) => SessionPhase::Authenticated(identity),
            None => SessionPhase::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Finish the identity check with its outcome.
    pub fn resolve(&mut self, identity: Option<Identity>) {
        self.identity = identity;
        self.loading = false;
    }

    /// Replace the identity without touching the loading flag.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    /// Forget the identity. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.identity.is_some() || self.loading;
        self.identity = None;
        self.loading = false;
        changed
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Run the identity check and hand its outcome to `resolve`.
///
/// Check failures are logged and resolve as anonymous.
pub async fn establish_session<F>(api: &ApiClient, resolve: F)
where
    F: FnOnce(Option<Identity>),
{
    let identity = match api::fetch_identity(api).await {
        Ok(identity) => identity,
        Err(e) => {
            leptos::logging::warn!("identity check failed: {e}");
            None
        }
    };
    resolve(identity);
}

/// Re-read the identity of a live session.
///
/// Only a definite answer replaces the identity: a signed-in user (or `None`
/// when the backend answers 401/403). Server errors, network failures and
/// unreadable bodies are logged and leave the current identity in place.
pub async fn refresh_session<F>(api: &ApiClient, apply: F)
where
    F: FnOnce(Option<Identity>),
{
    match api::fetch_identity(api).await {
        Ok(identity) => apply(identity),
        Err(e) => leptos::logging::warn!("identity refresh failed, keeping current session: {e}"),
    }
}

/// Call the backend logout endpoint, then run `clear` whatever the outcome.
pub async fn end_session<F>(api: &ApiClient, clear: F)
where
    F: FnOnce(),
{
    if let Err(e) = api::logout(api).await {
        leptos::logging::warn!("logout request failed: {e}");
    }
    clear();
}

// =============================================================================
// HANDLE
// =============================================================================

/// Reactive session handle handed to every view.
#[derive(Clone, Copy, Debug)]
pub struct Session {
    state: RwSignal<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::from_state(SessionState::probing())
    }

    pub fn from_state(state: SessionState) -> Self {
        Self { state: RwSignal::new(state) }
    }

    /// Tracked snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.state.get()
    }

    pub fn snapshot_untracked(&self) -> SessionState {
        self.state.get_untracked()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.with(|s| s.identity.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .with(|s| s.identity.as_ref().is_some_and(Identity::is_admin))
    }

    pub fn set_identity(&self, identity: Option<Identity>) {
        self.state.update(|s| s.set_identity(identity));
    }

    /// Drop the identity; no notification when already cleared.
    pub fn clear(&self) {
        let needs_clear = self.state.with_untracked(|s| s.identity.is_some() || s.loading);
        if needs_clear {
            self.state.update(|s| {
                s.clear();
            });
        }
    }

    /// Mount-time identity check: resolve the loading state, falling back to
    /// anonymous on any failure.
    pub async fn identify(self, api: &ApiClient) {
        establish_session(api, move |identity| self.state.update(|s| s.resolve(identity))).await;
    }

    /// Re-check an established session after something changed on the
    /// backend (sign-in, new profile photo). Transient failures keep the
    /// current identity.
    pub async fn refresh(self, api: &ApiClient) {
        refresh_session(api, move |identity| self.state.update(|s| s.resolve(identity))).await;
    }

    /// Backend logout followed by an unconditional local clear.
    pub async fn logout(self, api: &ApiClient) {
        end_session(api, move || self.clear()).await;
    }
}

// =============================================================================
// AUTH FAILURE HANDLER
// =============================================================================

/// Clears the session and its bookmarks, shows the expiry notice and sends
/// the user to sign-in.
#[derive(Clone, Copy, Debug)]
pub struct SessionExpiry {
    session: Session,
    bookmarks: Bookmarks,
    notices: Notices,
    navigator: Navigator,
}

impl SessionExpiry {
    pub fn new(session: Session, bookmarks: Bookmarks, notices: Notices, navigator: Navigator) -> Self {
        Self { session, bookmarks, notices, navigator }
    }
}

impl AuthFailureHandler for SessionExpiry {
    fn on_auth_failure(&self) {
        self.session.clear();
        self.bookmarks.clear();
        self.notices.warn(SESSION_EXPIRED);
        self.navigator.go(routes::SIGN_IN);
    }
}
