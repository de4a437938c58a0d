//! Route guard for identity-requiring views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell holds every route behind a placeholder while the session is
//! loading, so the guard only ever decides between "render" and "redirect".
//! The decision is a pure function of the session snapshot and is recomputed
//! on every change.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::routes;
use crate::state::session::{Session, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// Signed-in users pass; everyone else goes to sign-in.
pub fn require_identity(state: &SessionState) -> GuardDecision {
    if state.identity.is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(routes::SIGN_IN)
    }
}

/// Admins pass; other signed-in users go home, anonymous users to sign-in.
pub fn require_admin(state: &SessionState) -> GuardDecision {
    match &state.identity {
        Some(identity) if identity.is_admin() => GuardDecision::Render,
        Some(_) => GuardDecision::Redirect(routes::HOME),
        None => GuardDecision::Redirect(routes::SIGN_IN),
    }
}

/// Render `children` only when the session passes the guard.
#[component]
pub fn RequireAuth(
    session: Session,
    /// Additionally require the admin role.
    #[prop(optional)]
    admin: bool,
    children: ChildrenFn,
) -> impl IntoView {
    move || {
        let state = session.snapshot();
        let decision = if admin { require_admin(&state) } else { require_identity(&state) };
        match decision {
            GuardDecision::Render => children().into_any(),
            GuardDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        }
    }
}
