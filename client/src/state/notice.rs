//! Transient user notices (toasts).
//!
//! SYSTEM CONTEXT
//! ==============
//! Validation errors, call-site request failures and the interceptor's
//! "session expired" message all end up here. The `Toaster` component renders
//! the queue; each notice dismisses itself after [`NOTICE_TTL_MS`].

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use leptos::prelude::*;

use crate::error::ApiError;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 4_000;
/// Oldest notices are dropped beyond this.
pub const MAX_VISIBLE_NOTICES: usize = 5;

pub const SESSION_EXPIRED: &str = "Sua sessão expirou. Entre novamente para continuar.";
pub const NETWORK_FAILURE: &str = "Não foi possível falar com o servidor. Tente novamente.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice notice--info",
            Self::Success => "notice notice--success",
            Self::Warning => "notice notice--warning",
            Self::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Ordered notice list, oldest first.
#[derive(Clone, Debug, Default)]
pub struct NoticeQueue {
    next_id: u64,
    pub items: Vec<Notice>,
}

impl NoticeQueue {
    /// Append a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, kind, message: message.into() });
        if self.items.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.items.len() - MAX_VISIBLE_NOTICES;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}

/// Shared handle to the notice queue.
#[derive(Clone, Copy, Debug)]
pub struct Notices(RwSignal<NoticeQueue>);

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

impl Notices {
    pub fn new() -> Self {
        Self(RwSignal::new(NoticeQueue::default()))
    }

    pub fn items(&self) -> Vec<Notice> {
        self.0.with(|q| q.items.clone())
    }

    pub fn items_untracked(&self) -> Vec<Notice> {
        self.0.with_untracked(|q| q.items.clone())
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(NoticeKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(NoticeKind::Success, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.show(NoticeKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(NoticeKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.0.update(|q| q.dismiss(id));
    }

    fn show(&self, kind: NoticeKind, message: impl Into<String>) {
        #[cfg_attr(not(feature = "hydrate"), allow(unused_variables, unused_assignments))]
        let mut id = 0;
        self.0.update(|q| id = q.push(kind, message));

        #[cfg(feature = "hydrate")]
        {
            let notices = *self;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(NOTICE_TTL_MS).await;
                notices.dismiss(id);
            });
        }
    }
}

/// Log a call-site failure and show `message`, unless the interceptor already
/// handled it as an expired session.
pub fn report_failure(notices: Notices, message: &str, error: &ApiError) {
    leptos::logging::warn!("{message}: {error}");
    if error.is_auth_failure() {
        return;
    }
    match error {
        ApiError::Transport(_) => notices.error(NETWORK_FAILURE),
        _ => notices.error(message),
    }
}
