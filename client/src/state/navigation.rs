//! Navigation requests raised outside the router.
//!
//! The HTTP layer has no router handle, so the auth-failure handler records
//! the target here and `RedirectListener` (mounted inside `<Router>`)
//! performs it.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    pending: RwSignal<Option<String>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self { pending: RwSignal::new(None) }
    }

    /// Ask the router to move to `path`.
    pub fn go(&self, path: &str) {
        self.pending.set(Some(path.to_owned()));
    }

    /// Tracked read of the outstanding request.
    pub fn pending(&self) -> Option<String> {
        self.pending.get()
    }

    pub fn pending_untracked(&self) -> Option<String> {
        self.pending.get_untracked()
    }

    /// Mark the outstanding request as performed.
    pub fn complete(&self) {
        if self.pending.with_untracked(Option::is_some) {
            self.pending.set(None);
        }
    }
}
