//! Cancellation tokens tied to a view's lifetime.
//!
//! Data-fetching views create a token on mount; the owner's cleanup cancels
//! it. Responses that arrive after teardown check the token and drop their
//! result instead of writing into disposed signals.

#[cfg(test)]
#[path = "cancel_test.rs"]
mod cancel_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::on_cleanup;

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled when the current reactive owner is cleaned up.
    pub fn for_view() -> Self {
        let token = Self::new();
        let on_teardown = token.clone();
        on_cleanup(move || on_teardown.cancel());
        token
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Run `apply` only while the view is alive.
    pub fn apply<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        if self.is_cancelled() { None } else { Some(apply()) }
    }
}

/// Drive `work` in the browser and hand its output to `apply` unless the view
/// was torn down meanwhile. No-op during server rendering.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn spawn_in_view<T, W, A>(token: &CancelToken, work: W, apply: A)
where
    T: 'static,
    W: Future<Output = T> + 'static,
    A: FnOnce(T) + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let token = token.clone();
        leptos::task::spawn_local(async move {
            let output = work.await;
            if token.apply(|| apply(output)).is_none() {
                leptos::logging::log!("dropping response for a closed view");
            }
        });
    }
}
