//! Performs navigation requested through [`Navigator`].

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::navigation::Navigator;

/// Must be mounted inside `<Router>`.
#[component]
pub fn RedirectListener(navigator: Navigator) -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = navigator.pending() {
            navigator.complete();
            navigate(&path, NavigateOptions::default());
        }
    });
}
