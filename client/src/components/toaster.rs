//! Stack of transient notices in the corner of the screen.

use leptos::prelude::*;

use crate::state::notice::Notices;

#[component]
pub fn Toaster(notices: Notices) -> impl IntoView {
    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For each=move || notices.items() key=|n| n.id let:notice>
                <div class=notice.kind.css_class()>
                    <span class="notice__message">{notice.message.clone()}</span>
                    <button
                        class="notice__close"
                        title="Fechar"
                        on:click=move |_| notices.dismiss(notice.id)
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}
