use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Página não encontrada"</h1>
            <A href=routes::HOME>"Voltar ao início"</A>
        </section>
    }
}
