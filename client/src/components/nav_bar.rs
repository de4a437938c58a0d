//! Top navigation with session-aware links and logout.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::routes;
use crate::util::cancel::{CancelToken, spawn_in_view};

const LOGGED_OUT: &str = "Você saiu da sua conta.";

#[component]
pub fn NavBar(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let session = ctx.session;

    let on_logout = move |_| {
        let leaving = ctx.clone();
        spawn_in_view(
            &token,
            async move {
                leaving.sign_out().await;
                leaving.notices.info(LOGGED_OUT);
                leaving.navigator.go(routes::HOME);
            },
            |()| {},
        );
    };

    let user_label = move || session.identity().map(|i| i.display_name()).unwrap_or_default();

    view! {
        <header class="nav-bar">
            <A href=routes::HOME attr:class="nav-bar__brand">"Buddie"</A>
            <nav class="nav-bar__links">
                <A href=routes::HOME>"Cursos"</A>
                <A href=routes::INSTITUTIONS>"Instituições"</A>
                <Show when=move || session.is_admin()>
                    <A href=routes::ADMIN>"Administração"</A>
                </Show>
            </nav>
            <span class="nav-bar__spacer"></span>
            <Show
                when=move || session.is_authenticated()
                fallback=move || {
                    view! {
                        <Show when=move || !session.is_loading()>
                            <A href=routes::SIGN_IN attr:class="btn">"Entrar"</A>
                            <A href=routes::REGISTER attr:class="btn btn--primary">"Cadastrar"</A>
                        </Show>
                    }
                }
            >
                <A href=routes::PROFILE attr:class="nav-bar__user">{user_label}</A>
                <button class="btn nav-bar__logout" on:click=on_logout.clone()>
                    "Sair"
                </button>
            </Show>
        </header>
    }
}
