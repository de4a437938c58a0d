//! Registration page (`/cadastro`).

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::error::ApiError;
use crate::net::api;
use crate::routes;
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::validate::validate_registration;

const REGISTERED: &str = "Cadastro realizado! Agora é só entrar.";

/// Notice text for a refused registration.
fn registration_failure_message(error: &ApiError) -> &'static str {
    match error.status() {
        Some(409) => "Já existe uma conta com este e-mail ou usuário.",
        Some(400 | 422) => "Confira os dados informados.",
        _ => "Não foi possível concluir o cadastro. Tente novamente.",
    }
}

#[component]
pub fn RegisterPage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notices = ctx.notices;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = match validate_registration(
            &username.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            &confirmation.get_untracked(),
        ) {
            Ok(form) => form,
            Err(message) => {
                notices.warn(message);
                return;
            }
        };
        busy.set(true);

        let AppContext { api, navigator, .. } = ctx.clone();
        spawn_in_view(
            &token,
            async move {
                match api::register(&api, &form).await {
                    Ok(()) => {
                        notices.success(REGISTERED);
                        navigator.go(routes::SIGN_IN);
                    }
                    Err(e) => {
                        leptos::logging::warn!("registration failed: {e}");
                        notices.error(registration_failure_message(&e));
                    }
                }
            },
            move |()| busy.set(false),
        );
    };

    let field = move |signal: RwSignal<String>, kind: &'static str, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || signal.get()
                on:input=move |ev| signal.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Criar conta"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field(username, "text", "Nome de usuário")}
                    {field(email, "email", "seu@email.com")}
                    {field(password, "password", "Senha")}
                    {field(confirmation, "password", "Confirme a senha")}
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Cadastrar"
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Já tem conta? "
                    <A href=routes::SIGN_IN>"Entrar"</A>
                </p>
            </div>
        </div>
    }
}
