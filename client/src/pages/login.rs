//! Sign-in page (`/entrar`): email + password against the backend session.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::error::ApiError;
use crate::routes;
use crate::net::api;
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::validate::validate_login;

const BAD_CREDENTIALS: &str = "E-mail ou senha inválidos.";
const LOGIN_FAILED: &str = "Não foi possível entrar agora. Tente novamente.";

/// Notice text for a failed login attempt.
fn login_failure_message(error: &ApiError) -> &'static str {
    if error.is_auth_failure() { BAD_CREDENTIALS } else { LOGIN_FAILED }
}

#[component]
pub fn LoginPage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let notices = ctx.notices;
    let session = ctx.session;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(form) => form,
            Err(message) => {
                notices.warn(message);
                return;
            }
        };
        busy.set(true);

        let signed_in = ctx.clone();
        spawn_in_view(
            &token,
            async move {
                let outcome = api::login(&signed_in.api, &form).await;
                match &outcome {
                    Ok(()) => {
                        signed_in.refresh_signed_in().await;
                        signed_in.navigator.go(routes::PROFILE);
                    }
                    Err(e) => {
                        leptos::logging::warn!("login failed: {e}");
                        signed_in.notices.error(login_failure_message(e));
                    }
                }
                outcome
            },
            move |outcome| {
                if outcome.is_ok() {
                    password.set(String::new());
                }
                busy.set(false);
            },
        );
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Entrar"</h1>
                <Show when=move || session.is_authenticated()>
                    <p class="auth-card__hint">
                        "Você já está conectado. "
                        <A href=routes::PROFILE>"Ir para o perfil"</A>
                    </p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="seu@email.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Senha"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Ainda não tem conta? "
                    <A href=routes::REGISTER>"Cadastre-se"</A>
                </p>
            </div>
        </div>
    }
}
