//! Profile page (`/perfil`): account details, saved courses and photo upload.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::course_card::CourseCard;
use crate::net::api;
use crate::net::types::{Course, Identity};
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};

const SAVED_LOAD_FAILED: &str = "Não foi possível carregar seus cursos salvos.";
/// Largest profile photo accepted before upload.
pub const MAX_IMAGE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;
const IMAGE_NOT_AN_IMAGE: &str = "Escolha um arquivo de imagem.";
const IMAGE_TOO_LARGE: &str = "A imagem deve ter no máximo 5 MB.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Account,
    Saved,
    Photo,
}

impl ProfileTab {
    pub const ALL: [Self; 3] = [Self::Account, Self::Saved, Self::Photo];

    pub fn label(self) -> &'static str {
        match self {
            Self::Account => "Conta",
            Self::Saved => "Cursos salvos",
            Self::Photo => "Foto",
        }
    }
}

/// Label/value pairs shown on the account tab, skipping absent attributes.
fn identity_rows(identity: &Identity) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Usuário", identity.display_name())];
    if let Some(email) = identity.attr("email").filter(|e| !e.is_empty()) {
        rows.push(("E-mail", email));
    }
    if identity.role().is_some_and(|r| !r.is_empty()) {
        let label = if identity.is_admin() { "Administrador" } else { "Usuário" };
        rows.push(("Perfil", label.to_owned()));
    }
    rows
}

/// Reject non-images and oversized files before they leave the browser.
///
/// # Errors
///
/// The notice text to show.
pub fn check_image(content_type: &str, size: f64) -> Result<(), &'static str> {
    if !content_type.starts_with("image/") {
        return Err(IMAGE_NOT_AN_IMAGE);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(IMAGE_TOO_LARGE);
    }
    Ok(())
}

#[component]
pub fn ProfilePage(ctx: AppContext) -> impl IntoView {
    let tab = RwSignal::new(ProfileTab::default());
    let session = ctx.session;
    let account_ctx = ctx.clone();

    view! {
        <section class="profile">
            <h1>{move || session.identity().map(|i| i.display_name()).unwrap_or_default()}</h1>
            <nav class="tabs">
                {ProfileTab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class="tabs__tab"
                                class:tabs__tab--active=move || tab.get() == t
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            {move || {
                let ctx = account_ctx.clone();
                match tab.get() {
                    ProfileTab::Account => view! { <AccountTab ctx=ctx/> }.into_any(),
                    ProfileTab::Saved => view! { <SavedTab ctx=ctx/> }.into_any(),
                    ProfileTab::Photo => view! { <PhotoTab ctx=ctx/> }.into_any(),
                }
            }}
        </section>
    }
}

#[component]
fn AccountTab(ctx: AppContext) -> impl IntoView {
    let session = ctx.session;
    view! {
        <dl class="profile__account">
            {move || {
                session
                    .identity()
                    .map(|identity| {
                        identity_rows(&identity)
                            .into_iter()
                            .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            }}
        </dl>
    }
}

#[component]
fn SavedTab(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let courses = RwSignal::new(None::<Vec<Course>>);
    let AppContext { api, bookmarks, notices, .. } = ctx.clone();

    spawn_in_view(
        &token,
        async move { api::saved_courses(&api).await },
        move |result| match result {
            Ok(list) => {
                bookmarks.replace(list.iter().map(|c| c.id).collect());
                courses.set(Some(list));
            }
            Err(e) => {
                report_failure(notices, SAVED_LOAD_FAILED, &e);
                courses.set(Some(Vec::new()));
            }
        },
    );

    view! {
        {move || match courses.get() {
            None => view! { <p>"Carregando..."</p> }.into_any(),
            Some(list) if list.is_empty() => {
                view! { <p class="profile__empty">"Você ainda não salvou nenhum curso."</p> }.into_any()
            }
            Some(list) => {
                let cards = list
                    .into_iter()
                    // Unsaving from this tab hides the card right away.
                    .map(|course| {
                        let id = course.id;
                        let card_ctx = ctx.clone();
                        view! {
                            <Show when=move || bookmarks.contains(id)>
                                <CourseCard ctx=card_ctx.clone() course=course.clone()/>
                            </Show>
                        }
                    })
                    .collect::<Vec<_>>();
                view! { <div class="course-grid">{cards}</div> }.into_any()
            }
        }}
    }
}

#[component]
fn PhotoTab(ctx: AppContext) -> impl IntoView {
    let session = ctx.session;
    let busy = RwSignal::new(false);
    let api = ctx.api.clone();
    let photo_url = move || {
        session
            .identity()
            .and_then(|i| i.image_id())
            .map(|id| api::image_url(&api, &id))
    };

    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let token = CancelToken::for_view();
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        upload::start(&ctx, &ev, busy, &token);
    };

    view! {
        <div class="profile__photo">
            {move || match photo_url() {
                Some(src) => view! { <img class="profile__avatar" src=src alt="Foto de perfil"/> }.into_any(),
                None => view! { <p class="profile__no-photo">"Nenhuma foto enviada."</p> }.into_any(),
            }}
            <label class="btn">
                {move || if busy.get() { "Enviando..." } else { "Escolher foto" }}
                <input type="file" accept="image/*" hidden=true disabled=move || busy.get() on:change=on_change/>
            </label>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod upload {
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;

    use super::check_image;
    use crate::app::AppContext;
    use crate::state::notice::report_failure;
    use crate::util::cancel::{CancelToken, spawn_in_view};

    const UPLOADED: &str = "Foto atualizada.";
    const UPLOAD_FAILED: &str = "Não foi possível enviar a foto.";

    pub(super) fn start(ctx: &AppContext, ev: &leptos::ev::Event, busy: RwSignal<bool>, token: &CancelToken) {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_ref::<web_sys::HtmlInputElement>().cloned())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        let content_type = file.type_();
        if let Err(message) = check_image(&content_type, file.size()) {
            ctx.notices.warn(message);
            return;
        }

        busy.set(true);
        let AppContext { api, session, notices, .. } = ctx.clone();
        spawn_in_view(
            token,
            async move {
                let bytes = match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => js_sys::Uint8Array::new(&buffer).to_vec(),
                    Err(e) => {
                        leptos::logging::warn!("reading profile image failed: {e:?}");
                        notices.error(UPLOAD_FAILED);
                        return;
                    }
                };
                match crate::net::api::upload_profile_image(&api, &content_type, bytes).await {
                    Ok(()) => {
                        session.refresh(&api).await;
                        notices.success(UPLOADED);
                    }
                    Err(e) => report_failure(notices, UPLOAD_FAILED, &e),
                }
            },
            move |()| {
                busy.set(false);
                input.set_value("");
            },
        );
    }
}
