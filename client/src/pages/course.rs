//! Course detail (`/curso/:id`): description, bookmark toggle and comments.
//!
//! Signed-in users get a comment form; anonymous visitors see a sign-in link
//! instead. Comments are validated before any request leaves, and a
//! successful post reloads the list from the backend.

#[cfg(test)]
#[path = "course_test.rs"]
mod course_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::app::AppContext;
use crate::components::comment_list::CommentList;
use crate::components::course_card::BookmarkButton;
use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::api;
use crate::net::types::{Comment, Course};
use crate::routes;
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::validate::validate_comment;

const LOAD_FAILED: &str = "Não foi possível carregar o curso.";
const COMMENT_FAILED: &str = "Não foi possível enviar o comentário.";

#[derive(Debug, thiserror::Error)]
pub(crate) enum CommentError {
    #[error("{0}")]
    Invalid(&'static str),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate, post and reload the comment list.
///
/// # Errors
///
/// `Invalid` before any request when the text is rejected locally, `Api`
/// when the post or the reload fails.
pub(crate) async fn submit_comment(api: &ApiClient, course_id: i64, raw: &str) -> Result<Vec<Comment>, CommentError> {
    let text = validate_comment(raw).map_err(CommentError::Invalid)?;
    api::add_comment(api, course_id, &text).await?;
    Ok(api::list_comments(api, course_id).await?)
}

#[derive(Clone, Debug, PartialEq)]
enum Detail {
    Loading,
    Missing,
    Ready(Course),
}

#[component]
pub fn CoursePage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let params = use_params_map();
    let course_id = Memo::new(move |_| routes::parse_id(params.read().get("id")));
    let detail = RwSignal::new(Detail::Loading);
    let comments = RwSignal::new(Vec::<Comment>::new());
    let notices = ctx.notices;

    let api = ctx.api.clone();
    let load_token = token.clone();
    Effect::new(move |_| {
        let Some(id) = course_id.get() else {
            detail.set(Detail::Missing);
            return;
        };
        detail.set(Detail::Loading);
        comments.set(Vec::new());
        let api = api.clone();
        spawn_in_view(
            &load_token,
            async move {
                let course = api::fetch_course(&api, id).await?;
                let list = api::list_comments(&api, id).await?;
                Ok::<_, ApiError>((course, list))
            },
            move |result| {
                if course_id.get_untracked() != Some(id) {
                    return;
                }
                match result {
                    Ok((course, list)) => {
                        comments.set(list);
                        detail.set(Detail::Ready(course));
                    }
                    Err(e) => {
                        if e.status() != Some(404) {
                            report_failure(notices, LOAD_FAILED, &e);
                        }
                        detail.set(Detail::Missing);
                    }
                }
            },
        );
    });

    let body_ctx = ctx.clone();

    view! {
        <section class="course">
            {move || match detail.get() {
                Detail::Loading => view! { <p>"Carregando..."</p> }.into_any(),
                Detail::Missing => view! { <p class="course__missing">"Curso não encontrado."</p> }.into_any(),
                Detail::Ready(course) => {
                    let facts = course_facts(&course);
                    let institution = course.institution_id.map(|inst_id| {
                        let label = course.institution_name.clone().unwrap_or_else(|| "Ver instituição".to_owned());
                        view! { <A href=routes::institution(inst_id)>{label}</A> }
                    });
                    view! {
                        <header class="course__header">
                            <h1>{course.name.clone()}</h1>
                            {institution}
                            <BookmarkButton ctx=body_ctx.clone() course_id=course.id/>
                        </header>
                        <p class="course__description">{course.description.clone().unwrap_or_default()}</p>
                        <dl class="course__facts">
                            {facts
                                .into_iter()
                                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                .collect::<Vec<_>>()}
                        </dl>
                        <h2>"Comentários"</h2>
                        <CommentList comments=comments/>
                        <CommentForm ctx=body_ctx.clone() course_id=course.id comments=comments token=token.clone()/>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// Labelled optional attributes, in display order.
fn course_facts(course: &Course) -> Vec<(&'static str, String)> {
    [
        ("Área", &course.area),
        ("Modalidade", &course.modality),
        ("Duração", &course.duration),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (label, v.to_owned()))
    })
    .collect()
}

#[component]
fn CommentForm(ctx: AppContext, course_id: i64, comments: RwSignal<Vec<Comment>>, token: CancelToken) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let session = ctx.session;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let api = ctx.api.clone();
        let notices = ctx.notices;
        let raw = draft.get_untracked();
        busy.set(true);
        spawn_in_view(
            &token,
            async move { submit_comment(&api, course_id, &raw).await },
            move |result| {
                match result {
                    Ok(list) => {
                        comments.set(list);
                        draft.set(String::new());
                    }
                    Err(CommentError::Invalid(message)) => notices.warn(message),
                    Err(CommentError::Api(e)) => report_failure(notices, COMMENT_FAILED, &e),
                }
                busy.set(false);
            },
        );
    };

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! {
                <p class="comment-form__signin">
                    <A href=routes::SIGN_IN>"Entre"</A>
                    " para deixar um comentário."
                </p>
            }
        >
            <form class="comment-form" on:submit=on_submit.clone()>
                <textarea
                    class="comment-form__input"
                    placeholder="Conte o que achou do curso"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Comentar"
                </button>
            </form>
        </Show>
    }
}
