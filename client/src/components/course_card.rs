//! Course summary card with a bookmark toggle.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::net::types::Course;
use crate::routes;

#[cfg(feature = "hydrate")]
const BOOKMARK_SYNC_FAILED: &str = "Não foi possível atualizar seus cursos salvos.";

#[component]
pub fn CourseCard(ctx: AppContext, course: Course) -> impl IntoView {
    let course_id = course.id;
    let bookmarks = ctx.bookmarks;
    let is_saved = move || bookmarks.contains(course_id);
    let subtitle = course
        .institution_name
        .clone()
        .or_else(|| course.area.clone())
        .unwrap_or_default();

    view! {
        <article class="course-card">
            <A href=routes::course(course_id) attr:class="course-card__link">
                <h3 class="course-card__name">{course.name.clone()}</h3>
                <p class="course-card__subtitle">{subtitle}</p>
            </A>
            <BookmarkButton ctx=ctx course_id=course_id/>
            <Show when=is_saved>
                <span class="course-card__badge">"Salvo"</span>
            </Show>
        </article>
    }
}

/// Toggle a bookmark locally, then sync it for signed-in users.
#[component]
pub fn BookmarkButton(ctx: AppContext, course_id: i64) -> impl IntoView {
    let bookmarks = ctx.bookmarks;
    let on_click = move |_| toggle_bookmark(&ctx, course_id);

    view! {
        <button class="btn course-card__bookmark" on:click=on_click>
            {move || if bookmarks.contains(course_id) { "Remover dos salvos" } else { "Salvar curso" }}
        </button>
    }
}

/// Flip the bookmark; on backend failure revert and report.
pub fn toggle_bookmark(ctx: &AppContext, course_id: i64) {
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let saved = ctx.bookmarks.toggle(course_id);
    if !ctx.session.snapshot_untracked().is_authenticated() {
        return;
    }

    #[cfg(feature = "hydrate")]
    {
        let AppContext { api, bookmarks, notices, .. } = ctx.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::state::bookmarks::sync_bookmark(&api, course_id, saved).await {
                bookmarks.set(course_id, !saved);
                crate::state::notice::report_failure(notices, BOOKMARK_SYNC_FAILED, &e);
            }
        });
    }
}
