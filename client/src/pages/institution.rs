//! Institution detail (`/instituicao/:id`) with its course list.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::AppContext;
use crate::components::course_card::CourseCard;
use crate::net::api;
use crate::net::types::{Course, Institution};
use crate::routes;
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};

const LOAD_FAILED: &str = "Não foi possível carregar a instituição.";

#[derive(Clone, Debug, PartialEq)]
enum Detail {
    Loading,
    Missing,
    Ready(Institution, Vec<Course>),
}

#[component]
pub fn InstitutionPage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let params = use_params_map();
    let institution_id = Memo::new(move |_| routes::parse_id(params.read().get("id")));
    let detail = RwSignal::new(Detail::Loading);
    let notices = ctx.notices;

    let api = ctx.api.clone();
    Effect::new(move |_| {
        let Some(id) = institution_id.get() else {
            detail.set(Detail::Missing);
            return;
        };
        detail.set(Detail::Loading);
        let api = api.clone();
        spawn_in_view(
            &token,
            async move {
                let institution = api::fetch_institution(&api, id).await?;
                let courses = api::institution_courses(&api, id).await?;
                Ok::<_, crate::error::ApiError>((institution, courses))
            },
            move |result| {
                // The route may have moved on to another id.
                if institution_id.get_untracked() != Some(id) {
                    return;
                }
                match result {
                    Ok((institution, courses)) => detail.set(Detail::Ready(institution, courses)),
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

    let grid_ctx = ctx.clone();

    view! {
        <section class="institution">
            {move || match detail.get() {
                Detail::Loading => view! { <p>"Carregando..."</p> }.into_any(),
                Detail::Missing => view! { <p class="institution__missing">"Instituição não encontrada."</p> }.into_any(),
                Detail::Ready(inst, courses) => {
                    let location = inst.location().unwrap_or_default();
                    let website = inst.website.clone();
                    let cards = courses
                        .into_iter()
                        .map(|course| view! { <CourseCard ctx=grid_ctx.clone() course=course/> })
                        .collect::<Vec<_>>();
                    view! {
                        <header class="institution__header">
                            <h1>{inst.name.clone()}</h1>
                            <p class="institution__location">{location}</p>
                            {website.map(|url| view! { <a class="institution__site" href=url.clone() target="_blank">{url.clone()}</a> })}
                        </header>
                        <p class="institution__description">{inst.description.clone().unwrap_or_default()}</p>
                        <h2>"Cursos"</h2>
                        <div class="course-grid">{cards}</div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
