//! Landing page (`/`): course catalogue with a search box.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::app::AppContext;
use crate::components::course_card::CourseCard;
use crate::net::api;
use crate::net::types::Course;
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::validate::{SEARCH_MIN_CHARS, search_query};

const LOAD_FAILED: &str = "Não foi possível carregar os cursos.";

/// Heading above the course grid.
fn results_heading(query: Option<&str>, count: usize) -> String {
    match (query, count) {
        (None, _) => "Cursos em destaque".to_owned(),
        (Some(q), 0) => format!("Nenhum curso encontrado para \"{q}\""),
        (Some(q), 1) => format!("1 curso encontrado para \"{q}\""),
        (Some(q), n) => format!("{n} cursos encontrados para \"{q}\""),
    }
}

#[component]
pub fn HomePage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let courses = RwSignal::new(None::<Vec<Course>>);
    let input = RwSignal::new(String::new());
    let active_query = RwSignal::new(None::<String>);
    // Bumped per request so a slow earlier search cannot overwrite a newer one.
    let generation = StoredValue::new(0_u64);
    let notices = ctx.notices;

    let run = {
        let api = ctx.api.clone();
        let token = token.clone();
        move |query: Option<String>| {
            let ticket = generation.get_value() + 1;
            generation.set_value(ticket);
            courses.set(None);
            active_query.set(query.clone());
            let api = api.clone();
            spawn_in_view(
                &token,
                async move {
                    match query {
                        Some(q) => api::search_courses(&api, &q).await,
                        None => api::list_courses(&api).await,
                    }
                },
                move |result| {
                    if generation.get_value() != ticket {
                        return;
                    }
                    match result {
                        Ok(list) => courses.set(Some(list)),
                        Err(e) => {
                            report_failure(notices, LOAD_FAILED, &e);
                            courses.set(Some(Vec::new()));
                        }
                    }
                },
            );
        }
    };
    run(None);

    let on_search = {
        let run = run.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let raw = input.get_untracked();
            if raw.trim().is_empty() {
                run(None);
                return;
            }
            match search_query(&raw) {
                Some(q) => run(Some(q)),
                None => notices.info(format!("Digite ao menos {SEARCH_MIN_CHARS} letras para buscar.")),
            }
        }
    };

    let grid_ctx = ctx.clone();

    view! {
        <section class="home">
            <header class="home__hero">
                <h1>"Encontre o curso certo para você"</h1>
                <form class="home__search" on:submit=on_search>
                    <input
                        class="home__search-input"
                        type="search"
                        placeholder="Buscar cursos"
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit">"Buscar"</button>
                </form>
            </header>
            {move || match courses.get() {
                None => view! { <p class="home__loading">"Carregando cursos..."</p> }.into_any(),
                Some(list) => {
                    let heading = results_heading(active_query.get().as_deref(), list.len());
                    let cards = list
                        .into_iter()
                        .map(|course| view! { <CourseCard ctx=grid_ctx.clone() course=course/> })
                        .collect::<Vec<_>>();
                    view! {
                        <h2 class="home__heading">{heading}</h2>
                        <div class="course-grid">{cards}</div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
