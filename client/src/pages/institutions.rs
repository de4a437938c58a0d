//! Institution directory (`/instituicoes`).

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::net::api;
use crate::net::types::Institution;
use crate::routes;
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};

const LOAD_FAILED: &str = "Não foi possível carregar as instituições.";

#[component]
pub fn InstitutionsPage(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let institutions = RwSignal::new(None::<Vec<Institution>>);
    let notices = ctx.notices;

    let api = ctx.api.clone();
    spawn_in_view(
        &token,
        async move { api::list_institutions(&api).await },
        move |result| match result {
            Ok(list) => institutions.set(Some(list)),
            Err(e) => {
                report_failure(notices, LOAD_FAILED, &e);
                institutions.set(Some(Vec::new()));
            }
        },
    );

    view! {
        <section class="institutions">
            <h1>"Instituições"</h1>
            {move || match institutions.get() {
                None => view! { <p>"Carregando..."</p> }.into_any(),
                Some(list) if list.is_empty() => {
                    view! { <p class="institutions__empty">"Nenhuma instituição cadastrada."</p> }.into_any()
                }
                Some(list) => view! {
                    <ul class="institution-list">
                        {list
                            .into_iter()
                            .map(|inst| {
                                let location = inst.location().unwrap_or_default();
                                view! {
                                    <li class="institution-list__item">
                                        <A href=routes::institution(inst.id)>{inst.name}</A>
                                        <span class="institution-list__location">{location}</span>
                                    </li>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </ul>
                }
                .into_any(),
            }}
        </section>
    }
}
