//! Admin console (`/admin`): user roles and the course catalogue.
//!
//! Only reachable through the admin guard. Every mutation goes straight to
//! the backend; the local tables are patched only after it accepts.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppContext;
use crate::net::api;
use crate::net::types::{Course, Identity, Institution, Role, UserSummary};
use crate::routes;
use crate::state::notice::report_failure;
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::validate::{CourseDraft, validate_course};

const USERS_LOAD_FAILED: &str = "Não foi possível carregar os usuários.";
const COURSES_LOAD_FAILED: &str = "Não foi possível carregar os cursos.";
const ROLE_FAILED: &str = "Não foi possível alterar o perfil do usuário.";
const DELETE_FAILED: &str = "Não foi possível remover o curso.";
const CREATE_FAILED: &str = "Não foi possível criar o curso.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum AdminTab {
    #[default]
    Users,
    Courses,
}

impl AdminTab {
    const ALL: [Self; 2] = [Self::Users, Self::Courses];

    fn label(self) -> &'static str {
        match self {
            Self::Users => "Usuários",
            Self::Courses => "Cursos",
        }
    }
}

/// Patch a confirmed role change into the table. Returns `false` when the
/// user is no longer listed.
fn apply_role_change(users: &mut [UserSummary], user_id: i64, role: Role) -> bool {
    match users.iter_mut().find(|u| u.id == user_id) {
        Some(user) => {
            user.role = role;
            true
        }
        None => false,
    }
}

/// Admins cannot demote themselves from this screen.
fn can_change_role(me: Option<&Identity>, user: &UserSummary) -> bool {
    me.and_then(Identity::id).is_none_or(|id| id != user.id.to_string())
}

#[component]
pub fn AdminPage(ctx: AppContext) -> impl IntoView {
    let tab = RwSignal::new(AdminTab::default());
    let body_ctx = ctx.clone();

    view! {
        <section class="admin">
            <h1>"Administração"</h1>
            <nav class="tabs">
                {AdminTab::ALL
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
                let ctx = body_ctx.clone();
                match tab.get() {
                    AdminTab::Users => view! { <UsersTab ctx=ctx/> }.into_any(),
                    AdminTab::Courses => view! { <CoursesTab ctx=ctx/> }.into_any(),
                }
            }}
        </section>
    }
}

// =============================================================================
// USERS
// =============================================================================

#[component]
fn UsersTab(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let users = RwSignal::new(None::<Vec<UserSummary>>);
    let notices = ctx.notices;
    let session = ctx.session;

    let api = ctx.api.clone();
    spawn_in_view(
        &token,
        async move { api::list_users(&api).await },
        move |result| match result {
            Ok(list) => users.set(Some(list)),
            Err(e) => {
                report_failure(notices, USERS_LOAD_FAILED, &e);
                users.set(Some(Vec::new()));
            }
        },
    );

    let toggle = move |user_id: i64, role: Role| {
        let api = ctx.api.clone();
        spawn_in_view(
            &token,
            async move { api::update_role(&api, user_id, role).await },
            move |result| match result {
                Ok(()) => users.update(|list| {
                    if let Some(list) = list {
                        apply_role_change(list, user_id, role);
                    }
                }),
                Err(e) => report_failure(notices, ROLE_FAILED, &e),
            },
        );
    };

    view! {
        {move || match users.get() {
            None => view! { <p>"Carregando..."</p> }.into_any(),
            Some(list) => {
                let me = session.identity();
                let rows = list
                    .into_iter()
                    .map(|user| {
                        let editable = can_change_role(me.as_ref(), &user);
                        let next = user.role.toggled();
                        let toggle = toggle.clone();
                        let action = if next == Role::Admin { "Tornar administrador" } else { "Tornar usuário" };
                        view! {
                            <tr>
                                <td>{user.username.clone()}</td>
                                <td>{user.email.clone().unwrap_or_default()}</td>
                                <td>{user.role.label()}</td>
                                <td>
                                    <button
                                        class="btn"
                                        disabled=!editable
                                        on:click=move |_| toggle(user.id, next)
                                    >
                                        {action}
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>();
                view! {
                    <table class="admin-table">
                        <thead>
                            <tr><th>"Usuário"</th><th>"E-mail"</th><th>"Perfil"</th><th></th></tr>
                        </thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            }
        }}
    }
}

// =============================================================================
// COURSES
// =============================================================================

#[component]
fn CoursesTab(ctx: AppContext) -> impl IntoView {
    let token = CancelToken::for_view();
    let courses = RwSignal::new(None::<Vec<Course>>);
    let institutions = RwSignal::new(Vec::<Institution>::new());
    let notices = ctx.notices;

    let reload = {
        let api = ctx.api.clone();
        let token = token.clone();
        move || {
            let api = api.clone();
            spawn_in_view(
                &token,
                async move { api::list_courses(&api).await },
                move |result| match result {
                    Ok(list) => courses.set(Some(list)),
                    Err(e) => {
                        report_failure(notices, COURSES_LOAD_FAILED, &e);
                        courses.set(Some(Vec::new()));
                    }
                },
            );
        }
    };
    reload();

    let api = ctx.api.clone();
    spawn_in_view(
        &token,
        async move { api::list_institutions(&api).await },
        move |result| match result {
            Ok(list) => institutions.set(list),
            Err(e) => leptos::logging::warn!("institution list for course form failed: {e}"),
        },
    );

    let remove = {
        let api = ctx.api.clone();
        let token = token.clone();
        move |course_id: i64| {
            let api = api.clone();
            spawn_in_view(
                &token,
                async move { api::delete_course(&api, course_id).await },
                move |result| match result {
                    Ok(()) => courses.update(|list| {
                        if let Some(list) = list {
                            list.retain(|c| c.id != course_id);
                        }
                    }),
                    Err(e) => report_failure(notices, DELETE_FAILED, &e),
                },
            );
        }
    };

    view! {
        <NewCourseForm ctx=ctx.clone() institutions=institutions token=token.clone() on_created=reload/>
        {move || match courses.get() {
            None => view! { <p>"Carregando..."</p> }.into_any(),
            Some(list) => {
                let rows = list
                    .into_iter()
                    .map(|course| {
                        let remove = remove.clone();
                        let id = course.id;
                        view! {
                            <tr>
                                <td><A href=routes::course(id)>{course.name}</A></td>
                                <td>{course.institution_name.unwrap_or_default()}</td>
                                <td>
                                    <button class="btn btn--danger" on:click=move |_| remove(id)>"Remover"</button>
                                </td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>();
                view! {
                    <table class="admin-table">
                        <thead><tr><th>"Curso"</th><th>"Instituição"</th><th></th></tr></thead>
                        <tbody>{rows}</tbody>
                    </table>
                }
                .into_any()
            }
        }}
    }
}

/// Free-text inputs of the new course form.
#[derive(Clone, Copy, Debug)]
enum DraftField {
    Name,
    Area,
    Modality,
    Duration,
    Description,
}

impl DraftField {
    fn of(self, draft: &CourseDraft) -> &String {
        match self {
            Self::Name => &draft.name,
            Self::Area => &draft.area,
            Self::Modality => &draft.modality,
            Self::Duration => &draft.duration,
            Self::Description => &draft.description,
        }
    }

    fn of_mut(self, draft: &mut CourseDraft) -> &mut String {
        match self {
            Self::Name => &mut draft.name,
            Self::Area => &mut draft.area,
            Self::Modality => &mut draft.modality,
            Self::Duration => &mut draft.duration,
            Self::Description => &mut draft.description,
        }
    }
}

#[component]
fn NewCourseForm<F>(
    ctx: AppContext,
    institutions: RwSignal<Vec<Institution>>,
    token: CancelToken,
    on_created: F,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let draft = RwSignal::new(CourseDraft::default());
    let busy = RwSignal::new(false);
    let notices = ctx.notices;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let course = match validate_course(&draft.get_untracked()) {
            Ok(course) => course,
            Err(message) => {
                notices.warn(message);
                return;
            }
        };
        busy.set(true);
        let api = ctx.api.clone();
        let on_created = on_created.clone();
        spawn_in_view(
            &token,
            async move { api::create_course(&api, &course).await },
            move |result| {
                match result {
                    Ok(()) => {
                        draft.set(CourseDraft::default());
                        notices.success("Curso criado.");
                        on_created();
                    }
                    Err(e) => report_failure(notices, CREATE_FAILED, &e),
                }
                busy.set(false);
            },
        );
    };

    let text_field = move |placeholder: &'static str, field: DraftField| {
        view! {
            <input
                class="admin-form__input"
                type="text"
                placeholder=placeholder
                prop:value=move || draft.with(|d| field.of(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| *field.of_mut(d) = value);
                }
            />
        }
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            <h2>"Novo curso"</h2>
            {text_field("Nome", DraftField::Name)}
            <select
                class="admin-form__input"
                prop:value=move || draft.with(|d| d.institution_id.clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.institution_id = value);
                }
            >
                <option value="">"Instituição"</option>
                {move || {
                    institutions
                        .get()
                        .into_iter()
                        .map(|inst| view! { <option value=inst.id.to_string()>{inst.name}</option> })
                        .collect::<Vec<_>>()
                }}
            </select>
            {text_field("Área", DraftField::Area)}
            {text_field("Modalidade", DraftField::Modality)}
            {text_field("Duração", DraftField::Duration)}
            <textarea
                class="admin-form__input"
                placeholder="Descrição"
                prop:value=move || draft.with(|d| DraftField::Description.of(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| *DraftField::Description.of_mut(d) = value);
                }
            ></textarea>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>"Criar curso"</button>
        </form>
    }
}
