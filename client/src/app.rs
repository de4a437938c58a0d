//! Root application component with routing and the shared view context.
//!
//! ARCHITECTURE
//! ============
//! `AppContext` bundles the session, notices, bookmarks, navigator and the
//! HTTP client, and is handed to every page as a prop. The client is built
//! with its auth failure handler already installed, so no request can leave
//! before a rejected session has somewhere to go.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::redirect_listener::RedirectListener;
use crate::components::toaster::Toaster;
use crate::config::ClientConfig;
use crate::net::http::ApiClient;
use crate::pages::{
    admin::AdminPage, course::CoursePage, home::HomePage, institution::InstitutionPage,
    institutions::InstitutionsPage, login::LoginPage, not_found::NotFoundPage, profile::ProfilePage,
    register::RegisterPage,
};
use crate::state::bookmarks::{Bookmarks, pull_saved_courses};
use crate::state::navigation::Navigator;
use crate::state::notice::Notices;
use crate::state::session::{Session, SessionExpiry};
use crate::util::cancel::{CancelToken, spawn_in_view};
use crate::util::guard::RequireAuth;

/// Everything a view needs, passed explicitly.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: Session,
    pub notices: Notices,
    pub bookmarks: Bookmarks,
    pub navigator: Navigator,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(ApiClient::browser(config))
    }

    /// Wire the shared state around `api`, installing the session expiry
    /// handler before the client is handed out.
    pub fn with_client(api: ApiClient) -> Self {
        let session = Session::new();
        let notices = Notices::new();
        let navigator = Navigator::new();
        let bookmarks = Bookmarks::load();
        let api = api.with_auth_failure_handler(Arc::new(SessionExpiry::new(session, bookmarks, notices, navigator)));
        Self { api, session, notices, bookmarks, navigator }
    }

    /// Mount-time identity check; signed-in users then get their saved courses.
    pub async fn start(&self) {
        self.session.identify(&self.api).await;
        self.pull_bookmarks().await;
    }

    /// Re-read the identity after a sign-in and adopt that user's saved
    /// courses.
    pub async fn refresh_signed_in(&self) {
        self.session.refresh(&self.api).await;
        self.pull_bookmarks().await;
    }

    /// Backend logout, then drop the identity and the previous user's
    /// bookmarks whatever the backend answered.
    pub async fn sign_out(&self) {
        self.session.logout(&self.api).await;
        self.bookmarks.clear();
    }

    async fn pull_bookmarks(&self) {
        if !self.session.snapshot_untracked().is_authenticated() {
            return;
        }
        if let Err(e) = pull_saved_courses(&self.api, self.bookmarks).await {
            leptos::logging::warn!("saved course sync failed: {e}");
        }
    }
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = AppContext::new(ClientConfig::from_build_env());
    let boot = ctx.clone();
    spawn_in_view(&CancelToken::for_view(), async move { boot.start().await }, |()| {});

    let session = ctx.session;
    let routes_ctx = ctx.clone();

    view! {
        <Stylesheet id="leptos" href="/pkg/buddie.css"/>
        <Title text="Buddie"/>

        <Router>
            <RedirectListener navigator=ctx.navigator/>
            <NavBar ctx=ctx.clone()/>
            <Toaster notices=ctx.notices/>
            <main class="app-main">
                <Show
                    when=move || !session.is_loading()
                    fallback=|| view! { <p class="app-loading">"Carregando..."</p> }
                >
                    <AppRoutes ctx=routes_ctx.clone()/>
                </Show>
            </main>
        </Router>
    }
}

#[component]
fn AppRoutes(ctx: AppContext) -> impl IntoView {
    let home = ctx.clone();
    let login = ctx.clone();
    let register = ctx.clone();
    let institutions = ctx.clone();
    let institution = ctx.clone();
    let course = ctx.clone();
    let profile = ctx.clone();
    let admin = ctx;

    view! {
        <Routes fallback=|| view! { <NotFoundPage/> }>
            <Route path=StaticSegment("") view=move || view! { <HomePage ctx=home.clone()/> }/>
            <Route path=StaticSegment("entrar") view=move || view! { <LoginPage ctx=login.clone()/> }/>
            <Route path=StaticSegment("cadastro") view=move || view! { <RegisterPage ctx=register.clone()/> }/>
            <Route
                path=StaticSegment("instituicoes")
                view=move || view! { <InstitutionsPage ctx=institutions.clone()/> }
            />
            <Route
                path=(StaticSegment("instituicao"), ParamSegment("id"))
                view=move || view! { <InstitutionPage ctx=institution.clone()/> }
            />
            <Route
                path=(StaticSegment("curso"), ParamSegment("id"))
                view=move || view! { <CoursePage ctx=course.clone()/> }
            />
            <Route
                path=StaticSegment("perfil")
                view=move || {
                    let page = profile.clone();
                    view! {
                        <RequireAuth session=page.session>
                            <ProfilePage ctx=page.clone()/>
                        </RequireAuth>
                    }
                }
            />
            <Route
                path=StaticSegment("admin")
                view=move || {
                    let page = admin.clone();
                    view! {
                        <RequireAuth session=page.session admin=true>
                            <AdminPage ctx=page.clone()/>
                        </RequireAuth>
                    }
                }
            />
        </Routes>
    }
}
