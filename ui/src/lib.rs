//! DocQuery web client
//!
//! A Leptos front-end for the DocQuery backend: sign up, sign in, upload a
//! document and ask questions about it. Page state lives in the `docquery`
//! flow types; this crate renders them and talks to the backend over fetch.

pub mod api;
pub mod components;
pub mod pages;
pub mod state;

use docquery::{Access, Navigation, Route as Page};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path, NavigateOptions,
};

use pages::{
    home::HomePage, placeholder::PlaceholderPage, query::QueryPage, signin::SignInPage,
    signup::SignUpPage, upload::UploadPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app_state = AppState::new();
    provide_context(app_state);

    view! {
        <Title text="DocQuery" />
        <Router>
            <main class="min-h-screen bg-slate-900 text-slate-100">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/signup") view=SignUpPage />
                    <Route path=path!("/signin") view=SignInPage />
                    <Route
                        path=path!("/main")
                        view=|| view! { <Protected page=Page::Upload><UploadPage /></Protected> }
                    />
                    <Route
                        path=path!("/query")
                        view=|| view! { <Protected page=Page::Query><QueryPage /></Protected> }
                    />
                    <Route path=path!("/about") view=|| view! { <PlaceholderPage page=Page::About /> } />
                    <Route path=path!("/help") view=|| view! { <PlaceholderPage page=Page::Help /> } />
                    <Route path=path!("/privacy") view=|| view! { <PlaceholderPage page=Page::Privacy /> } />
                    <Route path=path!("/terms") view=|| view! { <PlaceholderPage page=Page::Terms /> } />
                    <Route path=path!("/contact") view=|| view! { <PlaceholderPage page=Page::Contact /> } />
                </Routes>
            </main>
        </Router>
    }
}

/// Renders `children` only while the session may see `page`; otherwise
/// replaces the history entry with the sign-in page.
#[component]
fn Protected(page: Page, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<AppState>();

    move || {
        state.authenticated.track();
        match state.gate().check(page) {
            Access::Allow => children().into_any(),
            Access::Redirect(nav) => view! {
                <Redirect
                    path=nav.to.path()
                    options=NavigateOptions { replace: nav.replace, ..Default::default() }
                />
            }
            .into_any(),
        }
    }
}

/// Carry out a [`Navigation`] with the router, waiting first when it asks to.
///
/// `navigate` must come from `use_navigate` called while the page was built.
pub fn follow<N>(navigate: N, nav: Navigation)
where
    N: Fn(&str, NavigateOptions) + 'static,
{
    let options = NavigateOptions {
        replace: nav.replace,
        ..Default::default()
    };

    match nav.delay {
        None => navigate(nav.to.path(), options),
        Some(delay) => spawn_local(async move {
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::future::TimeoutFuture::new(millis).await;
            navigate(nav.to.path(), options);
        }),
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-slate-500 mb-4">"404"</h1>
                <p class="text-xl text-slate-400 mb-8">"Page not found"</p>
                <a
                    href=Page::Home.path()
                    class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
                >
                    "Go Home"
                </a>
            </div>
        </div>
    }
}
