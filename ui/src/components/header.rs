//! Header component

use docquery::Route as Page;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::follow;
use crate::state::AppState;

const PRODUCT_NAME: &str = "DocQuery: Intelligent Document Insights";
const NAV_LINKS: [Page; 3] = [Page::Home, Page::About, Page::Help];

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let is_auth = state.authenticated;

    view! {
        <header class="header h-16 sticky top-0 z-40">
            <div class="h-full max-w-7xl mx-auto px-4 flex items-center justify-between">
                // Logo
                <a href=Page::Home.path() class="logo hover:opacity-80 transition-opacity">
                    <h1 class="text-xl font-bold text-gradient">{PRODUCT_NAME}</h1>
                </a>

                // Navigation
                <nav class="flex items-center gap-2">
                    {NAV_LINKS
                        .into_iter()
                        .map(|page| view! {
                            <a href=page.path() class="btn btn-ghost">{page.title()}</a>
                        })
                        .collect::<Vec<_>>()}

                    <Show when=move || !is_auth.get()>
                        <a href=Page::SignIn.path() class="btn btn-primary">"Sign In"</a>
                    </Show>
                    <button
                        on:click=move |_| follow(navigate.clone(), state.sign_out())
                        class="btn btn-ghost"
                    >
                        "Log Out"
                    </button>
                </nav>
            </div>
        </header>
    }
}
