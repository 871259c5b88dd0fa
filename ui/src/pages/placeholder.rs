//! Pages that only exist as navigation targets for now

use docquery::Route as Page;
use leptos::prelude::*;

use crate::components::{Footer, Header};

#[component]
pub fn PlaceholderPage(page: Page) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <section class="flex-1 flex items-center justify-center px-4">
                <div class="text-center">
                    <h1 class="text-4xl font-bold mb-4">{page.title()}</h1>
                    <p class="text-slate-400 mb-8">"This page is coming soon."</p>
                    <a href=Page::Home.path() class="btn btn-primary">"Back to Dashboard"</a>
                </div>
            </section>
            <Footer />
        </div>
    }
}
