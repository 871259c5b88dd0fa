//! Footer component

use docquery::Route as Page;
use leptos::prelude::*;

const FOOTER_LINKS: [Page; 3] = [Page::Privacy, Page::Terms, Page::Contact];

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <footer class="border-t border-slate-800 py-6 text-sm text-slate-500">
            <div class="max-w-7xl mx-auto px-4 flex items-center justify-between">
                <span>{format!("© {} DocQuery. All rights reserved.", year)}</span>
                <nav class="flex gap-4">
                    {FOOTER_LINKS
                        .into_iter()
                        .map(|page| view! {
                            <a href=page.path() class="hover:text-slate-300 transition-colors">
                                {page.title()}
                            </a>
                        })
                        .collect::<Vec<_>>()}
                </nav>
            </div>
        </footer>
    }
}
