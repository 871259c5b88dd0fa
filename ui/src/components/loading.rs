//! Busy indicators

use leptos::prelude::*;

/// Ring spinner placed before a button label while its request is outstanding
#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <span
            class="inline-block w-4 h-4 mr-2 rounded-full border-2 border-current border-t-transparent animate-spin align-middle"
            role="status"
            aria-label="Working"
        ></span>
    }
}

/// Stands in for the answer while `/ask` is outstanding
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="self-start flex items-center gap-2 px-4 py-3 rounded-2xl bg-slate-800 text-slate-400 text-sm message-appear">
            <span>"Reading your document"</span>
            <span class="flex gap-1" aria-hidden="true">
                {(1..=3)
                    .map(|i| view! {
                        <span class=format!("w-1.5 h-1.5 rounded-full bg-slate-400 dot-bounce-{}", i)></span>
                    })
                    .collect::<Vec<_>>()}
            </span>
        </div>
    }
}
