//! Query page - ask questions about the uploaded document

use docquery::{DocQueryApi, QueryState, Route as Page};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::components::{
    ChatInput, ChatMessage, FailedMessage, Footer, Header, Notice, NoticeKind, PendingMessage,
};
use crate::state::AppState;

#[component]
pub fn QueryPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    let query = RwSignal::new(QueryState::new());
    // Local refusals (empty question) are not part of the transcript
    let local_error = RwSignal::new(Option::<String>::None);
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    let is_loading = Signal::derive(move || query.with(|q| q.is_loading()));
    let input = Signal::derive(move || query.with(|q| q.input.clone()));

    let scroll_to_bottom = move || {
        if let Some(el) = messages_end_ref.get_untracked() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    };

    // Follow the transcript as it grows
    Effect::new(move |_| {
        query.track();
        scroll_to_bottom();
    });

    let send = move || {
        let request = match query.try_update(|q| q.begin_ask()) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                local_error.set(Some(e.to_string()));
                return;
            }
            None => return,
        };
        local_error.set(None);

        let api = state.api.clone();
        spawn_local(async move {
            let outcome = api.ask(&request).await;
            query.update(|q| {
                let _ = q.finish(outcome);
            });
        });
    };

    view! {
        <div class="h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="flex-1 flex flex-col max-w-4xl w-full mx-auto overflow-hidden">
                <h1 class="text-2xl font-bold px-4 pt-6 pb-2">{Page::Query.title()}</h1>

                <div class="flex-1 overflow-y-auto px-4 py-6 flex flex-col gap-6">
                    <Show when=move || query.with(|q| q.history().is_empty() && !q.is_loading())>
                        <p class="text-center text-slate-500 mt-12">
                            "Ask anything about the document you uploaded."
                        </p>
                    </Show>

                    <For
                        each=move || query.with(|q| q.history().iter().cloned().enumerate().collect::<Vec<_>>())
                        key=|(i, _)| *i
                        children=|(_, turn)| view! { <ChatMessage turn=turn /> }
                    />

                    {move || query.with(|q| q.pending_question().map(|question| view! {
                        <PendingMessage question=question.to_string() />
                    }))}

                    {move || query.with(|q| q.failed().cloned().map(|failed| view! {
                        <FailedMessage failed=failed />
                    }))}

                    <div node_ref=messages_end_ref></div>
                </div>

                <div class="px-4">
                    <Notice message=local_error kind=NoticeKind::Error />
                </div>

                <ChatInput
                    value=input
                    on_input=move |value| query.update(|q| q.input = value)
                    on_submit=send
                    disabled=is_loading
                    placeholder="Type your question..."
                />
            </main>

            <Footer />
        </div>
    }
}
