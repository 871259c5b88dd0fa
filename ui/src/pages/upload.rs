//! Upload page, mounted at `/main`

use docquery::upload::{accept_attribute, UploadState};
use docquery::{DocQueryApi, Route as Page};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::api::read_document;
use crate::components::{Footer, Header, Notice, NoticeKind, Spinner};
use crate::follow;
use crate::state::AppState;

#[component]
pub fn UploadPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let upload = RwSignal::new(UploadState::new());
    let read_error = RwSignal::new(Option::<String>::None);

    let is_uploading = Signal::derive(move || upload.with(|u| u.is_uploading()));
    let can_upload = Signal::derive(move || upload.with(|u| u.can_submit()));
    let can_continue = Signal::derive(move || upload.with(|u| u.can_continue()));
    let file_name = Signal::derive(move || upload.with(|u| u.file().map(|d| d.name.clone())));
    let message = Signal::derive(move || {
        read_error
            .get()
            .or_else(|| upload.with(|u| Some(u.message().to_string())))
    });
    let kind = Signal::derive(move || {
        if read_error.with(Option::is_none) && upload.with(|u| u.succeeded()) {
            NoticeKind::Success
        } else {
            NoticeKind::Error
        }
    });

    let on_file_change = move |ev: web_sys::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };

        spawn_local(async move {
            match read_document(file).await {
                Ok(document) => {
                    read_error.set(None);
                    upload.update(|u| u.select_file(document));
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    read_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let on_upload = {
        let state = state.clone();
        move |_| {
            let Some(Ok(job)) = upload.try_update(|u| u.begin_submit(&state.session)) else {
                return;
            };
            let api = state.api.clone();
            spawn_local(async move {
                let outcome = api.upload(&job.token, &job.document).await;
                upload.update(|u| u.finish(outcome));
            });
        }
    };

    let on_continue = move |_| {
        if let Some(nav) = upload.with_untracked(|u| u.continue_to()) {
            follow(navigate.clone(), nav);
        }
    };

    view! {
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="auth-container flex-1">
                <div class="w-full max-w-lg px-4">
                    <div class="auth-card">
                        <div class="auth-header">
                            <h1 class="auth-title text-gradient">{Page::Upload.title()}</h1>
                            <p class="auth-subtitle">"PDF, DOCX or TXT"</p>
                        </div>

                        <Notice message=message kind=kind />

                        <div class="auth-form">
                            <label class="auth-input-group cursor-pointer">
                                <span class="auth-label">"Document"</span>
                                <input
                                    type="file"
                                    accept=accept_attribute()
                                    on:change=on_file_change
                                    disabled=move || is_uploading.get()
                                    class="input"
                                />
                            </label>

                            {move || file_name.get().map(|name| view! {
                                <p class="text-sm text-slate-400">"Selected: " {name}</p>
                            })}

                            <button
                                on:click=on_upload
                                disabled=move || !can_upload.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || is_uploading.get()>
                                    <Spinner />
                                </Show>
                                {move || if is_uploading.get() { "Uploading..." } else { "Upload" }}
                            </button>

                            <div class="flex gap-3">
                                <a href=Page::Home.path() class="btn btn-ghost flex-1 py-3 text-center">
                                    "Back"
                                </a>
                                <Show when=move || can_continue.get()>
                                    <button
                                        on:click=on_continue.clone()
                                        class="btn btn-primary flex-1 py-3"
                                    >
                                        "Continue"
                                    </button>
                                </Show>
                            </div>
                        </div>
                    </div>
                </div>
            </main>

            <Footer />
        </div>
    }
}
