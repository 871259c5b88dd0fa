//! Sign-in page

use docquery::{AuthPhase, DocQueryApi, Route as Page, SignInFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::{Footer, Header, Notice, NoticeKind, Spinner};
use crate::follow;
use crate::state::AppState;

#[component]
pub fn SignInPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let flow = RwSignal::new(SignInFlow::new());
    let is_loading = Signal::derive(move || flow.with(|f| f.phase() == AuthPhase::Submitting));
    let locked = Signal::derive(move || flow.with(|f| !f.phase().is_editable()));
    let message = Signal::derive(move || flow.with(|f| f.message().map(str::to_string)));
    let kind = Signal::derive(move || {
        if flow.with(|f| f.phase() == AuthPhase::Succeeded) {
            NoticeKind::Success
        } else {
            NoticeKind::Error
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(Ok(request)) = flow.try_update(|f| f.begin_submit()) else {
            return;
        };
        let state = state.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let outcome = state.api.token(&request).await;
            let nav = flow.try_update(|f| f.finish(outcome, &state.session));
            state.sync_auth();
            if let Some(Ok(nav)) = nav {
                follow(navigate, nav);
            }
        });
    };

    view! {
        <div class="min-h-screen flex flex-col bg-[var(--bg-primary)]">
            <Header />

            <main class="auth-container flex-1">
                <div class="w-full max-w-md px-4">
                    <div class="auth-card">
                        <div class="auth-header">
                            <h1 class="auth-title text-gradient">"Welcome Back"</h1>
                            <p class="auth-subtitle">"Sign in to continue"</p>
                        </div>

                        <Notice message=message kind=kind />

                        <form on:submit=on_submit class="auth-form">
                            <div class="auth-input-group">
                                <label class="auth-label">"Username or Email"</label>
                                <input
                                    type="text"
                                    prop:value=move || flow.with(|f| f.form.username_or_email.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        flow.update(|f| f.edit(|form| form.username_or_email = value));
                                    }
                                    placeholder="you@example.com"
                                    disabled=move || locked.get()
                                    class="input"
                                />
                            </div>

                            <div class="auth-input-group">
                                <label class="auth-label">"Password"</label>
                                <input
                                    type="password"
                                    prop:value=move || flow.with(|f| f.form.password.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        flow.update(|f| f.edit(|form| form.password = value));
                                    }
                                    placeholder="••••••••"
                                    disabled=move || locked.get()
                                    class="input"
                                />
                            </div>

                            <button
                                type="submit"
                                disabled=move || locked.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || is_loading.get()>
                                    <Spinner />
                                </Show>
                                "Sign In"
                            </button>
                        </form>

                        <div class="auth-footer">
                            "Don't have an account? "
                            <a href=Page::SignUp.path() class="auth-link">"Sign up"</a>
                        </div>
                    </div>
                </div>
            </main>

            <Footer />
        </div>
    }
}
