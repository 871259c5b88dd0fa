//! Sign-up page

use docquery::auth::SignUpForm;
use docquery::{AuthPhase, DocQueryApi, Route as Page, SignUpFlow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::{Footer, Header, Notice, NoticeKind, Spinner};
use crate::follow;
use crate::state::AppState;

#[component]
pub fn SignUpPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let navigate = use_navigate();

    let flow = RwSignal::new(SignUpFlow::new(state.signup_redirect_delay()));
    let is_loading = Signal::derive(move || flow.with(|f| f.phase() == AuthPhase::Submitting));
    let locked = Signal::derive(move || flow.with(|f| !f.phase().is_editable()));
    let can_submit = Signal::derive(move || flow.with(|f| f.can_submit()));
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

        // Validation failures are shown by the flow itself
        let Some(Ok(request)) = flow.try_update(|f| f.begin_submit()) else {
            return;
        };
        let api = state.api.clone();
        let navigate = navigate.clone();

        spawn_local(async move {
            let outcome = api.signup(&request).await;
            if let Some(Ok(nav)) = flow.try_update(|f| f.finish(outcome)) {
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
                            <h1 class="auth-title text-gradient">"Create Account"</h1>
                            <p class="auth-subtitle">"Sign up to start asking your documents questions"</p>
                        </div>

                        <Notice message=message kind=kind />

                        <form on:submit=on_submit class="auth-form">
                            <Field
                                flow=flow
                                label="Full Name"
                                input_type="text"
                                placeholder="Your name"
                                get=|f: &SignUpForm| f.full_name.clone()
                                set=|f: &mut SignUpForm, v| { f.full_name = v }
                                locked=locked
                            />
                            <Field
                                flow=flow
                                label="Email"
                                input_type="email"
                                placeholder="you@example.com"
                                get=|f: &SignUpForm| f.email.clone()
                                set=|f: &mut SignUpForm, v| { f.email = v }
                                locked=locked
                            />
                            <Field
                                flow=flow
                                label="Password"
                                input_type="password"
                                placeholder="••••••••"
                                get=|f: &SignUpForm| f.password.clone()
                                set=|f: &mut SignUpForm, v| { f.password = v }
                                locked=locked
                            />
                            <Field
                                flow=flow
                                label="Confirm Password"
                                input_type="password"
                                placeholder="••••••••"
                                get=|f: &SignUpForm| f.confirm_password.clone()
                                set=|f: &mut SignUpForm, v| { f.confirm_password = v }
                                locked=locked
                            />

                            <button
                                type="submit"
                                disabled=move || !can_submit.get()
                                class="btn btn-primary w-full py-3"
                            >
                                <Show when=move || is_loading.get()>
                                    <Spinner />
                                </Show>
                                "Sign Up"
                            </button>
                        </form>

                        <div class="auth-footer">
                            "Already have an account? "
                            <a href=Page::SignIn.path() class="auth-link">"Sign in"</a>
                        </div>
                    </div>
                </div>
            </main>

            <Footer />
        </div>
    }
}

/// One labelled input bound to a field of the sign-up form.
#[component]
fn Field(
    flow: RwSignal<SignUpFlow>,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    get: fn(&SignUpForm) -> String,
    set: fn(&mut SignUpForm, String),
    locked: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="auth-input-group">
            <label class="auth-label">{label}</label>
            <input
                type=input_type
                prop:value=move || flow.with(|f| get(&f.form))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    flow.update(|f| f.edit(|form| set(form, value)));
                }
                placeholder=placeholder
                disabled=move || locked.get()
                class="input"
            />
        </div>
    }
}
