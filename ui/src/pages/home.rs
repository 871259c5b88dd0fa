//! Home/landing page

use leptos::prelude::*;

use crate::components::{Footer, Header};
use crate::state::AppState;

/// Home page with hero section
#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Re-evaluated when the session changes
    let get_started = move || {
        state.authenticated.track();
        state.gate().get_started().path()
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <Header />

            // Hero section
            <section class="flex-1 flex items-center justify-center px-4 py-16">
                <div class="max-w-4xl mx-auto text-center">
                    <div class="mb-8 animate-fade-in">
                        <div class="w-24 h-24 mx-auto rounded-2xl bg-gradient-to-br from-blue-500 via-violet-500 to-purple-600
                                    flex items-center justify-center text-5xl shadow-2xl shadow-violet-500/25">
                            "📄"
                        </div>
                    </div>

                    <h1 class="text-5xl md:text-7xl font-bold mb-6 animate-slide-up">
                        <span class="gradient-text">"DocQuery"</span>
                    </h1>

                    <p class="text-xl md:text-2xl text-slate-400 mb-4 animate-slide-up" style="animation-delay: 0.1s">
                        "Intelligent Document Insights"
                    </p>

                    <p class="text-lg text-slate-500 mb-12 max-w-2xl mx-auto animate-slide-up" style="animation-delay: 0.2s">
                        "Upload a PDF, Word document or text file and ask questions about it. "
                        "Answers come from your document's own content."
                    </p>

                    <div class="flex flex-col sm:flex-row gap-4 justify-center animate-slide-up" style="animation-delay: 0.3s">
                        <a
                            href=get_started
                            class="px-8 py-4 bg-blue-600 hover:bg-blue-700 rounded-xl text-lg font-semibold
                                   transition-all hover:scale-105 hover:shadow-lg hover:shadow-blue-500/25"
                        >
                            "Get Started"
                        </a>
                    </div>
                </div>
            </section>

            // How it works
            <section class="py-20 px-4 bg-slate-800/50">
                <div class="max-w-6xl mx-auto">
                    <h2 class="text-3xl font-bold text-center mb-12">"How It Works"</h2>

                    <div class="grid md:grid-cols-3 gap-8">
                        <StepCard
                            icon="🔐"
                            title="Sign in"
                            description="Create an account once; your session is remembered on this device"
                        />
                        <StepCard
                            icon="📤"
                            title="Upload"
                            description="Send one PDF, DOCX or TXT document to be indexed"
                        />
                        <StepCard
                            icon="💬"
                            title="Ask"
                            description="Ask questions in plain language and keep the whole conversation in view"
                        />
                    </div>
                </div>
            </section>

            <Footer />
        </div>
    }
}

#[component]
fn StepCard(
    icon: &'static str,
    title: &'static str,
    description: &'static str,
) -> impl IntoView {
    view! {
        <div class="p-6 bg-slate-800 rounded-xl border border-slate-700 hover:border-slate-600 transition-colors">
            <div class="text-4xl mb-4">{icon}</div>
            <h3 class="text-xl font-semibold mb-2">{title}</h3>
            <p class="text-slate-400">{description}</p>
        </div>
    }
}
