//! Conversation bubbles for the query page

use chrono::{DateTime, Utc};
use docquery::query::{FailedQuestion, Turn};
use leptos::prelude::*;

use super::loading::TypingIndicator;

/// One side of a turn.
#[component]
fn Bubble(
    text: String,
    is_user: bool,
    #[prop(optional)] time: Option<DateTime<Utc>>,
) -> impl IntoView {
    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            // Avatar
            <div class=format!(
                "w-8 h-8 rounded-full flex items-center justify-center text-white text-sm font-medium shrink-0 {}",
                if is_user {
                    "bg-gradient-to-br from-blue-500 to-cyan-500"
                } else {
                    "bg-gradient-to-br from-violet-500 to-purple-600"
                }
            )>
                {if is_user { "👤" } else { "📄" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                <div class=format!(
                    "px-4 py-3 rounded-2xl whitespace-pre-wrap break-words {}",
                    if is_user {
                        "bg-blue-600 text-white rounded-tr-sm"
                    } else {
                        "bg-slate-800 text-slate-100 rounded-tl-sm"
                    }
                )>
                    {text}
                </div>
                {time.map(|t| view! {
                    <span class="text-xs text-slate-600 mt-1">{t.format("%H:%M").to_string()}</span>
                })}
            </div>
        </div>
    }
}

/// A question and its answer
#[component]
pub fn ChatMessage(turn: Turn) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-4">
            <Bubble text=turn.question is_user=true time=turn.asked_at />
            <Bubble text=turn.answer is_user=false />
        </div>
    }
}

/// The question in flight, followed by the typing indicator
#[component]
pub fn PendingMessage(question: String) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-4">
            <Bubble text=question is_user=true />
            <TypingIndicator />
        </div>
    }
}

/// A question that got no answer. It is not part of the history.
#[component]
pub fn FailedMessage(failed: FailedQuestion) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2 opacity-80">
            <Bubble text=failed.question is_user=true />
            <div class="self-end text-sm text-[var(--accent-error)]" role="alert">
                {failed.error}
            </div>
        </div>
    }
}
