//! Inline status messages

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A success or error line under a form. Renders nothing while `message`
/// is empty.
#[component]
pub fn Notice(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] kind: Signal<NoticeKind>,
) -> impl IntoView {
    move || {
        message.get().filter(|m| !m.is_empty()).map(|text| {
            let class = match kind.get() {
                NoticeKind::Success => {
                    "mb-6 p-4 rounded-[var(--radius-md)] text-sm animate-fade-in \
                     bg-emerald-500/10 border border-emerald-500/50 text-emerald-400"
                }
                NoticeKind::Error => {
                    "mb-6 p-4 rounded-[var(--radius-md)] text-sm animate-fade-in \
                     bg-[var(--accent-error)]/10 border border-[var(--accent-error)]/50 text-[var(--accent-error)]"
                }
            };
            view! { <div class=class role="status">{text}</div> }
        })
    }
}
