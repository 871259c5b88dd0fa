//! Question input component

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlTextAreaElement;

const MAX_HEIGHT_PX: i32 = 200;

/// Question box with auto-resize textarea. Enter sends, Shift+Enter breaks
/// the line.
#[component]
pub fn ChatInput(
    /// Current input value
    #[prop(into)]
    value: Signal<String>,
    /// Called on every edit
    on_input: impl Fn(String) + 'static,
    /// Called when user submits
    on_submit: impl Fn() + 'static + Clone,
    /// Whether sending is currently refused
    #[prop(into)]
    disabled: Signal<bool>,
    #[prop(default = "Type your question...")]
    placeholder: &'static str,
) -> impl IntoView {
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let resize_textarea = move || {
        if let Some(textarea) = textarea_ref.get() {
            let el: &HtmlTextAreaElement = textarea.as_ref();
            let new_height = el.scroll_height().min(MAX_HEIGHT_PX);
            let _ = el.set_attribute(
                "style",
                &format!("height: {}px; max-height: {}px;", new_height, MAX_HEIGHT_PX),
            );
        }
    };

    let handle_input = move |ev: web_sys::Event| {
        let Some(textarea) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            return;
        };
        on_input(textarea.value());
        resize_textarea();
    };

    let on_keydown = {
        let on_submit = on_submit.clone();
        move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                if !disabled.get_untracked() {
                    on_submit();
                }
            }
        }
    };

    view! {
        <div class="flex items-end gap-3 p-4 bg-slate-800/50 backdrop-blur-sm border-t border-slate-700">
            <div class="flex-1 relative">
                <textarea
                    node_ref=textarea_ref
                    prop:value=move || value.get()
                    on:input=handle_input
                    on:keydown=on_keydown
                    placeholder=placeholder
                    rows="1"
                    class="w-full px-4 py-3 bg-slate-900 border border-slate-700 rounded-xl resize-none
                           text-slate-100 placeholder-slate-500
                           focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent"
                    style="max-height: 200px;"
                ></textarea>
            </div>

            <button
                on:click=move |_| on_submit()
                disabled=move || disabled.get()
                aria-label="Send"
                class="p-3 bg-blue-600 hover:bg-blue-700 disabled:bg-slate-700
                       disabled:cursor-not-allowed rounded-xl transition-colors
                       focus:outline-none focus:ring-2 focus:ring-blue-500 focus:ring-offset-2 focus:ring-offset-slate-900"
            >
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="w-5 h-5 text-white"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    <line x1="22" y1="2" x2="11" y2="13"></line>
                    <polygon points="22 2 15 22 11 13 2 9 22 2"></polygon>
                </svg>
            </button>
        </div>
    }
}
