//! Small UI primitives used by the pages and section forms.

use leptos::prelude::*;

/// Disclosure panel with a clickable header.
#[component]
pub(super) fn Collapsible(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: String,
    #[prop(optional)] default_open: bool,
    children: Children,
) -> impl IntoView {
    let open = RwSignal::new(default_open);

    view! {
        <div class=move || if open.get() { "collapsible open" } else { "collapsible" }>
            <button
                type="button"
                class="collapsible-trigger"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span class="collapsible-title">{title}</span>
                <span class="subtle">{subtitle}</span>
                <span class="collapsible-chevron">{move || if open.get() { "▾" } else { "▸" }}</span>
            </button>
            <div class="collapsible-content" hidden=move || !open.get()>
                {children()}
            </div>
        </div>
    }
}

/// On/off toggle rendered as a button with `role="switch"`.
#[component]
pub(super) fn Switch(
    #[prop(into)] id: String,
    checked: Signal<bool>,
    on_toggle: Callback<bool>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    view! {
        <button
            id=id
            type="button"
            role="switch"
            disabled=disabled
            aria-checked=move || checked.get().to_string()
            class=move || if checked.get() { "switch on" } else { "switch" }
            on:click=move |_| on_toggle.run(!checked.get_untracked())
        >
            <span class="switch-thumb"></span>
        </button>
    }
}
