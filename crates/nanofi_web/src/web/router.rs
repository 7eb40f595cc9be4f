//! Minimal path router over the History API.

use leptos::prelude::*;
use nanofi::routes::Route;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::use_app;

pub(super) fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn history() -> Option<web_sys::History> {
    web_sys::window().and_then(|w| w.history().ok())
}

pub(super) fn push_path(path: &str) {
    if let Some(h) = history() {
        if let Err(e) = h.push_state_with_url(&JsValue::NULL, "", Some(path)) {
            warn!(?e, path, "pushState failed");
        }
    }
}

pub(super) fn replace_path(path: &str) {
    if let Some(h) = history() {
        if let Err(e) = h.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
            warn!(?e, path, "replaceState failed");
        }
    }
}

/// Calls `f` with the new path on browser back/forward. Lives as long as the page.
pub(super) fn on_popstate(f: impl Fn(String) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        f(current_path());
    }) as Box<dyn FnMut(web_sys::Event)>);

    match window.add_event_listener_with_callback("popstate", cb.as_ref().unchecked_ref()) {
        Ok(()) => cb.forget(),
        Err(e) => warn!(?e, "failed to listen for popstate"),
    }
}

pub(super) fn set_document_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(title);
    }
}

/// In-app link: renders a real `href` but navigates without a page load.
#[component]
pub(super) fn Link(
    to: Route,
    #[prop(optional)] class: &'static str,
    #[prop(optional)] on_navigate: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let app = use_app();
    view! {
        <a
            href=to.path()
            class=class
            on:click=move |ev| {
                ev.prevent_default();
                if let Some(cb) = on_navigate {
                    cb.run(());
                }
                app.navigate(to);
            }
        >
            {children()}
        </a>
    }
}
