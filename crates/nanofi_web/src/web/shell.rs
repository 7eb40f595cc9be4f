use leptos::prelude::*;
use nanofi::notice::NoticeLevel;
use nanofi::routes::Route;

use super::router::Link;
use super::{use_app, Toast};
use crate::ui_model::{copyright, nav_is_active, nav_links, BRAND, FOOTER_COLUMNS, TAGLINE};

#[component]
pub(super) fn Navbar(current: Memo<Option<Route>>) -> impl IntoView {
    let app = use_app();
    let menu_open = RwSignal::new(false);
    let close_menu = Callback::new(move |_: ()| menu_open.set(false));

    let links = move |mobile: bool| {
        let authed = app.auth.with(|a| a.is_authenticated());
        let here = current.get();
        nav_links(authed)
            .into_iter()
            .map(|l| {
                let class = match (mobile, nav_is_active(l.route, here)) {
                    (true, _) => "nav-link mobile",
                    (false, true) => "nav-link active",
                    (false, false) => "nav-link",
                };
                view! {
                    <Link to=l.route class=class on_navigate=close_menu>
                        {l.label}
                    </Link>
                }
            })
            .collect_view()
    };

    let user_area = move || match app.auth.with(|a| a.email().map(str::to_string)) {
        Some(email) => view! {
            <div class="nav-user">
                <span class="nav-email">{email}</span>
                <button
                    class="btn sm outline"
                    on:click=move |_| {
                        menu_open.set(false);
                        app.sign_out();
                    }
                >
                    "Logout"
                </button>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="nav-user">
                <Link to=Route::Login class="btn sm ghost" on_navigate=close_menu>
                    "Sign In"
                </Link>
                <Link to=Route::Signup class="btn sm" on_navigate=close_menu>
                    "Sign Up"
                </Link>
            </div>
        }
        .into_any(),
    };

    view! {
        <nav class="navbar">
            <div class="navbar-row">
                <Link to=Route::Vault class="brand">
                    <span class="brand-icon" aria-hidden="true">"◆"</span>
                    {BRAND}
                </Link>
                <div class="nav-links">{move || links(false)}</div>
                <div class="nav-right">{user_area}</div>
                <button
                    class="icon-btn menu-toggle"
                    title="Menu"
                    on:click=move |_| menu_open.update(|o| *o = !*o)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>
            <Show when=move || menu_open.get()>
                <div class="mobile-menu">
                    {move || links(true)}
                    {user_area}
                </div>
            </Show>
        </nav>
    }
}

#[component]
pub(super) fn Footer() -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year() as i32;

    view! {
        <footer class="footer">
            <div class="footer-grid">
                <div>
                    <h3 class="footer-brand">{BRAND}</h3>
                    <p class="subtle">{TAGLINE}</p>
                </div>
                {FOOTER_COLUMNS
                    .into_iter()
                    .map(|col| {
                        view! {
                            <div>
                                <h4 class="footer-heading">{col.heading}</h4>
                                <ul class="footer-links">
                                    {col
                                        .links
                                        .iter()
                                        .map(|l| match l.route {
                                            Some(route) => view! {
                                                <li><Link to=route>{l.label}</Link></li>
                                            }
                                            .into_any(),
                                            None => view! {
                                                <li><a href="#">{l.label}</a></li>
                                            }
                                            .into_any(),
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="footer-bottom">{copyright(year)}</div>
        </footer>
    }
}

#[component]
pub(super) fn ToastStack(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-stack" aria-live="polite" aria-relevant="additions removals">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    let class = match t.level {
                        NoticeLevel::Info => "toast info",
                        NoticeLevel::Success => "toast success",
                        NoticeLevel::Error => "toast error",
                    };
                    view! {
                        <div class=class>
                            <div style="flex: 1;">
                                <div class="toast-title">{t.title}</div>
                                <div class="toast-body">{t.description}</div>
                            </div>
                            <button
                                class="toast-close"
                                title="Dismiss"
                                on:click=move |_| toasts.update(|ts| ts.retain(|x| x.id != id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
