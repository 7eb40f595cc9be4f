use leptos::prelude::*;
use nanofi::auth::{AccountStore, AuthState, User};
use nanofi::config::AppConfig;
use nanofi::notice::{Notice, NoticeLevel};
use nanofi::routes::{resolve, Resolution, Route};
use nanofi::vault::VaultStorage;
use tracing::{info, warn};

use crate::ui_model::document_title;

mod pages;
mod router;
mod section_form;
mod shell;
mod storage;
mod timers;
mod widgets;
mod wizard;

use pages::NotFound;
use shell::{Footer, Navbar, ToastStack};
use storage::LocalStorage;

/// How long a toast stays up before it dismisses itself.
const TOAST_TTL_MS: u32 = 6000;

pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    mount_to_body(|| view! { <App /> });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Toast {
    pub(super) id: u64,
    pub(super) level: NoticeLevel,
    pub(super) title: String,
    pub(super) description: String,
}

/// App-wide state shared through Leptos context.
#[derive(Clone, Copy)]
pub(super) struct AppContext {
    pub(super) auth: RwSignal<AuthState>,
    pub(super) path: RwSignal<String>,
    pub(super) toasts: RwSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u64>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    fn new(config: AppConfig) -> Self {
        let session = AccountStore::new(LocalStorage, &config)
            .session()
            .unwrap_or_else(|e| {
                warn!(error = %e, "could not restore session");
                AuthState::anonymous()
            });
        Self {
            auth: RwSignal::new(session),
            path: RwSignal::new(router::current_path()),
            toasts: RwSignal::new(Vec::new()),
            next_toast_id: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    pub(super) fn config<T>(&self, f: impl FnOnce(&AppConfig) -> T) -> T {
        self.config.with_value(f)
    }

    pub(super) fn accounts(&self) -> AccountStore<LocalStorage> {
        self.config(|c| AccountStore::new(LocalStorage, c))
    }

    pub(super) fn vault(&self) -> VaultStorage<LocalStorage> {
        self.config(|c| VaultStorage::new(LocalStorage, c))
    }

    pub(super) fn navigate(&self, route: Route) {
        router::push_path(route.path());
        self.path.set(route.path().to_string());
    }

    fn redirect(&self, route: Route) {
        router::replace_path(route.path());
        self.path.set(route.path().to_string());
    }

    pub(super) fn sign_in(&self, user: User) {
        info!(email = %user.email, "signed in");
        self.auth.set(AuthState::signed_in(user));
        self.navigate(Route::Vault);
    }

    pub(super) fn sign_out(&self) {
        if let Err(e) = self.accounts().logout() {
            warn!(error = %e, "could not clear session");
        }
        self.auth.set(AuthState::anonymous());
        self.navigate(Route::Login);
    }

    pub(super) fn notify(&self, notice: Notice) {
        let id = self.next_toast_id.with_value(|n| *n);
        self.next_toast_id.set_value(id + 1);
        self.toasts.update(|ts| {
            ts.push(Toast {
                id,
                level: notice.level,
                title: notice.title,
                description: notice.description,
            })
        });

        let toasts = self.toasts;
        timers::set_timeout(TOAST_TTL_MS, move || {
            toasts.try_update(|ts| ts.retain(|t| t.id != id));
        });
    }
}

pub(super) fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
fn App() -> impl IntoView {
    let app = AppContext::new(AppConfig::default());
    provide_context(app);

    router::on_popstate(move |path| app.path.set(path));

    let resolution = Memo::new(move |_| {
        let authed = app.auth.with(|a| a.is_authenticated());
        app.path.with(|p| resolve(p, authed))
    });

    let current_route = Memo::new(move |_| match resolution.get() {
        Resolution::Render(route) => Some(route),
        _ => None,
    });

    // Redirects replace the history entry so "back" skips them.
    Effect::new(move |_| {
        if let Resolution::Redirect(to) = resolution.get() {
            app.redirect(to);
        }
    });

    Effect::new(move |_| router::set_document_title(&document_title(current_route.get())));

    view! {
        <div class="app">
            <Navbar current=current_route />
            <main class="app-main">
                {move || match resolution.get() {
                    Resolution::Render(route) => pages::render(route),
                    Resolution::Redirect(_) => view! { <div class="route-redirect"></div> }.into_any(),
                    Resolution::NotFound => view! { <NotFound /> }.into_any(),
                }}
            </main>
            <Footer />
            <ToastStack toasts=app.toasts />
        </div>
    }
}
