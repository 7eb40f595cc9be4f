use leptos::prelude::*;
use nanofi::auth::{AuthState, SignupRequest, User};
use nanofi::notice::{Notice, NoticeLevel};
use nanofi::profile::{ProfileUpdate, MAX_BIO_CHARS};
use nanofi::routes::Route;
use nanofi::vault::{ApplicationStatus, StoredApplication};
use tracing::warn;

use super::router::Link;
use super::use_app;
use super::widgets::Collapsible;
use super::wizard::PatentVaultForm;
use crate::ui_model::snapshot_rows;

pub(super) fn render(route: Route) -> AnyView {
    match route {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Signup => view! { <SignupPage /> }.into_any(),
        Route::Profile => view! { <ProfilePage /> }.into_any(),
        Route::ProfileEdit => view! { <EditProfilePage /> }.into_any(),
        Route::Vault => view! { <VaultPage /> }.into_any(),
        Route::VaultTokenize => view! { <TokenizePatentPage /> }.into_any(),
    }
}

#[component]
fn TextField(
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let id = format!("input-{}", label.to_ascii_lowercase().replace(' ', "-"));
    view! {
        <div class="field">
            <label class="field-label" for=id.clone()>{label}</label>
            <input
                id=id
                class="input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn FormError(error: RwSignal<Option<String>>) -> impl IntoView {
    move || error.get().map(|e| view! { <div class="form-error" role="alert">{e}</div> })
}

#[component]
fn LoginPage() -> impl IntoView {
    let app = use_app();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let result = app
            .accounts()
            .login(&email.get_untracked(), &password.get_untracked());
        match result {
            Ok(user) => app.sign_in(user),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="auth-card card">
            <h1>"Sign In"</h1>
            <p class="subtle">"Access your patent vault."</p>
            <form on:submit=on_submit>
                <TextField label="Email" kind="email" value=email placeholder="you@example.com" />
                <TextField label="Password" kind="password" value=password />
                <FormError error=error />
                <button type="submit" class="btn primary wide">"Sign In"</button>
            </form>
            <p class="subtle">
                "Don't have an account? "
                <Link to=Route::Signup>"Sign up"</Link>
            </p>
        </section>
    }
}

#[component]
fn SignupPage() -> impl IntoView {
    let app = use_app();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = SignupRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        match app.accounts().signup(&req) {
            Ok(user) => {
                app.notify(Notice::new(
                    NoticeLevel::Success,
                    "Account created",
                    format!("Welcome to NanoFi, {}.", user.name),
                ));
                app.sign_in(user);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let min_len = app.config(|c| c.min_password_len);

    view! {
        <section class="auth-card card">
            <h1>"Create an account"</h1>
            <p class="subtle">"Tokenize your patents as IP-NFTs."</p>
            <form on:submit=on_submit>
                <TextField label="Full name" value=name />
                <TextField label="Email" kind="email" value=email placeholder="you@example.com" />
                <TextField label="Password" kind="password" value=password />
                <TextField label="Confirm password" kind="password" value=confirm />
                <p class="field-help">{format!("At least {min_len} characters.")}</p>
                <FormError error=error />
                <button type="submit" class="btn primary wide">"Sign Up"</button>
            </form>
            <p class="subtle">
                "Already have an account? "
                <Link to=Route::Login>"Sign in"</Link>
            </p>
        </section>
    }
}

#[component]
fn ProfilePage() -> impl IntoView {
    let app = use_app();
    let email = app.auth.with_untracked(|a| a.email().unwrap_or_default().to_string());

    let profile = app.accounts().profile(&email).unwrap_or_else(|e| {
        warn!(error = %e, "could not load profile");
        None
    });
    let submitted = app
        .vault()
        .applications_by(&email)
        .map(|apps| apps.len())
        .unwrap_or(0);

    let Some(p) = profile else {
        return view! {
            <section class="card">
                <h1>"Profile"</h1>
                <p class="subtle">"No profile found for this account."</p>
            </section>
        }
        .into_any();
    };

    let or_dash = |s: String| if s.is_empty() { "—".to_string() } else { s };

    view! {
        <section class="card profile">
            <header class="page-header">
                <h1>{p.name.clone()}</h1>
                <Link to=Route::ProfileEdit class="btn outline">"Edit Profile"</Link>
            </header>
            <dl class="profile-details">
                <dt>"Email"</dt>
                <dd>{p.email.clone()}</dd>
                <dt>"Organization"</dt>
                <dd>{or_dash(p.organization.clone())}</dd>
                <dt>"Wallet"</dt>
                <dd class="mono">{or_dash(p.wallet_address.clone())}</dd>
                <dt>"Bio"</dt>
                <dd>{or_dash(p.bio.clone())}</dd>
                <dt>"Applications"</dt>
                <dd>{submitted}</dd>
            </dl>
        </section>
    }
    .into_any()
}

#[component]
fn EditProfilePage() -> impl IntoView {
    let app = use_app();
    let email = app.auth.with_untracked(|a| a.email().unwrap_or_default().to_string());
    let current = app
        .accounts()
        .profile(&email)
        .ok()
        .flatten()
        .map(|p| ProfileUpdate::from_profile(&p))
        .unwrap_or_default();

    let name = RwSignal::new(current.name);
    let organization = RwSignal::new(current.organization);
    let bio = RwSignal::new(current.bio);
    let wallet = RwSignal::new(current.wallet_address);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let update = ProfileUpdate {
            name: name.get_untracked(),
            organization: organization.get_untracked(),
            bio: bio.get_untracked(),
            wallet_address: wallet.get_untracked(),
        };
        match app.accounts().update_profile(&email, &update) {
            Ok(profile) => {
                app.auth.set(AuthState::signed_in(User {
                    email: profile.email,
                    name: profile.name,
                }));
                app.notify(Notice::new(
                    NoticeLevel::Success,
                    "Profile updated",
                    "Your changes have been saved.",
                ));
                app.navigate(Route::Profile);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <section class="card">
            <h1>"Edit Profile"</h1>
            <form on:submit=on_submit>
                <TextField label="Name" value=name />
                <TextField label="Organization" value=organization />
                <TextField label="Wallet address" value=wallet placeholder="0x…" />
                <div class="field">
                    <label class="field-label" for="input-bio">"Bio"</label>
                    <textarea
                        id="input-bio"
                        class="input"
                        rows="4"
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    ></textarea>
                    <div class="field-help">
                        {move || format!("{} / {MAX_BIO_CHARS}", bio.with(|b| b.chars().count()))}
                    </div>
                </div>
                <FormError error=error />
                <div class="form-actions">
                    <Link to=Route::Profile class="btn outline">"Cancel"</Link>
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </section>
    }
}

fn status_class(app: &StoredApplication) -> &'static str {
    match app.status {
        ApplicationStatus::Pending => "badge pending",
        ApplicationStatus::Approved => "badge approved",
        ApplicationStatus::Rejected => "badge rejected",
    }
}

#[component]
fn ApplicationPanel(application: StoredApplication) -> impl IntoView {
    let title = application
        .patent_title()
        .unwrap_or("Untitled application")
        .to_string();
    let subtitle = format!(
        "{} · {}",
        application.id,
        application.submitted_at.format("%b %d, %Y %H:%M UTC")
    );
    let badge = status_class(&application);
    let label = application.status.label();

    let sections = application
        .form_data
        .iter()
        .map(|(id, snapshot)| {
            let rows = snapshot_rows(*id, snapshot);
            view! {
                <div class="snapshot">
                    <h4>{id.descriptor().title}</h4>
                    <dl>
                        {rows
                            .into_iter()
                            .map(|(k, v)| view! { <dt>{k}</dt><dd>{v}</dd> })
                            .collect_view()}
                    </dl>
                </div>
            }
        })
        .collect_view();

    view! {
        <Collapsible title=title subtitle=subtitle>
            <span class=badge>{label}</span>
            {sections}
        </Collapsible>
    }
}

#[component]
fn VaultPage() -> impl IntoView {
    let app = use_app();
    let email = app.auth.with_untracked(|a| a.email().unwrap_or_default().to_string());
    let applications = app.vault().applications_by(&email).unwrap_or_else(|e| {
        warn!(error = %e, "could not read vault");
        app.notify(Notice::new(
            NoticeLevel::Error,
            "Vault unavailable",
            "Stored applications could not be read.",
        ));
        Vec::new()
    });
    let empty = applications.is_empty();

    view! {
        <section class="vault">
            <header class="page-header">
                <div>
                    <h1>"Patent Vault"</h1>
                    <p class="subtle">"Your submitted applications and their review status."</p>
                </div>
                <Link to=Route::VaultTokenize class="btn primary">"Tokenize a Patent"</Link>
            </header>
            {empty
                .then(|| {
                    view! {
                        <div class="card empty-state">
                            <p>"No applications yet."</p>
                            <p class="subtle">"Start the wizard to submit your first patent."</p>
                        </div>
                    }
                })}
            <div class="vault-list">
                {applications
                    .into_iter()
                    .map(|a| view! { <ApplicationPanel application=a /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn TokenizePatentPage() -> impl IntoView {
    let app = use_app();
    let on_close = Callback::new(move |_: ()| app.navigate(Route::Vault));

    view! {
        <section class="tokenize">
            <PatentVaultForm on_close=on_close />
        </section>
    }
}

#[component]
pub(super) fn NotFound() -> impl IntoView {
    view! {
        <section class="card not-found">
            <h1>"404"</h1>
            <p class="subtle">"This page does not exist."</p>
            <Link to=Route::Vault>"Back to the vault"</Link>
        </section>
    }
}
