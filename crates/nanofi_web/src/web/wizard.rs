//! The patent vault wizard view.
//!
//! All aggregate state lives in one [`Wizard`]; this component only renders it
//! and forwards user intent. The active section's fields are edited in a
//! [`SectionDraft`], and every edit is reported back through
//! [`Wizard::apply_form`].

use leptos::prelude::*;
use nanofi::close::DeferredClose;
use nanofi::error::WizardError;
use nanofi::fields::{SectionDraft, SectionForm};
use nanofi::notice::Notice;
use nanofi::section::SectionId;
use nanofi::wizard::{SectionMessage, Transition, Wizard};
use tracing::debug;

use super::section_form::SectionPanel;
use super::timers::{clear_timeout, scroll_to_top, set_timeout};
use super::use_app;
use crate::ui_model::{
    connector_class, next_hint, progress_label, step_badge, step_class, step_counter,
};

#[component]
pub(super) fn PatentVaultForm(on_close: Callback<()>) -> impl IntoView {
    let app = use_app();
    let wizard = RwSignal::new(app.config(Wizard::with_config));
    let current = Memo::new(move |_| wizard.with(|w| w.current_id()));
    let draft = RwSignal::new(SectionDraft::new(SectionId::Inventor));
    let show_errors = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let close_timer: StoredValue<Option<(DeferredClose, Option<i32>)>> = StoredValue::new(None);

    // Entering a section restores whatever it reported last time.
    Effect::new(move |_| {
        let id = current.get();
        let restored = wizard.with_untracked(|w| SectionDraft::from_snapshot(id, w.data(id)));
        show_errors.set(false);
        draft.set(restored);
    });

    // Every edit reports validity and data.
    Effect::new(move |_| {
        draft.with(|d| wizard.update(|w| w.apply_form(d)));
    });

    on_cleanup(move || {
        close_timer.try_update_value(|slot| {
            if let Some((close, handle)) = slot {
                close.cancel();
                if let Some(h) = handle {
                    clear_timeout(*h);
                }
            }
        });
    });

    let on_moved = move |t: Transition| {
        if let Transition::Moved { from, to } = t {
            debug!(%from, %to, "section changed");
            scroll_to_top();
        }
    };

    let on_error = move |e: WizardError| {
        if matches!(e, WizardError::ValidationBlocked { .. }) {
            show_errors.set(true);
        }
        match Notice::for_error(&e) {
            Some(notice) => app.notify(notice),
            None => debug!(error = %e, "wizard action ignored"),
        }
    };

    let advance = Callback::new(move |id: SectionId| {
        match wizard.try_update(|w| w.handle(SectionMessage::Continue(id))) {
            Some(Ok(t)) => on_moved(t),
            Some(Err(e)) => on_error(e),
            None => {}
        }
    });

    let on_previous = move |_| {
        if let Some(t) = wizard.try_update(|w| w.go_to_previous()) {
            on_moved(t);
        }
    };

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        let auth = app.auth.get_untracked();
        let mut vault = app.vault();
        let result = wizard.try_update(|w| w.submit(&mut vault, &auth));
        submitting.set(false);

        match result {
            Some(Ok(done)) => {
                app.notify(app.config(|c| Notice::submitted(&c.review_window)));
                let handle = set_timeout(done.close.delay_ms(), move || {
                    let fire = close_timer
                        .try_update_value(|slot| {
                            slot.as_mut().map(|(close, _)| close.fire()).unwrap_or(false)
                        })
                        .unwrap_or(false);
                    if fire {
                        on_close.run(());
                    }
                });
                close_timer.set_value(Some((done.close, handle)));
                if handle.is_none() {
                    on_close.run(());
                }
            }
            Some(Err(e)) => on_error(e),
            None => {}
        }
    };

    let steps = move || {
        wizard.with(|w| {
            let current_index = w.current_index();
            let last = w.sections().len() - 1;
            w.sections()
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let state = w.step_state(i);
                    view! {
                        <li class=step_class(state)>
                            <span class="step-badge">{step_badge(state, i)}</span>
                            <span class="step-title">{s.title}</span>
                            {(i < last).then(|| view! { <span class=connector_class(i, current_index)></span> })}
                        </li>
                    }
                })
                .collect_view()
        })
    };

    let is_first = move || wizard.with(|w| w.is_first_section());
    let is_last = move || wizard.with(|w| w.is_last_section());
    let can_continue = move || wizard.with(|w| w.can_continue());
    let submitted = move || wizard.with(|w| w.submission().is_some());

    view! {
        <div class="wizard">
            <div class="wizard-progress">
                <div class="wizard-progress-labels">
                    <span class="subtle">{move || wizard.with(step_counter)}</span>
                    <span class="subtle">{move || wizard.with(progress_label)}</span>
                </div>
                <div class="progress">
                    <div
                        class="progress-bar"
                        style=move || format!("width: {:.1}%;", wizard.with(|w| w.progress_percent()))
                    ></div>
                </div>
            </div>

            <ol class="wizard-steps">{steps}</ol>

            <header class="wizard-header">
                <h1>{move || wizard.with(|w| w.current_section().title)}</h1>
                <p class="subtle">{move || wizard.with(|w| w.current_section().description)}</p>
            </header>

            <div class="card wizard-body">
                {move || {
                    let section = current.get();
                    let on_continue = (section != SectionId::Submit).then_some(advance);
                    view! {
                        <SectionPanel
                            section=section
                            draft=draft
                            show_errors=show_errors
                            on_continue=on_continue
                        />
                    }
                }}
                <Show when=is_last>
                    <div class="submit-row">
                        <button
                            class="btn primary"
                            disabled=move || {
                                submitting.get() || submitted() || !draft.with(|d| d.validate())
                            }
                            on:click=on_submit
                        >
                            {move || if submitted() { "Submitted" } else { "Submit Application" }}
                        </button>
                    </div>
                </Show>
            </div>

            <div class="wizard-nav">
                <Show when=move || !is_first() fallback=|| view! { <div></div> }>
                    <button class="btn outline" on:click=on_previous>
                        "← Previous"
                    </button>
                </Show>
                <Show when=move || !is_last()>
                    <button
                        class="btn"
                        disabled=move || !can_continue()
                        title=move || next_hint(can_continue())
                        on:click=move |_| advance.run(current.get_untracked())
                    >
                        "Next →"
                    </button>
                </Show>
            </div>
        </div>
    }
}
