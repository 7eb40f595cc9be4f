use leptos::prelude::*;
use nanofi::fields::{FieldKind, FieldSpec, SectionDraft};
use nanofi::section::SectionId;

use super::widgets::Switch;
use crate::ui_model::{input_widget, InputWidget};

/// Renders every field of the active section's draft.
///
/// Field errors stay hidden until the field is blurred or `show_errors` is set
/// (after a blocked continue).
#[component]
pub(super) fn SectionPanel(
    section: SectionId,
    draft: RwSignal<SectionDraft>,
    show_errors: RwSignal<bool>,
    /// `None` for the final section, which submits instead of continuing.
    on_continue: Option<Callback<SectionId>>,
) -> impl IntoView {
    let fields = nanofi::fields::section_fields(section);

    view! {
        <form
            class="section-form"
            on:submit=move |ev| {
                ev.prevent_default();
                if let Some(cb) = on_continue {
                    cb.run(section);
                }
            }
        >
            {fields
                .iter()
                .map(|spec| view! { <FieldInput spec=spec draft=draft show_errors=show_errors /> })
                .collect_view()}
            {on_continue
                .map(|_| {
                    view! {
                        <div class="section-actions">
                            <button type="submit" class="btn">"Continue"</button>
                        </div>
                    }
                })}
        </form>
    }
}

#[component]
fn FieldInput(
    spec: &'static FieldSpec,
    draft: RwSignal<SectionDraft>,
    show_errors: RwSignal<bool>,
) -> impl IntoView {
    let key = spec.key;
    let input_id = format!("field-{key}");
    let touched = RwSignal::new(false);

    let error = Memo::new(move |_| {
        if !(touched.get() || show_errors.get()) {
            return None;
        }
        draft.with(|d| d.field_error(spec)).map(|e| e.to_string())
    });
    let text = move || draft.with(|d| d.text(key));

    let control = match input_widget(spec.kind) {
        InputWidget::Input(kind) => view! {
            <input
                id=input_id.clone()
                class="input"
                type=kind
                placeholder=spec.placeholder
                step=matches!(spec.kind, FieldKind::Number { .. } | FieldKind::Percent).then_some("any")
                prop:value=text
                aria-invalid=move || error.get().is_some().to_string()
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    draft.update(|d| d.set_text(key, raw));
                }
                on:blur=move |_| touched.set(true)
            />
        }
        .into_any(),
        InputWidget::TextArea => view! {
            <textarea
                id=input_id.clone()
                class="input"
                rows="5"
                placeholder=spec.placeholder
                prop:value=text
                aria-invalid=move || error.get().is_some().to_string()
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    draft.update(|d| d.set_text(key, raw));
                }
                on:blur=move |_| touched.set(true)
            ></textarea>
        }
        .into_any(),
        InputWidget::Select => {
            let options = match spec.kind {
                FieldKind::Choice(options) => options,
                _ => &[],
            };
            view! {
                <select
                    id=input_id.clone()
                    class="input"
                    prop:value=text
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        draft.update(|d| d.set_text(key, raw));
                        touched.set(true);
                    }
                >
                    <option value="">"Select…"</option>
                    {options
                        .iter()
                        .map(|o| view! { <option value=*o>{*o}</option> })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        InputWidget::Switch => view! {
            <Switch
                id=input_id.clone()
                checked=Signal::derive(move || draft.with(|d| d.flag(key)))
                on_toggle=Callback::new(move |on: bool| {
                    draft.update(|d| d.set_flag(key, on));
                    touched.set(true);
                })
            />
        }
        .into_any(),
    };

    view! {
        <div class=if spec.is_toggle() { "field field-toggle" } else { "field" }>
            <label class="field-label" for=input_id>
                {spec.label}
                {spec.required.then(|| view! { <span class="required">" *"</span> })}
            </label>
            {control}
            {spec.help.map(|h| view! { <div class="field-help">{h}</div> })}
            {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
        </div>
    }
}
