//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! navigation inventory and the wizard's progress labels on the host.

use nanofi::fields::{section_fields, FieldKind};
use nanofi::routes::Route;
use nanofi::section::SectionId;
use nanofi::wizard::{StepState, Wizard};

pub const BRAND: &str = "NanoFi";
pub const TAGLINE: &str = "IP-NFT Tokenization Platform";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// Top navigation. The vault link is always shown; the profile link only once
/// signed in.
pub fn nav_links(is_authenticated: bool) -> Vec<NavLink> {
    let mut links = vec![NavLink {
        label: "Vault",
        route: Route::Vault,
    }];
    if is_authenticated {
        links.push(NavLink {
            label: "Profile",
            route: Route::Profile,
        });
    }
    links
}

/// Whether a nav link should be highlighted for the route being rendered.
pub fn nav_is_active(link: Route, current: Option<Route>) -> bool {
    match (link, current) {
        (Route::Vault, Some(Route::Vault | Route::VaultTokenize)) => true,
        (Route::Profile, Some(Route::Profile | Route::ProfileEdit)) => true,
        (l, Some(c)) => l == c,
        (_, None) => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterLink {
    pub label: &'static str,
    /// `None` renders a placeholder anchor.
    pub route: Option<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterColumn {
    pub heading: &'static str,
    pub links: &'static [FooterLink],
}

pub const FOOTER_COLUMNS: [FooterColumn; 3] = [
    FooterColumn {
        heading: "Platform",
        links: &[
            FooterLink {
                label: "Vault",
                route: Some(Route::Vault),
            },
            FooterLink {
                label: "Profile",
                route: Some(Route::Profile),
            },
        ],
    },
    FooterColumn {
        heading: "Resources",
        links: &[
            FooterLink {
                label: "Documentation",
                route: None,
            },
            FooterLink {
                label: "API Reference",
                route: None,
            },
        ],
    },
    FooterColumn {
        heading: "Legal",
        links: &[
            FooterLink {
                label: "Privacy Policy",
                route: None,
            },
            FooterLink {
                label: "Terms of Service",
                route: None,
            },
        ],
    },
];

pub fn copyright(year: i32) -> String {
    format!("© {year} {BRAND}. All rights reserved.")
}

pub fn document_title(route: Option<Route>) -> String {
    match route {
        Some(r) => format!("{} · {BRAND}", r.title()),
        None => format!("Page not found · {BRAND}"),
    }
}

pub fn step_counter(wizard: &Wizard) -> String {
    format!(
        "Step {} of {}",
        wizard.current_index() + 1,
        wizard.sections().len()
    )
}

pub fn progress_label(wizard: &Wizard) -> String {
    format!("{}% Complete", wizard.progress_percent().round() as u32)
}

pub fn step_class(state: StepState) -> &'static str {
    match state {
        StepState::Current => "step current",
        StepState::Done => "step done",
        StepState::Upcoming => "step upcoming",
    }
}

/// Badge inside a step bubble: a check mark once done, otherwise the 1-based number.
pub fn step_badge(state: StepState, index: usize) -> String {
    match state {
        StepState::Done => "✓".to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Connector after step `index` is filled once the cursor has passed it.
pub fn connector_class(index: usize, current: usize) -> &'static str {
    if index < current {
        "step-connector done"
    } else {
        "step-connector"
    }
}

pub fn next_hint(can_continue: bool) -> &'static str {
    if can_continue {
        "Click to continue to next step"
    } else {
        "Please complete all required fields before proceeding"
    }
}

/// Which input widget renders a field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputWidget {
    Input(&'static str),
    TextArea,
    Select,
    Switch,
}

pub fn input_widget(kind: FieldKind) -> InputWidget {
    match kind {
        FieldKind::Text | FieldKind::Symbol => InputWidget::Input("text"),
        FieldKind::Email => InputWidget::Input("email"),
        FieldKind::Number { .. } | FieldKind::Percent => InputWidget::Input("number"),
        FieldKind::Date => InputWidget::Input("date"),
        FieldKind::LongText { .. } => InputWidget::TextArea,
        FieldKind::Choice(_) => InputWidget::Select,
        FieldKind::Toggle => InputWidget::Switch,
    }
}

/// Label/value rows for a stored section snapshot, in schema order.
///
/// Empty answers are skipped; keys the schema does not know are dropped.
pub fn snapshot_rows(section: SectionId, snapshot: &serde_json::Value) -> Vec<(&'static str, String)> {
    section_fields(section)
        .iter()
        .filter_map(|f| {
            let shown = match snapshot.get(f.key)? {
                serde_json::Value::Bool(true) => "Yes".to_string(),
                serde_json::Value::Bool(false) => "No".to_string(),
                serde_json::Value::String(s) if s.trim().is_empty() => return None,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((f.label, shown))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanofi::section::SECTION_COUNT;
    use serde_json::json;

    #[test]
    fn profile_link_needs_a_session() {
        let out = nav_links(false);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].route, Route::Vault);

        let routes: Vec<_> = nav_links(true).into_iter().map(|l| l.route).collect();
        assert_eq!(routes, vec![Route::Vault, Route::Profile]);
    }

    #[test]
    fn nested_routes_highlight_their_parent() {
        assert!(nav_is_active(Route::Vault, Some(Route::VaultTokenize)));
        assert!(nav_is_active(Route::Profile, Some(Route::ProfileEdit)));
        assert!(!nav_is_active(Route::Vault, Some(Route::Profile)));
        assert!(!nav_is_active(Route::Vault, None));
    }

    #[test]
    fn footer_inventory_is_stable() {
        let headings: Vec<_> = FOOTER_COLUMNS.iter().map(|c| c.heading).collect();
        assert_eq!(headings, ["Platform", "Resources", "Legal"]);
        for col in &FOOTER_COLUMNS {
            assert!(!col.links.is_empty());
            for l in col.links {
                assert!(!l.label.trim().is_empty());
            }
        }
        assert_eq!(copyright(2026), "© 2026 NanoFi. All rights reserved.");
    }

    #[test]
    fn progress_labels_follow_the_cursor() {
        let mut w = Wizard::new();
        assert_eq!(step_counter(&w), format!("Step 1 of {SECTION_COUNT}"));
        assert_eq!(progress_label(&w), "13% Complete");

        w.report_validation(SectionId::Inventor, true);
        w.continue_from(SectionId::Inventor).unwrap();
        assert_eq!(step_counter(&w), format!("Step 2 of {SECTION_COUNT}"));
        assert_eq!(progress_label(&w), "25% Complete");
    }

    #[test]
    fn step_badges_and_classes() {
        assert_eq!(step_badge(StepState::Done, 0), "✓");
        assert_eq!(step_badge(StepState::Current, 2), "3");
        assert_eq!(step_badge(StepState::Upcoming, 7), "8");
        assert_eq!(step_class(StepState::Current), "step current");
        assert_eq!(connector_class(0, 1), "step-connector done");
        assert_eq!(connector_class(1, 1), "step-connector");
    }

    #[test]
    fn next_hint_reflects_the_gate() {
        assert_eq!(next_hint(true), "Click to continue to next step");
        assert_eq!(
            next_hint(false),
            "Please complete all required fields before proceeding"
        );
    }

    #[test]
    fn every_field_kind_has_a_widget() {
        assert_eq!(input_widget(FieldKind::Date), InputWidget::Input("date"));
        assert_eq!(input_widget(FieldKind::Toggle), InputWidget::Switch);
        assert_eq!(
            input_widget(FieldKind::LongText { min_len: 50 }),
            InputWidget::TextArea
        );
        for id in SectionId::all() {
            for f in nanofi::fields::section_fields(id) {
                let _ = input_widget(f.kind);
            }
        }
    }

    #[test]
    fn titles_name_the_page() {
        assert_eq!(document_title(Some(Route::Vault)), "Vault · NanoFi");
        assert_eq!(document_title(None), "Page not found · NanoFi");
    }

    #[test]
    fn snapshot_rows_use_field_labels() {
        let snap = json!({
            "terms_accepted": true,
            "signature": "Ada Lovelace",
            "stray": "ignored",
        });
        let rows = snapshot_rows(SectionId::Submit, &snap);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|(_, v)| v == "Yes"));
        assert!(rows.iter().any(|(_, v)| v == "Ada Lovelace"));
        assert!(rows.iter().all(|(_, v)| v != "ignored"));
    }
}
