//! Field schemas for each wizard section and the draft that holds a section's
//! in-progress values.
//!
//! Sections own their fields; the wizard only ever sees a validity flag and a
//! JSON snapshot (see [`SectionForm`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::FieldError;
use crate::section::SectionId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number { min: f64 },
    Percent,
    Date,
    LongText { min_len: usize },
    Choice(&'static [&'static str]),
    /// Token ticker: 2-8 uppercase ASCII letters or digits.
    Symbol,
    Toggle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    pub help: Option<&'static str>,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        required: true,
        placeholder: "",
        help: None,
    }
}

const fn optional(mut spec: FieldSpec) -> FieldSpec {
    spec.required = false;
    spec
}

const fn hint(mut spec: FieldSpec, placeholder: &'static str) -> FieldSpec {
    spec.placeholder = placeholder;
    spec
}

const fn help(mut spec: FieldSpec, text: &'static str) -> FieldSpec {
    spec.help = Some(text);
    spec
}

const INVENTOR_ROLES: &[&str] = &["Sole inventor", "Co-inventor", "Assignee representative"];
const JURISDICTIONS: &[&str] = &["USPTO", "EPO", "WIPO", "JPO", "CNIPA", "Other"];
const LICENSING: &[&str] = &["Not licensed", "Non-exclusive license", "Exclusive license"];
const OWNERSHIP_TYPES: &[&str] = &["Individual", "Company", "University", "Joint ownership"];
const VALUATION_METHODS: &[&str] = &["Cost approach", "Market approach", "Income approach", "Relief from royalty"];
const CHAINS: &[&str] = &["Ethereum", "Polygon", "Base"];

const INVENTOR_FIELDS: &[FieldSpec] = &[
    hint(field("full_name", "Full name", FieldKind::Text), "Jane Doe"),
    hint(field("email", "E-mail", FieldKind::Email), "jane@example.com"),
    optional(field("phone", "Phone", FieldKind::Text)),
    optional(field("organization", "Organization", FieldKind::Text)),
    field("country", "Country of residence", FieldKind::Text),
    field("role", "Role", FieldKind::Choice(INVENTOR_ROLES)),
];

const PATENT_FIELDS: &[FieldSpec] = &[
    field("patent_title", "Patent title", FieldKind::Text),
    hint(field("patent_number", "Patent / application number", FieldKind::Text), "US 11,234,567 B2"),
    field("jurisdiction", "Jurisdiction", FieldKind::Choice(JURISDICTIONS)),
    hint(field("filing_date", "Filing date", FieldKind::Date), "YYYY-MM-DD"),
    hint(optional(field("grant_date", "Grant date", FieldKind::Date)), "YYYY-MM-DD"),
    hint(optional(field("ipc_classification", "IPC classification", FieldKind::Text)), "G06F 16/00"),
    help(
        field("abstract", "Abstract", FieldKind::LongText { min_len: 50 }),
        "Summarize the invention as filed.",
    ),
];

const DOCUMENTATION_FIELDS: &[FieldSpec] = &[
    hint(field("specification_file", "Patent specification", FieldKind::Text), "specification.pdf"),
    hint(field("claims_file", "Claims document", FieldKind::Text), "claims.pdf"),
    hint(optional(field("drawings_file", "Technical drawings", FieldKind::Text)), "drawings.pdf"),
    help(
        field("documents_confirmed", "Documents are complete and authentic", FieldKind::Toggle),
        "Confirm the uploaded files match the filed patent.",
    ),
];

const COMMERCIAL_FIELDS: &[FieldSpec] = &[
    field("market_description", "Market description", FieldKind::LongText { min_len: 30 }),
    hint(field("target_industries", "Target industries", FieldKind::Text), "Biotech, Medical devices"),
    field("competitive_advantage", "Competitive advantage", FieldKind::LongText { min_len: 30 }),
    optional(field("annual_market_size_usd", "Annual market size (USD)", FieldKind::Number { min: 0.0 })),
    field("licensing_status", "Licensing status", FieldKind::Choice(LICENSING)),
];

const OWNERSHIP_FIELDS: &[FieldSpec] = &[
    field("owner_name", "Registered owner", FieldKind::Text),
    field("ownership_type", "Ownership type", FieldKind::Choice(OWNERSHIP_TYPES)),
    field("ownership_percentage", "Your ownership share (%)", FieldKind::Percent),
    help(
        optional(field("co_owners", "Co-owners", FieldKind::LongText { min_len: 0 })),
        "One co-owner per line with their share.",
    ),
    field("ownership_declaration", "I declare that I hold the rights listed above", FieldKind::Toggle),
];

const VALUATION_FIELDS: &[FieldSpec] = &[
    field("requested_valuation_usd", "Requested valuation (USD)", FieldKind::Number { min: 1.0 }),
    field("valuation_method", "Valuation methodology", FieldKind::Choice(VALUATION_METHODS)),
    field("justification", "Justification", FieldKind::LongText { min_len: 50 }),
];

const NFT_FIELDS: &[FieldSpec] = &[
    field("token_name", "Token name", FieldKind::Text),
    hint(field("token_symbol", "Token symbol", FieldKind::Symbol), "PTNT"),
    field("fractional_shares", "Fractional shares", FieldKind::Number { min: 1.0 }),
    field("royalty_percentage", "Royalty (%)", FieldKind::Percent),
    field("blockchain", "Blockchain", FieldKind::Choice(CHAINS)),
    optional(field("transferable", "Allow secondary transfers", FieldKind::Toggle)),
];

const SUBMIT_FIELDS: &[FieldSpec] = &[
    help(
        field("signature", "Signature (full legal name)", FieldKind::Text),
        "Typing your name acts as your electronic signature.",
    ),
    field("terms_accepted", "I accept the vault terms and the SPV review process", FieldKind::Toggle),
];

pub fn section_fields(section: SectionId) -> &'static [FieldSpec] {
    match section {
        SectionId::Inventor => INVENTOR_FIELDS,
        SectionId::Patent => PATENT_FIELDS,
        SectionId::Documentation => DOCUMENTATION_FIELDS,
        SectionId::Commercial => COMMERCIAL_FIELDS,
        SectionId::Ownership => OWNERSHIP_FIELDS,
        SectionId::Valuation => VALUATION_FIELDS,
        SectionId::Nft => NFT_FIELDS,
        SectionId::Submit => SUBMIT_FIELDS,
    }
}

pub fn is_valid_email(s: &str) -> bool {
    let s = s.trim();
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) => "",
        }
    }

    fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(s) => s == "true",
        }
    }
}

impl FieldSpec {
    pub fn is_toggle(&self) -> bool {
        matches!(self.kind, FieldKind::Toggle)
    }

    pub fn check(&self, value: Option<&FieldValue>) -> Result<(), FieldError> {
        if self.is_toggle() {
            let on = value.map(FieldValue::as_flag).unwrap_or(false);
            return if self.required && !on {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        let raw = value.map(FieldValue::as_text).unwrap_or("").trim();
        if raw.is_empty() {
            return if self.required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        match self.kind {
            FieldKind::Text | FieldKind::Toggle => Ok(()),
            FieldKind::Email => {
                if is_valid_email(raw) {
                    Ok(())
                } else {
                    Err(FieldError::InvalidEmail)
                }
            }
            FieldKind::Number { min } => {
                let v = parse_number(raw)?;
                if v < min {
                    Err(FieldError::BelowMinimum {
                        min: format!("{min}"),
                    })
                } else {
                    Ok(())
                }
            }
            FieldKind::Percent => {
                let v = parse_number(raw)?;
                if (0.0..=100.0).contains(&v) {
                    Ok(())
                } else {
                    Err(FieldError::OutOfRange)
                }
            }
            FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| FieldError::InvalidDate),
            FieldKind::LongText { min_len } => {
                if raw.chars().count() < min_len {
                    Err(FieldError::TooShort { min_len })
                } else {
                    Ok(())
                }
            }
            FieldKind::Choice(options) => {
                if options.contains(&raw) {
                    Ok(())
                } else {
                    Err(FieldError::UnknownChoice)
                }
            }
            FieldKind::Symbol => {
                let ok = (2..=8).contains(&raw.len())
                    && raw
                        .bytes()
                        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
                if ok {
                    Ok(())
                } else {
                    Err(FieldError::InvalidSymbol)
                }
            }
        }
    }
}

fn parse_number(raw: &str) -> Result<f64, FieldError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::NotANumber),
    }
}

/// What every wizard section provides to the controller.
pub trait SectionForm {
    fn section(&self) -> SectionId;
    /// `true` exactly when every required field satisfies its constraints.
    fn validate(&self) -> bool;
    fn snapshot(&self) -> Value;
}

/// In-progress values of one section, driven by its [`FieldSpec`] table.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionDraft {
    section: SectionId,
    values: BTreeMap<String, FieldValue>,
}

impl SectionDraft {
    pub fn new(section: SectionId) -> Self {
        Self {
            section,
            values: BTreeMap::new(),
        }
    }

    /// Rebuilds a draft from a snapshot taken earlier, e.g. when the user
    /// navigates back. Unknown keys and wrongly-typed values are dropped.
    pub fn from_snapshot(section: SectionId, snapshot: Option<&Value>) -> Self {
        let mut draft = Self::new(section);
        let Some(Value::Object(map)) = snapshot else {
            return draft;
        };
        for spec in draft.fields() {
            let v = match (map.get(spec.key), spec.is_toggle()) {
                (Some(Value::Bool(b)), true) => FieldValue::Flag(*b),
                (Some(Value::String(s)), false) => FieldValue::Text(s.clone()),
                (Some(Value::Number(n)), false) => FieldValue::Text(n.to_string()),
                _ => continue,
            };
            draft.values.insert(spec.key.to_string(), v);
        }
        draft
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        section_fields(self.section)
    }

    pub fn text(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(|v| v.as_text().to_string())
            .unwrap_or_default()
    }

    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).map(FieldValue::as_flag).unwrap_or(false)
    }

    pub fn set_text(&mut self, key: &str, value: impl Into<String>) {
        self.values
            .insert(key.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, key: &str, on: bool) {
        self.values.insert(key.to_string(), FieldValue::Flag(on));
    }

    pub fn field_error(&self, spec: &FieldSpec) -> Option<FieldError> {
        spec.check(self.values.get(spec.key)).err()
    }

    pub fn errors(&self) -> Vec<(&'static str, FieldError)> {
        self.fields()
            .iter()
            .filter_map(|spec| self.field_error(spec).map(|e| (spec.key, e)))
            .collect()
    }
}

impl SectionForm for SectionDraft {
    fn section(&self) -> SectionId {
        self.section
    }

    fn validate(&self) -> bool {
        self.fields().iter().all(|spec| self.field_error(spec).is_none())
    }

    fn snapshot(&self) -> Value {
        let mut map = Map::new();
        for spec in self.fields() {
            let Some(v) = self.values.get(spec.key) else {
                continue;
            };
            let json = match v {
                FieldValue::Flag(b) => Value::Bool(*b),
                FieldValue::Text(s) => Value::String(s.trim().to_string()),
            };
            map.insert(spec.key.to_string(), json);
        }
        Value::Object(map)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// A fully valid draft for `section`, used across the crate's tests.
    pub(crate) fn valid_draft(section: SectionId) -> SectionDraft {
        let mut d = SectionDraft::new(section);
        for spec in section_fields(section) {
            match spec.kind {
                FieldKind::Text => d.set_text(spec.key, "Example value"),
                FieldKind::Email => d.set_text(spec.key, "ada@example.com"),
                FieldKind::Number { min } => d.set_text(spec.key, format!("{}", min + 10.0)),
                FieldKind::Percent => d.set_text(spec.key, "50"),
                FieldKind::Date => d.set_text(spec.key, "2021-03-14"),
                FieldKind::LongText { min_len } => d.set_text(spec.key, "x".repeat(min_len + 5)),
                FieldKind::Choice(options) => d.set_text(spec.key, options[0]),
                FieldKind::Symbol => d.set_text(spec.key, "PTNT"),
                FieldKind::Toggle => d.set_flag(spec.key, true),
            }
        }
        d
    }

    #[test]
    fn every_section_has_required_fields_with_unique_keys() {
        for id in SectionId::all() {
            let fields = section_fields(id);
            assert!(fields.iter().any(|f| f.required), "{id} has no required field");
            let mut keys: Vec<_> = fields.iter().map(|f| f.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), fields.len(), "{id} has duplicate keys");
        }
    }

    #[test]
    fn empty_draft_is_invalid_and_filled_draft_is_valid() {
        for id in SectionId::all() {
            assert!(!SectionDraft::new(id).validate(), "{id}");
            let d = valid_draft(id);
            assert!(d.validate(), "{id}: {:?}", d.errors());
        }
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  a.b+c@sub.example.org "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
        assert!(!is_valid_email("ada@.com"));
    }

    #[test]
    fn field_kind_checks() {
        let num = field("n", "n", FieldKind::Number { min: 1.0 });
        let text = |s: &str| FieldValue::Text(s.to_string());
        assert_eq!(num.check(Some(&text("1,000"))), Ok(()));
        assert_eq!(num.check(Some(&text("abc"))), Err(FieldError::NotANumber));
        assert!(matches!(
            num.check(Some(&text("0.5"))),
            Err(FieldError::BelowMinimum { .. })
        ));

        let pct = field("p", "p", FieldKind::Percent);
        assert_eq!(pct.check(Some(&text("100"))), Ok(()));
        assert_eq!(pct.check(Some(&text("100.5"))), Err(FieldError::OutOfRange));

        let date = field("d", "d", FieldKind::Date);
        assert_eq!(date.check(Some(&text("2024-02-29"))), Ok(()));
        assert_eq!(date.check(Some(&text("2023-02-29"))), Err(FieldError::InvalidDate));

        let sym = field("s", "s", FieldKind::Symbol);
        assert_eq!(sym.check(Some(&text("IPNFT1"))), Ok(()));
        assert_eq!(sym.check(Some(&text("ipnft"))), Err(FieldError::InvalidSymbol));
        assert_eq!(sym.check(Some(&text("X"))), Err(FieldError::InvalidSymbol));

        let choice = field("c", "c", FieldKind::Choice(CHAINS));
        assert_eq!(choice.check(Some(&text("Base"))), Ok(()));
        assert_eq!(choice.check(Some(&text("Solana"))), Err(FieldError::UnknownChoice));

        let toggle = field("t", "t", FieldKind::Toggle);
        assert_eq!(toggle.check(None), Err(FieldError::Required));
        assert_eq!(toggle.check(Some(&FieldValue::Flag(true))), Ok(()));
    }

    #[test]
    fn optional_fields_are_checked_only_when_filled() {
        let grant = optional(field("g", "g", FieldKind::Date));
        assert_eq!(grant.check(None), Ok(()));
        assert_eq!(grant.check(Some(&FieldValue::Text("  ".into()))), Ok(()));
        assert_eq!(
            grant.check(Some(&FieldValue::Text("soon".into()))),
            Err(FieldError::InvalidDate)
        );
    }

    #[test]
    fn snapshot_restores_known_fields_only() {
        let snap = json!({
            "signature": "  Ada Lovelace ",
            "terms_accepted": true,
            "unrelated": "dropped",
        });
        let d = SectionDraft::from_snapshot(SectionId::Submit, Some(&snap));
        assert!(d.validate());
        assert_eq!(d.text("signature"), "  Ada Lovelace ");

        let out = d.snapshot();
        assert_eq!(out, json!({ "signature": "Ada Lovelace", "terms_accepted": true }));

        let restored = SectionDraft::from_snapshot(SectionId::Submit, Some(&out));
        assert_eq!(restored.snapshot(), out);

        let empty = SectionDraft::from_snapshot(SectionId::Submit, Some(&json!("nope")));
        assert_eq!(empty.snapshot(), json!({}));
    }

    #[test]
    fn errors_name_the_failing_fields() {
        let mut d = valid_draft(SectionId::Nft);
        d.set_text("token_symbol", "lower");
        d.set_text("royalty_percentage", "");
        let errs = d.errors();
        assert_eq!(
            errs,
            vec![
                ("token_symbol", FieldError::InvalidSymbol),
                ("royalty_percentage", FieldError::Required),
            ]
        );
    }
}
