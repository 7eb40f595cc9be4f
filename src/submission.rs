use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::auth::AuthState;
use crate::error::GatewayError;
use crate::section::SectionId;

/// Per-section data snapshots, keyed and ordered by section.
pub type FormData = BTreeMap<SectionId, Value>;

/// Identity recorded when nobody is signed in.
pub const UNKNOWN_SUBMITTER: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The payload handed to the gateway once, at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submitted_by: String,
    pub form_data: FormData,
}

impl SubmissionRecord {
    pub fn new(auth: &AuthState, form_data: FormData) -> Self {
        Self {
            submitted_by: auth.submitter().to_string(),
            form_data,
        }
    }
}

/// Append-only sink for finished applications.
///
/// A record is either fully written (and an id returned) or not written at all.
pub trait PersistenceGateway {
    fn save(&mut self, record: SubmissionRecord) -> Result<SubmissionId, GatewayError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &mut G {
    fn save(&mut self, record: SubmissionRecord) -> Result<SubmissionId, GatewayError> {
        (**self).save(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;

    #[test]
    fn record_uses_signed_in_email() {
        let auth = AuthState::signed_in(User {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
        });
        let record = SubmissionRecord::new(&auth, FormData::new());
        assert_eq!(record.submitted_by, "ada@example.com");
    }

    #[test]
    fn record_falls_back_to_unknown() {
        let record = SubmissionRecord::new(&AuthState::anonymous(), FormData::new());
        assert_eq!(record.submitted_by, UNKNOWN_SUBMITTER);
    }

    #[test]
    fn record_serializes_camel_case_with_section_keys() {
        let mut data = FormData::new();
        data.insert(SectionId::Patent, serde_json::json!({ "patent_title": "Widget" }));
        let record = SubmissionRecord {
            submitted_by: "unknown".to_string(),
            form_data: data,
        };

        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["submittedBy"], "unknown");
        assert_eq!(v["formData"]["patent"]["patent_title"], "Widget");

        let back: SubmissionRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, record);
    }
}
