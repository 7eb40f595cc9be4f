//! Local vault of submitted applications.
//!
//! All applications live as one JSON array under a single key, mirroring how the
//! browser app keeps them in `localStorage`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{GatewayError, StorageError};
use crate::kv::KeyValueStore;
use crate::submission::{FormData, PersistenceGateway, SubmissionId, SubmissionRecord};

/// Review state of a stored application. New applications start `Pending`;
/// the SPV review moves them on through [`VaultStorage::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    pub id: SubmissionId,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub submitted_by: String,
    pub form_data: FormData,
}

impl StoredApplication {
    /// Patent title from the patent section snapshot, if present.
    pub fn patent_title(&self) -> Option<&str> {
        self.form_data
            .get(&crate::section::SectionId::Patent)?
            .get("patent_title")?
            .as_str()
    }
}

pub struct VaultStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> VaultStorage<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self {
            store,
            key: config.storage_key("vault_applications.v1"),
        }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn applications(&self) -> Result<Vec<StoredApplication>, StorageError> {
        Ok(self.store.get_json(&self.key)?.unwrap_or_default())
    }

    pub fn application(&self, id: &str) -> Result<Option<StoredApplication>, StorageError> {
        Ok(self
            .applications()?
            .into_iter()
            .find(|a| a.id.as_str() == id))
    }

    /// Applications submitted by `email`, newest first.
    pub fn applications_by(&self, email: &str) -> Result<Vec<StoredApplication>, StorageError> {
        let mut apps: Vec<_> = self
            .applications()?
            .into_iter()
            .filter(|a| a.submitted_by.eq_ignore_ascii_case(email))
            .collect();
        apps.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(apps)
    }

    pub fn save_application(
        &mut self,
        record: SubmissionRecord,
    ) -> Result<SubmissionId, StorageError> {
        let mut apps = self.applications()?;
        let id = SubmissionId(format!("VA-{}", uuid::Uuid::new_v4().simple()));
        apps.push(StoredApplication {
            id: id.clone(),
            submitted_at: Utc::now(),
            status: ApplicationStatus::Pending,
            submitted_by: record.submitted_by,
            form_data: record.form_data,
        });
        self.store.set_json(&self.key, &apps)?;
        debug!(%id, total = apps.len(), "application stored");
        Ok(id)
    }

    /// Records a review outcome. Returns the updated application, or `None`
    /// when no application has that id.
    pub fn set_status(
        &mut self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Option<StoredApplication>, StorageError> {
        let mut apps = self.applications()?;
        let Some(app) = apps.iter_mut().find(|a| a.id.as_str() == id) else {
            return Ok(None);
        };
        app.status = status;
        let updated = app.clone();
        self.store.set_json(&self.key, &apps)?;
        debug!(%id, ?status, "application reviewed");
        Ok(Some(updated))
    }
}

impl<S: KeyValueStore> PersistenceGateway for VaultStorage<S> {
    fn save(&mut self, record: SubmissionRecord) -> Result<SubmissionId, GatewayError> {
        Ok(self.save_application(record)?)
    }
}
