//! # nanofi
//!
//! Domain core of the NanoFi IP-NFT front-end: the patent vault step wizard,
//! its section schemas, local accounts, the vault of submitted applications and
//! the route table. Everything here is plain Rust and runs on the host, so the
//! browser app (`nanofi_web`) and the CLI share one tested implementation.
//!
//! ## Quick Start
//!
//! ```
//! use nanofi::prelude::*;
//!
//! let mut vault = VaultStorage::new(MemoryStore::new(), &AppConfig::default());
//! let mut wizard = Wizard::new();
//!
//! // A section reports its validity and snapshot, then asks to continue.
//! wizard.report_validation(SectionId::Inventor, true);
//! wizard.report_data(SectionId::Inventor, serde_json::json!({ "full_name": "Ada" }));
//! wizard.continue_from(SectionId::Inventor).unwrap();
//! assert_eq!(wizard.current_id(), SectionId::Patent);
//!
//! // Submitting is only possible from the final section.
//! assert!(wizard.submit(&mut vault, &AuthState::anonymous()).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: builds the `nanofi-cli` binary (terminal logging, OS data directory)
//!
//! ## Modules
//!
//! - [`wizard`]: the step wizard controller
//! - [`section`]: the fixed section inventory
//! - [`fields`]: per-section field schemas and drafts
//! - [`submission`]: submission records and the persistence gateway
//! - [`vault`]: local store of submitted applications
//! - [`auth`] / [`profile`]: local accounts and profiles
//! - [`routes`]: route table and auth gate
//! - [`kv`]: key-value persistence helper

pub mod auth;
pub mod close;
pub mod config;
pub mod error;
pub mod fields;
pub mod kv;
pub mod notice;
pub mod profile;
pub mod routes;
pub mod section;
pub mod submission;
pub mod vault;
pub mod wizard;

/// Prelude module for convenient imports.
///
/// ```
/// use nanofi::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AccountStore, AuthState, SignupRequest, User};
    pub use crate::close::DeferredClose;
    pub use crate::config::AppConfig;
    pub use crate::error::{AuthError, GatewayError, StorageError, WizardError};
    pub use crate::fields::{section_fields, FieldKind, FieldSpec, SectionDraft, SectionForm};
    pub use crate::kv::{KeyValueStore, MemoryStore};
    pub use crate::notice::{Notice, NoticeLevel};
    pub use crate::profile::{Profile, ProfileUpdate};
    pub use crate::routes::{resolve, Resolution, Route};
    pub use crate::section::{SectionDescriptor, SectionId, SECTIONS, SECTION_COUNT};
    pub use crate::submission::{
        FormData, PersistenceGateway, SubmissionId, SubmissionRecord, UNKNOWN_SUBMITTER,
    };
    pub use crate::vault::{ApplicationStatus, StoredApplication, VaultStorage};
    pub use crate::wizard::{SectionMessage, StepState, Submitted, Transition, Validity, Wizard};
}
