use thiserror::Error;

use crate::section::SectionId;

/// Failures of the key-value persistence helper.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write failure reported by a persistence gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to write application: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to encode application: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("section '{section}' has required fields that are not complete")]
    ValidationBlocked { section: SectionId },

    #[error("stale request from section '{got}' (active section is '{expected}')")]
    StaleSection { expected: SectionId, got: SectionId },

    #[error("submission is only available from the final section (active section is '{current}')")]
    NotOnFinalSection { current: SectionId },

    #[error("application has already been submitted")]
    AlreadySubmitted,

    #[error("submission failed: {0}")]
    SubmissionFailed(#[from] GatewayError),
}

/// Field-level validation failure shown next to an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Enter a valid e-mail address")]
    InvalidEmail,

    #[error("Enter a number")]
    NotANumber,

    #[error("Must be at least {min}")]
    BelowMinimum { min: String },

    #[error("Enter a percentage between 0 and 100")]
    OutOfRange,

    #[error("Enter a date as YYYY-MM-DD")]
    InvalidDate,

    #[error("Please write at least {min_len} characters")]
    TooShort { min_len: usize },

    #[error("Choose one of the listed options")]
    UnknownChoice,

    #[error("Use 2-8 uppercase letters or digits")]
    InvalidSymbol,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Bio must be at most {max} characters")]
    BioTooLong { max: usize },

    #[error("Wallet address must be 0x followed by 40 hex digits")]
    InvalidWallet,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Enter a valid e-mail address")]
    InvalidEmail,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("An account with this e-mail already exists")]
    EmailTaken,

    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    #[error("No account found for {0}")]
    UnknownAccount(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
