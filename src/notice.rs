//! User-visible notices (rendered as toasts by the web app, printed by the CLI).

use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn submitted(review_window: &str) -> Self {
        Self::new(
            NoticeLevel::Success,
            "Application Submitted",
            format!(
                "Your patent vault application has been submitted successfully. SPV will review it within {review_window}."
            ),
        )
    }

    pub fn validation_blocked() -> Self {
        Self::new(
            NoticeLevel::Error,
            "Please complete all required fields",
            "All required fields must be filled before proceeding.",
        )
    }

    pub fn submission_failed() -> Self {
        Self::new(
            NoticeLevel::Error,
            "Submission Failed",
            "There was an error submitting your application. Please try again.",
        )
    }

    /// The notice to surface for a wizard failure, if any.
    ///
    /// Only a blocked advance and a failed write reach the user. Stale
    /// callbacks, early submits and repeat submits are caller mistakes and are
    /// logged by whoever receives them.
    pub fn for_error(err: &WizardError) -> Option<Self> {
        match err {
            WizardError::ValidationBlocked { .. } => Some(Self::validation_blocked()),
            WizardError::SubmissionFailed(_) => Some(Self::submission_failed()),
            WizardError::AlreadySubmitted
            | WizardError::NotOnFinalSection { .. }
            | WizardError::StaleSection { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::section::SectionId;

    #[test]
    fn user_visible_errors_map_to_error_notices() {
        let blocked = Notice::for_error(&WizardError::ValidationBlocked {
            section: SectionId::Patent,
        })
        .unwrap();
        assert_eq!(blocked.level, NoticeLevel::Error);
        assert_eq!(blocked.title, "Please complete all required fields");

        let failed = Notice::for_error(&WizardError::SubmissionFailed(GatewayError::Rejected(
            "disk full".to_string(),
        )))
        .unwrap();
        assert_eq!(failed.title, "Submission Failed");
    }

    #[test]
    fn internal_errors_are_silent() {
        let silent = [
            WizardError::StaleSection {
                expected: SectionId::Patent,
                got: SectionId::Inventor,
            },
            WizardError::NotOnFinalSection {
                current: SectionId::Valuation,
            },
            WizardError::AlreadySubmitted,
        ];
        for err in &silent {
            assert_eq!(Notice::for_error(err), None, "{err:?}");
        }
    }

    #[test]
    fn submitted_mentions_review_window() {
        let n = Notice::submitted("3-5 business days");
        assert_eq!(n.level, NoticeLevel::Success);
        assert!(n.description.contains("within 3-5 business days"));
    }
}
