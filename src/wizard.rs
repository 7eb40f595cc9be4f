//! The step wizard: a strictly linear, validity-gated walk over [`SECTIONS`]
//! that ends in exactly one [`SubmissionRecord`].
//!
//! The wizard is the only writer of aggregate state. Sections talk to it through
//! [`SectionMessage`]s (or [`Wizard::apply_form`]); the host renders whatever
//! [`Wizard::current_section`] says and reacts to the returned [`Transition`]s
//! (scrolling to the top on `Moved`) and errors (showing a [`Notice`]).
//!
//! [`Notice`]: crate::notice::Notice

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::AuthState;
use crate::close::DeferredClose;
use crate::config::AppConfig;
use crate::error::WizardError;
use crate::fields::SectionForm;
use crate::section::{SectionDescriptor, SectionId, SECTIONS, SECTION_COUNT};
use crate::submission::{FormData, PersistenceGateway, SubmissionId, SubmissionRecord};

/// Explicit tri-state section validity. Only `Valid` opens the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Validity {
    #[default]
    Unset,
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

impl From<bool> for Validity {
    fn from(ok: bool) -> Self {
        if ok {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

/// How the cursor moved as a result of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The active section changed; the host should scroll back to the top.
    Moved { from: SectionId, to: SectionId },
    Stayed,
}

/// Visual state of one step in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Current,
    Done,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionMessage {
    Validity(SectionId, bool),
    Data(SectionId, Value),
    Continue(SectionId),
}

/// Successful submission: the stored id and the close to schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub id: SubmissionId,
    pub close: DeferredClose,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    current: usize,
    completed: Vec<SectionId>,
    validation: [Validity; SECTION_COUNT],
    form_data: FormData,
    submitted: Option<SubmissionId>,
    close_delay: Duration,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self {
            current: 0,
            completed: Vec::with_capacity(SECTION_COUNT),
            validation: [Validity::Unset; SECTION_COUNT],
            form_data: FormData::new(),
            submitted: None,
            close_delay: config.close_delay(),
        }
    }

    pub fn sections(&self) -> &'static [SectionDescriptor] {
        &SECTIONS
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> &'static SectionDescriptor {
        &SECTIONS[self.current]
    }

    pub fn current_id(&self) -> SectionId {
        self.current_section().id
    }

    pub fn completed_sections(&self) -> &[SectionId] {
        &self.completed
    }

    pub fn is_completed(&self, id: SectionId) -> bool {
        self.completed.contains(&id)
    }

    pub fn validity(&self, id: SectionId) -> Validity {
        self.validation[id.index()]
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn data(&self, id: SectionId) -> Option<&Value> {
        self.form_data.get(&id)
    }

    pub fn submission(&self) -> Option<&SubmissionId> {
        self.submitted.as_ref()
    }

    pub fn is_first_section(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_section(&self) -> bool {
        self.current == SECTION_COUNT - 1
    }

    pub fn progress_percent(&self) -> f32 {
        (self.current + 1) as f32 / SECTION_COUNT as f32 * 100.0
    }

    /// Whether the forward gate is open for the active section.
    pub fn can_continue(&self) -> bool {
        !self.is_last_section() && self.validity(self.current_id()).is_valid()
    }

    pub fn step_state(&self, index: usize) -> StepState {
        if index == self.current {
            StepState::Current
        } else if index < self.current
            || SECTIONS
                .get(index)
                .is_some_and(|s| self.is_completed(s.id))
        {
            StepState::Done
        } else {
            StepState::Upcoming
        }
    }

    /// Last write wins; may be called on every keystroke.
    pub fn report_validation(&mut self, id: SectionId, is_valid: bool) {
        self.validation[id.index()] = Validity::from(is_valid);
    }

    /// Replaces the section's snapshot. No validation happens here.
    pub fn report_data(&mut self, id: SectionId, data: Value) {
        self.form_data.insert(id, data);
    }

    /// Reports both channels of a section form at once.
    pub fn apply_form<F: SectionForm + ?Sized>(&mut self, form: &F) {
        let id = form.section();
        self.report_validation(id, form.validate());
        self.report_data(id, form.snapshot());
    }

    pub fn handle(&mut self, msg: SectionMessage) -> Result<Transition, WizardError> {
        match msg {
            SectionMessage::Validity(id, ok) => {
                self.report_validation(id, ok);
                Ok(Transition::Stayed)
            }
            SectionMessage::Data(id, data) => {
                self.report_data(id, data);
                Ok(Transition::Stayed)
            }
            SectionMessage::Continue(id) => self.continue_from(id),
        }
    }

    /// The gated forward transition.
    ///
    /// Nothing is mutated unless `id` is the active section and its validity is
    /// explicitly `Valid`.
    pub fn continue_from(&mut self, id: SectionId) -> Result<Transition, WizardError> {
        let active = self.current_id();
        if id != active {
            debug!(%active, got = %id, "ignoring continue from inactive section");
            return Err(WizardError::StaleSection {
                expected: active,
                got: id,
            });
        }
        if !self.validity(id).is_valid() {
            warn!(section = %id, validity = ?self.validity(id), "advance blocked");
            return Err(WizardError::ValidationBlocked { section: id });
        }

        if !self.completed.contains(&id) {
            self.completed.push(id);
        }

        if self.is_last_section() {
            return Ok(Transition::Stayed);
        }
        self.current += 1;
        let to = self.current_id();
        debug!(from = %id, %to, "advanced");
        Ok(Transition::Moved { from: id, to })
    }

    /// Forward step from the active section. Goes through the same gate as
    /// [`Wizard::continue_from`]; there is no ungated way forward.
    pub fn go_to_next(&mut self) -> Result<Transition, WizardError> {
        self.continue_from(self.current_id())
    }

    /// Steps back one section. Validation, completion and data are untouched.
    pub fn go_to_previous(&mut self) -> Transition {
        if self.current == 0 {
            return Transition::Stayed;
        }
        let from = self.current_id();
        self.current -= 1;
        let to = self.current_id();
        debug!(%from, %to, "went back");
        Transition::Moved { from, to }
    }

    pub fn build_record(&self, auth: &AuthState) -> SubmissionRecord {
        SubmissionRecord::new(auth, self.form_data.clone())
    }

    /// Writes the application through `gateway`.
    ///
    /// On failure the wizard is left exactly as it was so the call can be retried.
    pub fn submit<G: PersistenceGateway + ?Sized>(
        &mut self,
        gateway: &mut G,
        auth: &AuthState,
    ) -> Result<Submitted, WizardError> {
        if !self.is_last_section() {
            return Err(WizardError::NotOnFinalSection {
                current: self.current_id(),
            });
        }
        if self.submitted.is_some() {
            return Err(WizardError::AlreadySubmitted);
        }

        let record = self.build_record(auth);
        let submitter = record.submitted_by.clone();
        match gateway.save(record) {
            Ok(id) => {
                info!(%id, submitted_by = %submitter, "application submitted");
                self.submitted = Some(id.clone());
                Ok(Submitted {
                    id,
                    close: DeferredClose::new(self.close_delay),
                })
            }
            Err(e) => {
                warn!(error = %e, "application submission failed");
                Err(WizardError::SubmissionFailed(e))
            }
        }
    }
}
