//! The claim intake wizard: a fixed three-step sequence with validation-gated
//! forward transitions and unconditional back navigation.
//!
//! ```text
//! IncidentDetails --(gate 1)--> InsuranceInfo --(gate 2)--> Review --> Completed
//!        ^                             |   ^                     |
//!        +---------- retreat ----------+   +------ retreat ------+
//! ```
//!
//! The controller is synchronous and owns all of its state. Refusing to advance
//! is an ordinary outcome, not an error. Completing the review step produces a
//! [`SubmissionPayload`] exactly once; after that the controller is terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::{
    attachment::Attachment,
    fields::{FieldName, WizardFields},
    payload::SubmissionPayload,
};

/// One of the three wizard steps, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    IncidentDetails,
    InsuranceInfo,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::IncidentDetails,
        WizardStep::InsuranceInfo,
        WizardStep::Review,
    ];

    pub const COUNT: u8 = 3;

    pub fn number(&self) -> u8 {
        match self {
            WizardStep::IncidentDetails => 1,
            WizardStep::InsuranceInfo => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::IncidentDetails),
            2 => Some(WizardStep::InsuranceInfo),
            3 => Some(WizardStep::Review),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::IncidentDetails => "Upload Incident Details",
            WizardStep::InsuranceInfo => "Insurance Information",
            WizardStep::Review => "Review & Generate",
        }
    }

    /// Share of the wizard covered once this step is reached, in percent.
    pub fn progress_percent(&self) -> u8 {
        ((u32::from(self.number()) * 100 + u32::from(Self::COUNT) / 2) / u32::from(Self::COUNT))
            as u8
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(WizardStep::IncidentDetails)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.number(), Self::COUNT)
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStatus {
    InProgress(WizardStep),
    Completed,
}

/// Result of calling [`WizardController::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The gate was satisfied and the wizard moved forward.
    Moved(WizardStep),
    /// The gate of the current step is not satisfied; nothing changed.
    Blocked(WizardStep),
    /// The review step finished; the payload must be handed off.
    Completed(SubmissionPayload),
    /// The session had already completed; no second payload is produced.
    AlreadyCompleted,
}

/// Owns step position, form fields and attachments for one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardController {
    status: WizardStatus,
    attachments: Vec<Attachment>,
    fields: WizardFields,
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            status: WizardStatus::InProgress(WizardStep::IncidentDetails),
            attachments: Vec::new(),
            fields: WizardFields::default(),
        }
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    /// Current step. A completed wizard reports the review step it finished on.
    pub fn step(&self) -> WizardStep {
        match self.status {
            WizardStatus::InProgress(step) => step,
            WizardStatus::Completed => WizardStep::Review,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == WizardStatus::Completed
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn fields(&self) -> &WizardFields {
        &self.fields
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        if self.is_completed() {
            debug!("Ignoring files added after completion");
            return;
        }
        let before = self.attachments.len();
        self.attachments.extend(files);
        debug!(
            added = self.attachments.len() - before,
            total = self.attachments.len(),
            "Attachments added"
        );
    }

    /// Removes the attachment at `index`. Out-of-range indices leave the list untouched.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        if self.is_completed() || index >= self.attachments.len() {
            debug!(index, total = self.attachments.len(), "Attachment removal ignored");
            return None;
        }
        let removed = self.attachments.remove(index);
        debug!(index, name = %removed.name, "Attachment removed");
        Some(removed)
    }

    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        if self.is_completed() {
            debug!(field = %name, "Ignoring field update after completion");
            return;
        }
        self.fields.set(name, value.into());
    }

    /// Whether the gate of `step` is satisfied by the current state.
    pub fn can_advance(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::IncidentDetails => {
                !self.attachments.is_empty()
                    && self.fields.is_present(FieldName::IncidentDescription)
            }
            WizardStep::InsuranceInfo => {
                self.fields.is_present(FieldName::InsuranceProvider)
                    && self.fields.is_present(FieldName::PolicyNumber)
                    && self.fields.claim_type().is_some()
            }
            WizardStep::Review => true,
        }
    }

    /// Gate check for the step the wizard is currently on.
    pub fn can_advance_current(&self) -> bool {
        !self.is_completed() && self.can_advance(self.step())
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        let step = match self.status {
            WizardStatus::InProgress(step) => step,
            WizardStatus::Completed => return AdvanceOutcome::AlreadyCompleted,
        };

        if !self.can_advance(step) {
            debug!(step = step.number(), "Advance refused, gate not satisfied");
            return AdvanceOutcome::Blocked(step);
        }

        match step.next() {
            Some(next) => {
                self.status = WizardStatus::InProgress(next);
                info!(from = step.number(), to = next.number(), "Wizard advanced");
                AdvanceOutcome::Moved(next)
            }
            None => {
                let payload = SubmissionPayload::snapshot(&self.attachments, &self.fields);
                self.status = WizardStatus::Completed;
                info!(
                    submission_id = %payload.id(),
                    submitted_at = %payload.submitted_at(),
                    attachments = payload.attachments().len(),
                    attachment_bytes = payload.total_attachment_bytes(),
                    "Wizard completed"
                );
                AdvanceOutcome::Completed(payload)
            }
        }
    }

    /// Steps back one page, never below the first. Has no effect once completed.
    pub fn retreat(&mut self) -> WizardStep {
        if let WizardStatus::InProgress(step) = self.status {
            let previous = step.previous();
            self.status = WizardStatus::InProgress(previous);
            debug!(from = step.number(), to = previous.number(), "Wizard retreated");
        }
        self.step()
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str) -> Attachment {
        Attachment::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn at_insurance_step() -> WizardController {
        let mut wizard = WizardController::new();
        wizard.add_files([photo("bumper.jpg")]);
        wizard.set_field(FieldName::IncidentDescription, "rear-ended at a stoplight");
        assert_eq!(wizard.advance(), AdvanceOutcome::Moved(WizardStep::InsuranceInfo));
        wizard
    }

    #[test]
    fn test_starts_on_first_step() {
        let wizard = WizardController::new();
        assert_eq!(wizard.status(), WizardStatus::InProgress(WizardStep::IncidentDetails));
        assert!(wizard.attachments().is_empty());
        assert_eq!(wizard.fields(), &WizardFields::default());
    }

    #[test]
    fn test_step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(4), None);
        assert_eq!(WizardStep::InsuranceInfo.to_string(), "Step 2 of 3");
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(WizardStep::IncidentDetails.progress_percent(), 33);
        assert_eq!(WizardStep::InsuranceInfo.progress_percent(), 67);
        assert_eq!(WizardStep::Review.progress_percent(), 100);
    }

    #[test]
    fn test_first_gate_needs_files() {
        let mut wizard = WizardController::new();
        wizard.set_field(FieldName::IncidentDescription, "hail damage on the roof");
        assert!(!wizard.can_advance(WizardStep::IncidentDetails));
    }

    #[test]
    fn test_first_gate_needs_description() {
        let mut wizard = WizardController::new();
        wizard.add_files([photo("roof.jpg")]);
        assert!(!wizard.can_advance(WizardStep::IncidentDetails));

        wizard.set_field(FieldName::IncidentDescription, " \t\n ");
        assert!(!wizard.can_advance(WizardStep::IncidentDetails));

        wizard.set_field(FieldName::IncidentDescription, "hail damage on the roof");
        assert!(wizard.can_advance(WizardStep::IncidentDetails));
    }

    #[test]
    fn test_optional_fields_do_not_gate() {
        let mut wizard = WizardController::new();
        wizard.add_files([photo("roof.jpg")]);
        wizard.set_field(FieldName::IncidentDescription, "hail damage");
        assert!(wizard.fields().incident_date.is_empty());
        assert!(wizard.fields().incident_location.is_empty());
        assert!(wizard.can_advance(WizardStep::IncidentDetails));
    }

    #[test]
    fn test_second_gate_each_requirement() {
        let complete = |wizard: &mut WizardController| {
            wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
            wizard.set_field(FieldName::PolicyNumber, "POL-1");
            wizard.set_field(FieldName::ClaimType, "auto");
        };

        let mut wizard = at_insurance_step();
        complete(&mut wizard);
        assert!(wizard.can_advance(WizardStep::InsuranceInfo));

        for (field, blank) in [
            (FieldName::InsuranceProvider, "  "),
            (FieldName::PolicyNumber, ""),
            (FieldName::ClaimType, ""),
        ] {
            let mut wizard = at_insurance_step();
            complete(&mut wizard);
            wizard.set_field(field, blank);
            assert!(
                !wizard.can_advance(WizardStep::InsuranceInfo),
                "gate should fail without {field}"
            );
        }
    }

    #[test]
    fn test_second_gate_rejects_unknown_claim_type() {
        let mut wizard = at_insurance_step();
        wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
        wizard.set_field(FieldName::PolicyNumber, "POL-1");
        wizard.set_field(FieldName::ClaimType, "boat");
        assert!(!wizard.can_advance(WizardStep::InsuranceInfo));
        wizard.set_field(FieldName::ClaimType, " auto ");
        assert!(!wizard.can_advance(WizardStep::InsuranceInfo));
    }

    #[test]
    fn test_review_gate_always_open() {
        let wizard = WizardController::new();
        assert!(wizard.can_advance(WizardStep::Review));
    }

    #[test]
    fn test_blocked_advance_keeps_step() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked(WizardStep::IncidentDetails));
        assert_eq!(wizard.step(), WizardStep::IncidentDetails);

        let mut wizard = at_insurance_step();
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked(WizardStep::InsuranceInfo));
        assert_eq!(wizard.step(), WizardStep::InsuranceInfo);
    }

    #[test]
    fn test_retreat_is_clamped() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.retreat(), WizardStep::IncidentDetails);
        assert_eq!(wizard.retreat(), WizardStep::IncidentDetails);

        let mut wizard = at_insurance_step();
        assert_eq!(wizard.retreat(), WizardStep::IncidentDetails);
        assert_eq!(wizard.retreat(), WizardStep::IncidentDetails);
    }

    #[test]
    fn test_retreat_skips_validation_and_keeps_data() {
        let mut wizard = at_insurance_step();
        wizard.set_field(FieldName::IncidentDescription, "");
        assert_eq!(wizard.retreat(), WizardStep::IncidentDetails);
        assert_eq!(wizard.attachments().len(), 1);
    }

    #[test]
    fn test_remove_file_by_index() {
        let mut wizard = WizardController::new();
        wizard.add_files([photo("a.jpg"), photo("b.jpg"), photo("c.jpg")]);

        let removed = wizard.remove_file(1).unwrap();
        assert_eq!(removed.name, "b.jpg");
        let names: Vec<_> = wizard.attachments().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "c.jpg"]);

        assert!(wizard.remove_file(2).is_none());
        assert_eq!(wizard.attachments().len(), 2);
    }

    #[test]
    fn test_completion_emits_single_payload() {
        let before = chrono::Utc::now();
        let mut wizard = at_insurance_step();
        wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
        wizard.set_field(FieldName::PolicyNumber, "POL-1");
        wizard.set_field(FieldName::ClaimType, "auto");
        assert_eq!(wizard.advance(), AdvanceOutcome::Moved(WizardStep::Review));

        let payload = match wizard.advance() {
            AdvanceOutcome::Completed(payload) => payload,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(payload.attachments().len(), 1);
        assert_eq!(payload.total_attachment_bytes(), 3);
        assert!(payload.submitted_at() >= before);
        assert!(payload.submitted_at() <= chrono::Utc::now());
        assert_eq!(payload.field(FieldName::PolicyNumber), "POL-1");
        assert!(wizard.is_completed());

        assert_eq!(wizard.advance(), AdvanceOutcome::AlreadyCompleted);
        assert_eq!(wizard.retreat(), WizardStep::Review);
        assert!(wizard.is_completed());
    }

    #[test]
    fn test_completed_wizard_ignores_mutation() {
        let mut wizard = at_insurance_step();
        wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
        wizard.set_field(FieldName::PolicyNumber, "POL-1");
        wizard.set_field(FieldName::ClaimType, "home");
        wizard.advance();
        assert!(matches!(wizard.advance(), AdvanceOutcome::Completed(_)));

        wizard.set_field(FieldName::PolicyNumber, "POL-2");
        wizard.add_files([photo("late.jpg")]);
        assert!(wizard.remove_file(0).is_none());
        assert_eq!(wizard.fields().policy_number, "POL-1");
        assert_eq!(wizard.attachments().len(), 1);
        assert!(!wizard.can_advance_current());
    }

    #[test]
    fn test_payload_is_detached_snapshot() {
        let mut wizard = at_insurance_step();
        wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
        wizard.set_field(FieldName::PolicyNumber, "POL-1");
        wizard.set_field(FieldName::ClaimType, "renters");
        wizard.advance();
        wizard.retreat();
        wizard.set_field(FieldName::PolicyNumber, "POL-9");
        wizard.advance();

        let AdvanceOutcome::Completed(payload) = wizard.advance() else {
            panic!("expected completion");
        };
        assert_eq!(payload.field(FieldName::PolicyNumber), "POL-9");
        assert_eq!(payload.claim_type(), Some(crate::fields::ClaimType::Renters));
    }
}
