//! WizardRunner: loads a session, applies exactly **one** command, and persists the
//! updated session back to storage.
//!
//! Presentation layers translate each user interaction into a [`WizardCommand`] and
//! hand it to [`WizardRunner::apply`]. When an `Advance` completes the review step the
//! runner discards the session and passes the submission to the configured
//! [`ClaimGenerator`]; the generated claim comes back in the [`ExecutionResult`].
//!
//! Callers that need finer control can drive a [`WizardController`] directly.
//!
//! [`WizardController`]: crate::wizard::WizardController

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    attachment::Attachment,
    claim::{ClaimGenerator, ClaimRecord},
    error::{Result, WizardError},
    fields::FieldName,
    storage::{SessionStorage, WizardSession},
    wizard::{AdvanceOutcome, WizardStep},
};

/// A single user interaction with the wizard.
#[derive(Debug, Clone)]
pub enum WizardCommand {
    AddFiles(Vec<Attachment>),
    RemoveFile(usize),
    SetField(FieldName, String),
    Advance,
    Retreat,
}

impl WizardCommand {
    fn kind(&self) -> &'static str {
        match self {
            WizardCommand::AddFiles(_) => "add_files",
            WizardCommand::RemoveFile(_) => "remove_file",
            WizardCommand::SetField(..) => "set_field",
            WizardCommand::Advance => "advance",
            WizardCommand::Retreat => "retreat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecutionStatus {
    /// Waiting for the user on the current step.
    WaitingForInput,
    /// An advance was refused because the current step's gate is not satisfied.
    Blocked,
    /// The submission was handed off and the session discarded.
    Completed,
}

/// Outcome of one [`WizardRunner::apply`] call.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub session_id: String,
    pub step: WizardStep,
    /// Whether the gate of `step` is currently satisfied.
    pub can_advance: bool,
    pub status: ExecutionStatus,
    pub submission_id: Option<Uuid>,
    pub claim: Option<ClaimRecord>,
}

/// High-level helper that orchestrates the _load → apply → save_ pattern.
#[derive(Clone)]
pub struct WizardRunner {
    storage: Arc<dyn SessionStorage>,
    generator: Arc<dyn ClaimGenerator>,
}

impl WizardRunner {
    pub fn new(storage: Arc<dyn SessionStorage>, generator: Arc<dyn ClaimGenerator>) -> Self {
        Self { storage, generator }
    }

    /// Creates and stores a fresh session on step 1.
    pub async fn start(&self) -> Result<WizardSession> {
        let session = WizardSession::new();
        self.storage.save(session.clone()).await?;
        info!(session_id = %session.id, "Wizard session started");
        Ok(session)
    }

    pub async fn session(&self, session_id: &str) -> Result<WizardSession> {
        self.storage
            .get(session_id)
            .await?
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))
    }

    #[instrument(skip(self, command), fields(command = command.kind()))]
    pub async fn apply(&self, session_id: &str, command: WizardCommand) -> Result<ExecutionResult> {
        // 1. Load session
        let mut session = self.session(session_id).await?;
        let controller = &mut session.controller;

        // 2. Apply exactly one command
        let status = match command {
            WizardCommand::AddFiles(files) => {
                controller.add_files(files);
                ExecutionStatus::WaitingForInput
            }
            WizardCommand::RemoveFile(index) => {
                controller.remove_file(index);
                ExecutionStatus::WaitingForInput
            }
            WizardCommand::SetField(name, value) => {
                controller.set_field(name, value);
                ExecutionStatus::WaitingForInput
            }
            WizardCommand::Retreat => {
                controller.retreat();
                ExecutionStatus::WaitingForInput
            }
            WizardCommand::Advance => match controller.advance() {
                AdvanceOutcome::Moved(_) => ExecutionStatus::WaitingForInput,
                AdvanceOutcome::Blocked(_) => ExecutionStatus::Blocked,
                AdvanceOutcome::Completed(payload) => {
                    // 3a. Completed sessions are discarded, then handed off
                    self.storage.delete(session_id).await?;
                    info!(
                        session_id = %session_id,
                        submission_id = %payload.id(),
                        "Submission handed to claim generator"
                    );
                    let claim = self.generator.generate(&payload).await?;
                    return Ok(ExecutionResult {
                        session_id: session_id.to_string(),
                        step: WizardStep::Review,
                        can_advance: false,
                        status: ExecutionStatus::Completed,
                        submission_id: Some(payload.id()),
                        claim: Some(claim),
                    });
                }
                AdvanceOutcome::AlreadyCompleted => ExecutionStatus::Completed,
            },
        };

        let result = ExecutionResult {
            session_id: session_id.to_string(),
            step: session.controller.step(),
            can_advance: session.controller.can_advance_current(),
            status,
            submission_id: None,
            claim: None,
        };

        // 3b. Persist new state so the next call starts where we left off
        self.storage.save(session).await?;
        debug!(step = result.step.number(), status = ?result.status, "Command applied");

        Ok(result)
    }
}
