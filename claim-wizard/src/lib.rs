pub mod attachment;
pub mod claim;
pub mod error;
pub mod fields;
pub mod intake;
pub mod payload;
pub mod processing;
pub mod runner;
pub mod storage;
pub mod wizard;

// Re-export commonly used types
pub use attachment::Attachment;
pub use claim::{
    ClaimGenerator, ClaimRecord, ClaimSection, EXPORT_FILE_NAME, SampleClaimGenerator,
    StrengthScore, format_currency,
};
pub use error::{Result, WizardError};
pub use fields::{ClaimType, FieldName, WizardFields};
pub use intake::{UploadPolicy, read_attachment, read_attachments};
pub use payload::SubmissionPayload;
pub use processing::{ProcessingClaimGenerator, ProcessingPhase, Progress, SimulatedProcessing};
pub use runner::{ExecutionResult, ExecutionStatus, WizardCommand, WizardRunner};
pub use storage::{InMemorySessionStorage, SessionStorage, WizardSession};
pub use wizard::{AdvanceOutcome, WizardController, WizardStatus, WizardStep};
