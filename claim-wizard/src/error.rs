use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown claim type: {0:?}")]
    UnknownClaimType(String),

    #[error("Unknown claim section: {0}")]
    UnknownClaimSection(String),

    #[error("File {name} is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("File type not allowed: {0}")]
    UnsupportedFileType(String),

    #[error("Strength score must be within 0..=100, got {0}")]
    InvalidStrengthScore(u32),

    #[error("Claim generation failed: {0}")]
    GenerationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WizardError>;
