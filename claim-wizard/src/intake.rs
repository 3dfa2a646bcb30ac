//! Turns files on disk into [`Attachment`]s under an [`UploadPolicy`].
//!
//! The wizard accepts whatever it is given; size and type checks live here, in
//! the layer that actually reads the files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::{
    attachment::Attachment,
    error::{Result, WizardError},
};

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    pub max_file_size: u64,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: ["jpg", "jpeg", "png", "gif", "pdf"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl UploadPolicy {
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

/// Media type for a known extension, `application/octet-stream` otherwise.
pub fn media_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Reads one file, rejecting it if the policy forbids its type or size.
pub async fn read_attachment(path: impl AsRef<Path>, policy: &UploadPolicy) -> Result<Attachment> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if !policy.allows_extension(&extension) {
        warn!(file = %name, extension = %extension, "Rejected file type");
        return Err(WizardError::UnsupportedFileType(name));
    }

    let size = tokio::fs::metadata(path).await?.len();
    if size > policy.max_file_size {
        warn!(file = %name, size, limit = policy.max_file_size, "Rejected oversized file");
        return Err(WizardError::FileTooLarge {
            name,
            size,
            limit: policy.max_file_size,
        });
    }

    let content = tokio::fs::read(path).await?;
    debug!(file = %name, size, "File read");
    Ok(Attachment::new(name, media_type_for(&extension), content))
}

/// Reads every path in order, stopping at the first rejection.
pub async fn read_attachments<P: AsRef<Path>>(
    paths: &[P],
    policy: &UploadPolicy,
) -> Result<Vec<Attachment>> {
    let mut attachments = Vec::with_capacity(paths.len());
    for path in paths {
        attachments.push(read_attachment(path, policy).await?);
    }
    Ok(attachments)
}
