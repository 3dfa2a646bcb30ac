use serde::{Deserialize, Serialize};

/// A file collected by the wizard: name, media type and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content,
        }
    }

    /// Size in bytes, always derived from the content.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}
