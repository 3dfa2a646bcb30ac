use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    attachment::Attachment,
    fields::{ClaimType, FieldName, WizardFields},
};

/// Snapshot of a completed wizard session, handed to the claim generator.
///
/// Constructed only by the wizard controller when the review step completes.
/// All accessors are read-only; the snapshot never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    id: Uuid,
    submitted_at: DateTime<Utc>,
    attachments: Vec<Attachment>,
    fields: WizardFields,
}

impl SubmissionPayload {
    pub(crate) fn snapshot(attachments: &[Attachment], fields: &WizardFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            attachments: attachments.to_vec(),
            fields: fields.clone(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn fields(&self) -> &WizardFields {
        &self.fields
    }

    pub fn field(&self, name: FieldName) -> &str {
        self.fields.get(name)
    }

    pub fn claim_type(&self) -> Option<ClaimType> {
        self.fields.claim_type()
    }

    pub fn total_attachment_bytes(&self) -> u64 {
        self.attachments.iter().map(Attachment::size).sum()
    }
}
