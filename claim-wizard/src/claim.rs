//! Output contract of the claim-generation collaborator.
//!
//! The wizard never produces claim text itself. A [`ClaimGenerator`] receives the
//! [`SubmissionPayload`] and returns a [`ClaimRecord`], which the review surface can
//! edit section by section and export as plain text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::{
    error::{Result, WizardError},
    payload::SubmissionPayload,
};

/// Default file name for the plain-text export.
pub const EXPORT_FILE_NAME: &str = "insurance-claim.txt";

/// Claim strength on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self> {
        if value > Self::MAX {
            return Err(WizardError::InvalidStrengthScore(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for StrengthScore {
    type Error = WizardError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StrengthScore> for u32 {
    fn from(score: StrengthScore) -> Self {
        u32::from(score.0)
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Editable parts of a generated claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimSection {
    IncidentDescription,
    DamageAssessment,
    ClaimJustification,
    RequestedAmount,
}

impl ClaimSection {
    pub const ALL: [ClaimSection; 4] = [
        ClaimSection::IncidentDescription,
        ClaimSection::DamageAssessment,
        ClaimSection::ClaimJustification,
        ClaimSection::RequestedAmount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimSection::IncidentDescription => "incidentDescription",
            ClaimSection::DamageAssessment => "damageAssessment",
            ClaimSection::ClaimJustification => "claimJustification",
            ClaimSection::RequestedAmount => "requestedAmount",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            ClaimSection::IncidentDescription => "Incident Description",
            ClaimSection::DamageAssessment => "Damage Assessment",
            ClaimSection::ClaimJustification => "Claim Justification",
            ClaimSection::RequestedAmount => "Requested Amount",
        }
    }
}

impl FromStr for ClaimSection {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s.chars().filter(|c| *c != '_' && *c != '-').collect();
        ClaimSection::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| WizardError::UnknownClaimSection(s.to_string()))
    }
}

/// A generated claim as shown on the review surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub incident_description: String,
    pub damage_assessment: String,
    pub claim_justification: String,
    /// Currency-formatted, e.g. `$12,450`.
    pub requested_amount: String,
    pub strength_score: StrengthScore,
}

impl ClaimRecord {
    pub fn section(&self, section: ClaimSection) -> &str {
        match section {
            ClaimSection::IncidentDescription => &self.incident_description,
            ClaimSection::DamageAssessment => &self.damage_assessment,
            ClaimSection::ClaimJustification => &self.claim_justification,
            ClaimSection::RequestedAmount => &self.requested_amount,
        }
    }

    /// Replaces one section with user-edited text.
    pub fn update_section(&mut self, section: ClaimSection, text: impl Into<String>) {
        let slot = match section {
            ClaimSection::IncidentDescription => &mut self.incident_description,
            ClaimSection::DamageAssessment => &mut self.damage_assessment,
            ClaimSection::ClaimJustification => &mut self.claim_justification,
            ClaimSection::RequestedAmount => &mut self.requested_amount,
        };
        *slot = text.into();
    }

    /// Plain-text document offered for download.
    pub fn to_plain_text(&self) -> String {
        format!(
            "INSURANCE CLAIM DOCUMENT\n\n\
             Incident Description:\n{}\n\n\
             Damage Assessment:\n{}\n\n\
             Claim Justification:\n{}\n\n\
             Requested Amount: {}",
            self.incident_description,
            self.damage_assessment,
            self.claim_justification,
            self.requested_amount,
        )
        .trim()
        .to_string()
    }
}

/// Formats a whole-dollar amount with a `$` prefix and thousands separators.
pub fn format_currency(whole_dollars: u64) -> String {
    let digits = whole_dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// External collaborator that turns a finished submission into a claim.
#[async_trait]
pub trait ClaimGenerator: Send + Sync {
    async fn generate(&self, payload: &SubmissionPayload) -> Result<ClaimRecord>;
}

/// Returns a fixed sample claim regardless of input.
///
/// Stands in for a real generator while the generation service does not exist.
#[derive(Debug, Clone, Default)]
pub struct SampleClaimGenerator;

const SAMPLE_INCIDENT_DESCRIPTION: &str = "On January 15, 2025, at approximately 2:30 PM, I was involved in a motor vehicle collision at the intersection of Main Street and Oak Avenue during light rain conditions. While proceeding through a green traffic light, the other vehicle failed to yield the right-of-way when making a left turn, resulting in a T-bone collision with the driver's side of my 2022 Honda Accord. The impact caused significant damage to the driver's side door, front quarter panel, and side mirror, with additional damage to the front bumper and headlight assembly.";

const SAMPLE_DAMAGE_ASSESSMENT: &str = "The collision resulted in extensive damage to multiple vehicle components: (1) Driver's side door - severe denting and paint damage requiring full replacement, (2) Front left quarter panel - structural damage with paint transfer from other vehicle, (3) Driver's side mirror - completely detached and non-functional, (4) Front bumper - cracked and misaligned, (5) Left headlight assembly - cracked lens with potential electrical damage, (6) Potential frame damage requiring professional inspection. All damage is consistent with a side-impact collision and directly attributable to the incident.";

const SAMPLE_CLAIM_JUSTIFICATION: &str = "This claim is fully justified under my comprehensive coverage policy. The other driver's failure to yield right-of-way during a left turn constitutes clear liability, as documented in the police report (Report #2025-0115-001). The extensive damage requires immediate repair to ensure vehicle safety and roadworthiness. I have maintained continuous coverage with no prior claims, demonstrating responsible policy management. The requested compensation reflects fair market repair costs based on certified estimates from authorized repair facilities.";

const SAMPLE_REQUESTED_AMOUNT: u64 = 12_450;
const SAMPLE_STRENGTH_SCORE: u32 = 92;

#[async_trait]
impl ClaimGenerator for SampleClaimGenerator {
    async fn generate(&self, payload: &SubmissionPayload) -> Result<ClaimRecord> {
        info!(
            submission_id = %payload.id(),
            attachments = payload.attachments().len(),
            "Returning sample claim"
        );

        Ok(ClaimRecord {
            incident_description: SAMPLE_INCIDENT_DESCRIPTION.to_string(),
            damage_assessment: SAMPLE_DAMAGE_ASSESSMENT.to_string(),
            claim_justification: SAMPLE_CLAIM_JUSTIFICATION.to_string(),
            requested_amount: format_currency(SAMPLE_REQUESTED_AMOUNT),
            strength_score: StrengthScore::new(SAMPLE_STRENGTH_SCORE)?,
        })
    }
}
