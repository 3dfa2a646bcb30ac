use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WizardError;

/// Named form fields captured by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    IncidentDescription,
    IncidentDate,
    IncidentLocation,
    InsuranceProvider,
    PolicyNumber,
    ClaimType,
}

impl FieldName {
    pub const ALL: [FieldName; 6] = [
        FieldName::IncidentDescription,
        FieldName::IncidentDate,
        FieldName::IncidentLocation,
        FieldName::InsuranceProvider,
        FieldName::PolicyNumber,
        FieldName::ClaimType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::IncidentDescription => "incidentDescription",
            FieldName::IncidentDate => "incidentDate",
            FieldName::IncidentLocation => "incidentLocation",
            FieldName::InsuranceProvider => "insuranceProvider",
            FieldName::PolicyNumber => "policyNumber",
            FieldName::ClaimType => "claimType",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = WizardError;

    /// Accepts the camelCase wire name as well as a snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| *c != '_').collect();
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| WizardError::UnknownField(s.to_string()))
    }
}

/// Kind of insurance the claim is filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Auto,
    Home,
    Health,
    Renters,
    Other,
}

impl ClaimType {
    pub const ALL: [ClaimType; 5] = [
        ClaimType::Auto,
        ClaimType::Home,
        ClaimType::Health,
        ClaimType::Renters,
        ClaimType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Auto => "auto",
            ClaimType::Home => "home",
            ClaimType::Health => "health",
            ClaimType::Renters => "renters",
            ClaimType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimType::Auto => "Auto Insurance",
            ClaimType::Home => "Home Insurance",
            ClaimType::Health => "Health Insurance",
            ClaimType::Renters => "Renters Insurance",
            ClaimType::Other => "Other",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimType {
    type Err = WizardError;

    /// Exact match on the enumeration value; the select control never emits anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|claim_type| claim_type.as_str() == s)
            .ok_or_else(|| WizardError::UnknownClaimType(s.to_string()))
    }
}

/// Raw string values of every wizard field, all empty until written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardFields {
    pub incident_description: String,
    pub incident_date: String,
    pub incident_location: String,
    pub insurance_provider: String,
    pub policy_number: String,
    pub claim_type: String,
}

impl WizardFields {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::IncidentDescription => &self.incident_description,
            FieldName::IncidentDate => &self.incident_date,
            FieldName::IncidentLocation => &self.incident_location,
            FieldName::InsuranceProvider => &self.insurance_provider,
            FieldName::PolicyNumber => &self.policy_number,
            FieldName::ClaimType => &self.claim_type,
        }
    }

    pub fn set(&mut self, name: FieldName, value: String) {
        let slot = match name {
            FieldName::IncidentDescription => &mut self.incident_description,
            FieldName::IncidentDate => &mut self.incident_date,
            FieldName::IncidentLocation => &mut self.incident_location,
            FieldName::InsuranceProvider => &mut self.insurance_provider,
            FieldName::PolicyNumber => &mut self.policy_number,
            FieldName::ClaimType => &mut self.claim_type,
        };
        *slot = value;
    }

    /// True when the field holds something other than whitespace.
    pub fn is_present(&self, name: FieldName) -> bool {
        !self.get(name).trim().is_empty()
    }

    /// The claim type, if the stored value is one of the enumeration values.
    pub fn claim_type(&self) -> Option<ClaimType> {
        self.claim_type.parse().ok()
    }

    /// Number of fields holding a non-blank value.
    pub fn populated_count(&self) -> usize {
        FieldName::ALL
            .into_iter()
            .filter(|name| self.is_present(*name))
            .count()
    }
}
