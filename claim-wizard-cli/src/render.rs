use claim_wizard::{
    ClaimRecord, ClaimSection, FieldName, Progress, SimulatedProcessing,
    WizardController, WizardStep,
};
use serde_json::{Value, json};

const BAR_WIDTH: usize = 30;

pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

pub fn step_header(step: WizardStep) -> String {
    format!(
        "\n== {} ({}) ==\n{}",
        step.title(),
        step,
        progress_bar(step.progress_percent())
    )
}

/// What the user still has to provide before `next` is accepted.
pub fn missing_requirements(wizard: &WizardController) -> Vec<&'static str> {
    let fields = wizard.fields();
    let mut missing = Vec::new();
    match wizard.step() {
        WizardStep::IncidentDetails => {
            if wizard.attachments().is_empty() {
                missing.push("at least one photo (add <path>)");
            }
            if !fields.is_present(FieldName::IncidentDescription) {
                missing.push("incidentDescription");
            }
        }
        WizardStep::InsuranceInfo => {
            if !fields.is_present(FieldName::InsuranceProvider) {
                missing.push("insuranceProvider");
            }
            if !fields.is_present(FieldName::PolicyNumber) {
                missing.push("policyNumber");
            }
            if fields.claim_type().is_none() {
                missing.push("claimType (auto, home, health, renters, other)");
            }
        }
        WizardStep::Review => {}
    }
    missing
}

pub fn status(wizard: &WizardController) -> String {
    let fields = wizard.fields();
    let mut out = step_header(wizard.step());

    out.push_str("\nAttachments:");
    if wizard.attachments().is_empty() {
        out.push_str(" none");
    }
    for (i, attachment) in wizard.attachments().iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. {} ({}, {} bytes)",
            i + 1,
            attachment.name,
            attachment.media_type,
            attachment.size()
        ));
    }

    out.push_str("\nFields:");
    for name in FieldName::ALL {
        let value = fields.get(name);
        let shown = if name == FieldName::ClaimType {
            fields
                .claim_type()
                .map(|claim_type| claim_type.label())
                .unwrap_or(value)
        } else {
            value
        };
        out.push_str(&format!("\n  {:<20} {}", name.as_str(), shown));
    }

    let missing = missing_requirements(wizard);
    if missing.is_empty() {
        out.push_str("\nReady: type 'next' to continue.");
    } else {
        out.push_str(&format!("\nStill needed: {}", missing.join(", ")));
    }
    out
}

pub fn status_json(session_id: &str, wizard: &WizardController) -> Value {
    json!({
        "session_id": session_id,
        "step": wizard.step().number(),
        "can_advance": wizard.can_advance_current(),
        "attachments": wizard
            .attachments()
            .iter()
            .map(|a| json!({ "name": a.name, "media_type": a.media_type, "size": a.size() }))
            .collect::<Vec<_>>(),
        "fields": wizard.fields(),
        "missing": missing_requirements(wizard),
    })
}

pub fn processing_line(script: &SimulatedProcessing, progress: Progress) -> String {
    let phase = script
        .phases
        .get(progress.phase)
        .map(|p| format!("{}: {}", p.title, p.description))
        .unwrap_or_default();
    format!("{} {}", progress_bar(progress.percent), phase)
}

pub fn claim(claim: &ClaimRecord) -> String {
    let mut out = format!(
        "\n== Claim Generated ==\nClaim Strength Score: {}\n{}",
        claim.strength_score,
        progress_bar(claim.strength_score.value())
    );
    for section in ClaimSection::ALL {
        out.push_str(&format!("\n\n{}:\n{}", section.heading(), claim.section(section)));
    }
    out
}
