use claim_wizard::{
    AdvanceOutcome, Attachment, FieldName, WizardController, WizardStep,
};
use proptest::prelude::*;

fn field_name() -> impl Strategy<Value = FieldName> {
    prop_oneof![
        Just(FieldName::IncidentDescription),
        Just(FieldName::IncidentDate),
        Just(FieldName::IncidentLocation),
        Just(FieldName::InsuranceProvider),
        Just(FieldName::PolicyNumber),
        Just(FieldName::ClaimType),
    ]
}

fn step() -> impl Strategy<Value = WizardStep> {
    prop_oneof![
        Just(WizardStep::IncidentDetails),
        Just(WizardStep::InsuranceInfo),
        Just(WizardStep::Review),
    ]
}

fn attachments(names: &[String]) -> Vec<Attachment> {
    names
        .iter()
        .map(|name| Attachment::new(name.clone(), "image/png", name.as_bytes().to_vec()))
        .collect()
}

/// Drives a fresh wizard onto `target` with every gate satisfied.
fn wizard_at(target: WizardStep) -> WizardController {
    let mut wizard = WizardController::new();
    wizard.add_files(attachments(&["seed.png".to_string()]));
    wizard.set_field(FieldName::IncidentDescription, "seed");
    wizard.set_field(FieldName::InsuranceProvider, "Acme Mutual");
    wizard.set_field(FieldName::PolicyNumber, "POL-1");
    wizard.set_field(FieldName::ClaimType, "other");
    while wizard.step() < target {
        wizard.advance();
    }
    wizard
}

proptest! {
    #[test]
    fn prop_last_write_wins(
        writes in prop::collection::vec((field_name(), ".{0,12}"), 1..40)
    ) {
        let mut wizard = WizardController::new();
        for (name, value) in &writes {
            wizard.set_field(*name, value.clone());
        }
        for name in FieldName::ALL {
            let expected = writes
                .iter()
                .rev()
                .find(|(written, _)| *written == name)
                .map(|(_, value)| value.as_str())
                .unwrap_or("");
            prop_assert_eq!(wizard.fields().get(name), expected);
        }
    }

    #[test]
    fn prop_first_gate(
        names in prop::collection::vec("[a-z]{1,8}\\.jpg", 0..4),
        description in "[ \\ta-z]{0,10}",
    ) {
        let mut wizard = WizardController::new();
        wizard.add_files(attachments(&names));
        wizard.set_field(FieldName::IncidentDescription, description.clone());

        let expected = !names.is_empty() && !description.trim().is_empty();
        prop_assert_eq!(wizard.can_advance(WizardStep::IncidentDetails), expected);
    }

    #[test]
    fn prop_second_gate(
        provider in "[ A-Za-z]{0,6}",
        policy in "[ A-Z0-9-]{0,6}",
        claim_type in prop_oneof![
            Just(String::new()),
            Just("auto".to_string()),
            Just("home".to_string()),
            Just("health".to_string()),
            Just("renters".to_string()),
            Just("other".to_string()),
            Just("boat".to_string()),
            Just("AUTO".to_string()),
        ],
    ) {
        let mut wizard = WizardController::new();
        wizard.set_field(FieldName::InsuranceProvider, provider.clone());
        wizard.set_field(FieldName::PolicyNumber, policy.clone());
        wizard.set_field(FieldName::ClaimType, claim_type.clone());

        let valid_type = ["auto", "home", "health", "renters", "other"].contains(&claim_type.as_str());
        let expected = !provider.trim().is_empty() && !policy.trim().is_empty() && valid_type;
        prop_assert_eq!(wizard.can_advance(WizardStep::InsuranceInfo), expected);
    }

    #[test]
    fn prop_blocked_advance_keeps_step(target in step(), blank in field_name()) {
        let mut wizard = wizard_at(target);
        wizard.set_field(blank, "");
        let gated = !wizard.can_advance(target);

        let outcome = wizard.advance();
        if gated {
            prop_assert_eq!(outcome, AdvanceOutcome::Blocked(target));
            prop_assert_eq!(wizard.step(), target);
        } else {
            prop_assert!(!matches!(outcome, AdvanceOutcome::Blocked(_)));
        }
    }

    #[test]
    fn prop_retreat_never_below_first(start in step(), retreats in 0usize..6) {
        let mut wizard = wizard_at(start);
        for _ in 0..retreats {
            let step = wizard.retreat();
            prop_assert!(step.number() >= 1);
        }
        let expected = start.number().saturating_sub(retreats as u8).max(1);
        prop_assert_eq!(wizard.step().number(), expected);
    }

    #[test]
    fn prop_remove_file(
        names in prop::collection::vec("[a-z]{1,6}", 0..8),
        index in 0usize..10,
    ) {
        let mut wizard = WizardController::new();
        wizard.add_files(attachments(&names));
        let removed = wizard.remove_file(index);

        let remaining: Vec<String> =
            wizard.attachments().iter().map(|a| a.name.clone()).collect();
        if index < names.len() {
            let mut expected = names.clone();
            let gone = expected.remove(index);
            prop_assert_eq!(removed.map(|a| a.name), Some(gone));
            prop_assert_eq!(remaining, expected);
        } else {
            prop_assert!(removed.is_none());
            prop_assert_eq!(remaining, names);
        }
    }
}
