//! End-to-end calculator form flows.

use sustainabuild::wizard::{FieldValue, FormField, WizardAction, WizardError};
use sustainabuild::{
    Decision, EnergyBaseline, Estimator, FormulaVariant, Transition, WizardState,
};

fn advance(state: &WizardState) -> WizardState {
    match state.next() {
        Ok(Transition::Advanced(next)) => next,
        other => panic!("expected to advance from step {}, got {:?}", state.step_number(), other),
    }
}

// =============================================================================
// Material-aware form (four steps)
// =============================================================================

#[test]
fn test_material_aware_flow_to_estimate() {
    let step1 = WizardState::new(FormulaVariant::MaterialAware)
        .update(FieldValue::BuildingType("office".into()));
    let step2 = advance(&step1)
        .update(FieldValue::ProgramAfterRenovation("residential".into()))
        .update(FieldValue::FloorArea(2400.0))
        .update(FieldValue::ClimateZone("cold".into()));
    assert_eq!(step2.progress(), (2, 4));

    let step3 = advance(&step2)
        .update(FieldValue::MaterialQuantity {
            material: "concrete".into(),
            tonnes: 900.0,
        })
        .update(FieldValue::MaterialQuantity {
            material: "timber".into(),
            tonnes: 60.0,
        });
    let step4 = advance(&step3)
        .update(FieldValue::EmbodiedEnergy(EnergyBaseline::unknown("medium-construction")))
        .update(FieldValue::OperationalEnergy(EnergyBaseline::Known(180.0)));
    assert!(step4.is_last_step());
    assert_eq!(
        step4.allowed_actions(),
        vec![WizardAction::Calculate, WizardAction::Back, WizardAction::Reset]
    );

    let inputs = match step4.apply(WizardAction::Calculate).unwrap() {
        Transition::Completed(inputs) => inputs,
        other => panic!("expected completion, got {:?}", other),
    };
    assert_eq!(inputs.building_type, "office");
    assert_eq!(inputs.program_after_renovation.as_deref(), Some("residential"));
    assert_eq!(inputs.materials.len(), 2);

    let result = Estimator::new(FormulaVariant::MaterialAware)
        .compute_scenarios(&inputs)
        .unwrap();
    assert_eq!(result.all_scenario_results.len(), 7);
    assert_eq!(result.baselines.climate_factor, 1.27);
    assert_eq!(result.baselines.program_factor, 0.71);
}

#[test]
fn test_material_without_quantity_blocks_step() {
    let state = WizardState::new(FormulaVariant::MaterialAware)
        .update(FieldValue::BuildingType("office".into()));
    let state = advance(&state)
        .update(FieldValue::ProgramAfterRenovation("office".into()))
        .update(FieldValue::FloorArea(500.0))
        .update(FieldValue::ClimateZone("temperate".into()));
    let state = advance(&state).update(FieldValue::ToggleMaterial("steel".into()));

    match state.next() {
        Err(WizardError::StepInvalid { step, issues }) => {
            assert_eq!(step, 3);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].field, FormField::Materials);
            assert_eq!(issues[0].message, "Enter a quantity greater than zero for steel");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

// =============================================================================
// Reuse-aware form (two steps)
// =============================================================================

#[test]
fn test_reuse_aware_flow() {
    let first = WizardState::new(FormulaVariant::ReuseAware)
        .update(FieldValue::BuildingType("office".into()))
        .update(FieldValue::FloorArea(500.0))
        .update(FieldValue::ClimateZone("temperate".into()));
    let second = advance(&first)
        .update(FieldValue::ToggleMaterial("concrete".into()))
        .update(FieldValue::EmbodiedEnergy(EnergyBaseline::Known(10500.0)))
        .update(FieldValue::OperationalEnergy(EnergyBaseline::Known(20.0)));

    let inputs = match second.next().unwrap() {
        Transition::Completed(inputs) => inputs,
        other => panic!("expected completion, got {:?}", other),
    };
    let result = Estimator::default().compute_scenarios(&inputs).unwrap();
    assert_eq!(result.decision, Decision::Renovate);
}

#[test]
fn test_unknown_baseline_needs_context() {
    let first = WizardState::new(FormulaVariant::ReuseAware)
        .update(FieldValue::BuildingType("office".into()))
        .update(FieldValue::FloorArea(500.0))
        .update(FieldValue::ClimateZone("temperate".into()));
    let second = advance(&first)
        .update(FieldValue::ToggleMaterial("timber".into()))
        .update(FieldValue::EmbodiedEnergy(EnergyBaseline::Unknown { context: None }))
        .update(FieldValue::OperationalEnergy(EnergyBaseline::Unknown { context: None }));

    let issues = second.validate_step();
    let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Select a construction context", "Select a performance context"]
    );

    let fixed = second
        .update(FieldValue::EmbodiedEnergy(EnergyBaseline::unknown("light-construction")))
        .update(FieldValue::OperationalEnergy(EnergyBaseline::unknown("existing-standard")));
    assert!(fixed.validate_step().is_empty());
}

#[test]
fn test_back_keeps_answers_and_reset_clears() {
    let first = WizardState::new(FormulaVariant::ReuseAware)
        .update(FieldValue::BuildingType("residential".into()))
        .update(FieldValue::FloorArea(800.0))
        .update(FieldValue::ClimateZone("coastal".into()));
    let second = advance(&first);

    let back = match second.apply(WizardAction::Back).unwrap() {
        Transition::Advanced(state) => state,
        other => panic!("expected to go back, got {:?}", other),
    };
    assert_eq!(back.step_number(), 1);
    assert_eq!(back.draft().floor_area_m2, Some(800.0));
    assert_eq!(back, first);

    let reset = second.reset();
    assert_eq!(reset.step_number(), 1);
    assert_eq!(reset.draft().building_type, None);
    assert_eq!(second.step_number(), 2);
}

// =============================================================================
// Legacy form
// =============================================================================

#[test]
fn test_legacy_flow_requires_known_values() {
    let first = WizardState::new(FormulaVariant::Legacy)
        .update(FieldValue::FloorArea(1000.0))
        .update(FieldValue::DesignLifespan(50.0))
        .update(FieldValue::ClimateZone("hot".into()));
    let second = advance(&first)
        .update(FieldValue::ToggleMaterial("steel".into()))
        .update(FieldValue::EmbodiedEnergy(EnergyBaseline::unknown("light-construction")))
        .update(FieldValue::OperationalEnergy(EnergyBaseline::Known(200.0)))
        .update(FieldValue::ReuseRatePercent(20.0));
    assert!(second.next().is_err());

    let second = second.update(FieldValue::EmbodiedEnergy(EnergyBaseline::Known(5000.0)));
    let inputs = match second.next().unwrap() {
        Transition::Completed(inputs) => inputs,
        other => panic!("expected completion, got {:?}", other),
    };
    assert_eq!(inputs.reuse_rate, Some(0.2));

    let result = Estimator::new(FormulaVariant::Legacy)
        .compute_scenarios(&inputs)
        .unwrap();
    assert_eq!(result.all_scenario_results.len(), 6);
}
