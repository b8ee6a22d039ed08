//! Property tests for the renovate-or-rebuild decision.

use proptest::prelude::*;
use sustainabuild::scenario::{aggregate, FormulaVariant, ResolvedBaselines};
use sustainabuild::{
    BuildingInputs, Decision, EnergyBaseline, Estimator, EstimatorError, ScenarioCategory,
    ScenarioPreset, ScenarioResult,
};

const BUILDING_TYPES: [&str; 5] = ["office", "residential", "institutional", "industrial", "barn"];
const CLIMATES: [&str; 9] = [
    "temperate", "cold", "hot-dry", "hot-humid", "coastal", "mountain", "warm", "hot", "polar",
];
const MATERIALS: [&str; 6] = ["concrete", "steel", "timber", "masonry", "mixed", "adobe"];

fn building_strategy() -> impl Strategy<Value = BuildingInputs> {
    (
        prop::sample::select(BUILDING_TYPES.to_vec()),
        1.0..100_000.0f64,
        prop::sample::select(CLIMATES.to_vec()),
        proptest::collection::vec((prop::sample::select(MATERIALS.to_vec()), 0.0..500.0f64), 0..4),
        0.0..20_000.0f64,
        0.0..1_000.0f64,
        1.0..100.0f64,
        0.0..=1.0f64,
    )
        .prop_map(
            |(building_type, area, climate, materials, embodied, operational, lifespan, reuse)| {
                let mut inputs = BuildingInputs::new(building_type, area, climate)
                    .with_program(building_type)
                    .with_embodied_energy(EnergyBaseline::Known(embodied))
                    .with_operational_energy(EnergyBaseline::Known(operational))
                    .with_design_lifespan(lifespan)
                    .with_reuse_rate(reuse);
                for (material, tonnes) in materials {
                    inputs = inputs.with_material(material, tonnes);
                }
                inputs
            },
        )
}

fn variant_strategy() -> impl Strategy<Value = FormulaVariant> {
    prop::sample::select(FormulaVariant::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_total_is_sum_of_terms(inputs in building_strategy(), variant in variant_strategy()) {
        let result = Estimator::new(variant).compute_scenarios(&inputs).unwrap();
        for scenario in &result.all_scenario_results {
            prop_assert_eq!(
                scenario.total_carbon,
                scenario.embodied_carbon + scenario.operational_carbon
            );
            prop_assert!(scenario.embodied_carbon >= 0);
            prop_assert!(scenario.operational_carbon >= 0);
        }
    }

    #[test]
    fn prop_best_scenarios_are_category_minima(
        inputs in building_strategy(),
        variant in variant_strategy(),
    ) {
        let result = Estimator::new(variant).compute_scenarios(&inputs).unwrap();

        for category in [ScenarioCategory::Renovation, ScenarioCategory::Newbuild] {
            let best = match category {
                ScenarioCategory::Renovation => &result.best_renovation,
                ScenarioCategory::Newbuild => &result.best_newbuild,
            };
            prop_assert_eq!(best.category, category);
            for scenario in result.scenarios_in(category) {
                prop_assert!(best.total_carbon <= scenario.total_carbon);
            }
            // first entry with the minimum total wins
            let first_min = result
                .scenarios_in(category)
                .find(|s| s.total_carbon == best.total_carbon)
                .unwrap();
            prop_assert_eq!(&first_min.scenario_key, &best.scenario_key);
        }
    }

    #[test]
    fn prop_decision_and_savings_consistent(
        inputs in building_strategy(),
        variant in variant_strategy(),
    ) {
        let result = Estimator::new(variant).compute_scenarios(&inputs).unwrap();
        let renovation = result.best_renovation.total_carbon;
        let newbuild = result.best_newbuild.total_carbon;

        let expected = if renovation < newbuild {
            Decision::Renovate
        } else {
            Decision::DemolishAndRebuild
        };
        prop_assert_eq!(result.decision, expected);
        prop_assert_eq!(result.recommended().category, result.decision.category());
        prop_assert_eq!(&result.recommended_scenario, &result.recommended().display_name);

        prop_assert!(result.savings >= 0);
        prop_assert_eq!(result.savings, (renovation - newbuild).abs());
        prop_assert!(result.savings_percent >= 0.0);
        prop_assert!(result.savings_percent <= 100.0);
    }

    #[test]
    fn prop_estimate_is_deterministic(
        inputs in building_strategy(),
        variant in variant_strategy(),
    ) {
        let estimator = Estimator::new(variant);
        let first = serde_json::to_string(&estimator.compute_scenarios(&inputs).unwrap()).unwrap();
        let second = serde_json::to_string(&estimator.compute_scenarios(&inputs).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_unrecognised_keys_never_fail(
        building_type in "[a-z-]{0,12}",
        climate in "[a-z-]{0,12}",
        program in "[a-z-]{0,12}",
        material in "[a-z-]{1,12}",
        context in "[a-z-]{0,16}",
        area in 1.0..10_000.0f64,
    ) {
        let inputs = BuildingInputs::new(building_type, area, climate)
            .with_program(program)
            .with_material(material, 1.0)
            .with_embodied_energy(EnergyBaseline::unknown(context.clone()))
            .with_operational_energy(EnergyBaseline::unknown(context));

        for variant in [FormulaVariant::ReuseAware, FormulaVariant::MaterialAware] {
            let result = Estimator::new(variant).compute_scenarios(&inputs);
            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap().all_scenario_results.len(), 7);
        }
    }
}

// =============================================================================
// Tie and category handling
// =============================================================================

fn fixed(key: &str, category: ScenarioCategory, total: i64) -> ScenarioResult {
    let preset = ScenarioPreset::new(key, key, category);
    ScenarioResult::from_energies(&preset, total as f64, 0.0).unwrap()
}

fn baselines() -> ResolvedBaselines {
    ResolvedBaselines::resolve(
        FormulaVariant::ReuseAware,
        &BuildingInputs::new("office", 100.0, "temperate"),
    )
}

#[test]
fn test_exact_tie_recommends_demolition() {
    let results = vec![
        fixed("r", ScenarioCategory::Renovation, 5_000),
        fixed("n", ScenarioCategory::Newbuild, 5_000),
    ];
    let result = aggregate(results, FormulaVariant::ReuseAware, baselines()).unwrap();

    assert_eq!(result.decision, Decision::DemolishAndRebuild);
    assert_eq!(result.savings, 0);
    assert_eq!(result.savings_percent, 0.0);
}

#[test]
fn test_all_zero_totals() {
    let inputs = BuildingInputs::new("office", 100.0, "temperate")
        .with_embodied_energy(EnergyBaseline::Known(0.0))
        .with_operational_energy(EnergyBaseline::Known(0.0));
    let result = Estimator::default().compute_scenarios(&inputs).unwrap();

    assert_eq!(result.decision, Decision::DemolishAndRebuild);
    assert_eq!(result.savings_percent, 0.0);
    assert_eq!(result.best_renovation.scenario_key, "light-renovation");
    assert_eq!(result.best_newbuild.scenario_key, "code-compliant-new");
}

#[test]
fn test_missing_category_is_an_error() {
    let results = vec![fixed("r", ScenarioCategory::Renovation, 10)];
    let err = aggregate(results, FormulaVariant::ReuseAware, baselines()).unwrap_err();
    assert!(matches!(
        err,
        EstimatorError::MissingCategory(ScenarioCategory::Newbuild)
    ));
}
