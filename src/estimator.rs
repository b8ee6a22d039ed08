//! Scenario carbon estimator.
//!
//! [`Estimator::compute_scenarios`] is a pure function of the inputs and the
//! constant tables: it resolves baselines once, applies the selected formula
//! to every preset in catalog order, and aggregates the decision.

use crate::config::EstimatorConfig;
use crate::error::Result;
use crate::inputs::BuildingInputs;
use crate::scenario::{aggregate, compute_scenario, DecisionResult, FormulaVariant, ResolvedBaselines};
use rayon::prelude::*;

/// Carbon estimator bound to one formula variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    variant: FormulaVariant,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(FormulaVariant::default())
    }
}

impl Estimator {
    /// Creates an estimator for `variant`, warning when it is deprecated.
    pub fn new(variant: FormulaVariant) -> Self {
        if variant.is_deprecated() {
            tracing::warn!(
                variant = variant.key(),
                "deprecated formula variant selected, results will not match the reuse-aware estimator"
            );
        }
        Self { variant }
    }

    /// Creates an estimator from configuration.
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.variant)
    }

    pub fn variant(&self) -> FormulaVariant {
        self.variant
    }

    /// Computes every scenario and the renovate-or-rebuild decision.
    ///
    /// # Arguments
    /// * `inputs` - One complete building description
    ///
    /// # Returns
    /// The [`DecisionResult`], or an error when the inputs would make the
    /// arithmetic meaningless (e.g. non-positive floor area).
    ///
    /// # Example
    /// ```
    /// use sustainabuild::estimator::Estimator;
    /// use sustainabuild::inputs::{BuildingInputs, EnergyBaseline};
    ///
    /// let inputs = BuildingInputs::new("office", 1000.0, "temperate")
    ///     .with_embodied_energy(EnergyBaseline::Known(9000.0));
    /// let result = Estimator::default().compute_scenarios(&inputs).unwrap();
    /// assert_eq!(result.all_scenario_results.len(), 7);
    /// ```
    pub fn compute_scenarios(&self, inputs: &BuildingInputs) -> Result<DecisionResult> {
        inputs.validate(self.variant)?;

        let presets = self.variant.catalog(inputs)?;
        let baselines = ResolvedBaselines::resolve(self.variant, inputs);

        let results = presets
            .iter()
            .map(|preset| {
                let result = compute_scenario(self.variant, &baselines, preset)?;
                tracing::debug!(
                    scenario = %result.scenario_key,
                    embodied_mj = result.embodied_carbon,
                    operational_mj = result.operational_carbon,
                    total_mj = result.total_carbon,
                    "scenario computed"
                );
                Ok(result)
            })
            .collect::<Result<Vec<_>>>()?;

        let decision = aggregate(results, self.variant, baselines)?;
        tracing::info!(
            decision = %decision.decision,
            recommended = %decision.recommended_scenario,
            savings_mj = decision.savings,
            savings_percent = decision.savings_percent,
            "decision reached"
        );

        Ok(decision)
    }

    /// Estimates independent buildings in parallel, preserving input order.
    pub fn estimate_batch(&self, buildings: &[BuildingInputs]) -> Vec<Result<DecisionResult>> {
        buildings
            .par_iter()
            .map(|inputs| self.compute_scenarios(inputs))
            .collect()
    }
}

/// Computes scenarios with the canonical estimator.
pub fn compute_scenarios(inputs: &BuildingInputs) -> Result<DecisionResult> {
    Estimator::default().compute_scenarios(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;
    use crate::inputs::EnergyBaseline;
    use crate::scenario::{Decision, ScenarioCategory};

    fn office_block() -> BuildingInputs {
        BuildingInputs::new("office", 7500.0, "temperate")
            .with_program("office")
            .with_material("concrete", 1200.0)
            .with_embodied_energy(EnergyBaseline::Known(9000.0))
    }

    #[test]
    fn test_seven_results_in_catalog_order() {
        let result = compute_scenarios(&office_block()).unwrap();
        assert_eq!(result.all_scenario_results.len(), 7);
        assert_eq!(result.all_scenario_results[0].scenario_key, "light-renovation");
        assert_eq!(result.all_scenario_results[6].scenario_key, "low-carbon-new");
        assert_eq!(result.best_renovation.category, ScenarioCategory::Renovation);
        assert_eq!(result.best_newbuild.category, ScenarioCategory::Newbuild);
    }

    #[test]
    fn test_rejects_zero_area() {
        let mut inputs = office_block();
        inputs.floor_area_m2 = 0.0;
        let err = compute_scenarios(&inputs).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidFloorArea(_)));
    }

    #[test]
    fn test_deterministic() {
        let estimator = Estimator::new(FormulaVariant::MaterialAware);
        let a = estimator.compute_scenarios(&office_block()).unwrap();
        let b = estimator.compute_scenarios(&office_block()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_legacy_six_scenarios() {
        let inputs = BuildingInputs::new("office", 1000.0, "warm")
            .with_material("timber", 0.0)
            .with_embodied_energy(EnergyBaseline::Known(5000.0))
            .with_operational_energy(EnergyBaseline::Known(150.0))
            .with_design_lifespan(60.0)
            .with_reuse_rate(0.4);
        let result = Estimator::new(FormulaVariant::Legacy)
            .compute_scenarios(&inputs)
            .unwrap();

        assert_eq!(result.all_scenario_results.len(), 6);
        assert!(result
            .all_scenario_results
            .iter()
            .all(|s| s.lifespan_years == 60.0));
        assert_eq!(result.baselines.climate_factor, 0.9);
    }

    #[test]
    fn test_batch_preserves_order() {
        let mut bad = office_block();
        bad.floor_area_m2 = -1.0;
        let buildings = vec![office_block(), bad, office_block().with_program("industrial")];

        let results = Estimator::default().estimate_batch(&buildings);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_huge_area_is_an_error_not_a_panic() {
        let inputs = BuildingInputs::new("office", 1e300, "temperate")
            .with_embodied_energy(EnergyBaseline::Known(9000.0))
            .with_operational_energy(EnergyBaseline::Known(350.0));
        let err = compute_scenarios(&inputs).unwrap_err();
        assert!(matches!(err, EstimatorError::EnergyOutOfRange { .. }));

        let overflowing_material = office_block().with_material("steel", 1e300);
        let results = Estimator::new(FormulaVariant::MaterialAware)
            .estimate_batch(&[office_block(), overflowing_material]);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(EstimatorError::EnergyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_high_operational_load_favours_new_build() {
        // Large operational baseline over a long horizon rewards efficient new builds
        let inputs = BuildingInputs::new("industrial", 1000.0, "cold")
            .with_embodied_energy(EnergyBaseline::Known(7500.0));
        let result = compute_scenarios(&inputs).unwrap();
        assert_eq!(result.decision, Decision::DemolishAndRebuild);
    }
}
