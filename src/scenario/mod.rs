//! Scenario presets, the per-scenario formula and the decision aggregator.

pub mod decision;
pub mod formula;
pub mod preset;

pub use decision::{aggregate, best_in_category, round1, Decision, DecisionResult};
pub use formula::{
    compute_scenario, FormulaVariant, ResolvedBaselines, ScenarioResult, LEGACY_GRID_INTENSITY,
    MAX_SCENARIO_ENERGY_MJ,
};
pub use preset::{legacy_catalog, seven_scenario_catalog, ScenarioCategory, ScenarioPreset};
