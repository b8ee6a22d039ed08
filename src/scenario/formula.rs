//! Per-scenario carbon formula.
//!
//! Three configurations of the same engine exist. They differ in coefficient
//! tables, preset catalog and the shape of the embodied and operational terms:
//!
//! - `ReuseAware`: embodied scaled by `(1 - reuse_rate)`, operational baseline
//!   taken from the building type unless given explicitly.
//! - `MaterialAware`: embodied baseline plus a material-quantity add-on, no
//!   reuse term, operational from building type times program factor.
//! - `Legacy`: six presets, four-zone climate, user reuse rate and lifespan,
//!   and a grid-intensity placeholder on operational.
//!
//! All energies are megajoules, rounded to the nearest integer when the
//! [`ScenarioResult`] is built and never again.

use super::preset::{legacy_catalog, seven_scenario_catalog, ScenarioCategory, ScenarioPreset};
use crate::error::{EstimatorError, Result};
use crate::inputs::BuildingInputs;
use crate::tables::{
    average_material_factor, embodied_context_baseline, material_embodied_carbon,
    operational_context_baseline, program_baseline, program_factor, ClimateTable,
    CARBON_TO_ENERGY_MJ_PER_KG, DEFAULT_EMBODIED_BASELINE, DEFAULT_PROGRAM_FACTOR, MJ_PER_KWH,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid carbon intensity placeholder applied by the legacy estimator.
pub const LEGACY_GRID_INTENSITY: f64 = 0.5;

/// Largest energy term a scenario may report (MJ).
///
/// 2^53, the last integer an `f64` holds exactly. Two terms at this bound
/// still sum well inside `i64`.
pub const MAX_SCENARIO_ENERGY_MJ: f64 = 9_007_199_254_740_992.0;

/// Selects coefficient tables, preset catalog and formula shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaVariant {
    /// Reuse-aware seven-scenario estimator (canonical)
    #[default]
    ReuseAware,
    /// Material-quantity estimator without a reuse term (deprecated)
    MaterialAware,
    /// Six-scenario estimator with four climate zones (deprecated)
    Legacy,
}

impl FormulaVariant {
    pub const ALL: [FormulaVariant; 3] = [
        FormulaVariant::ReuseAware,
        FormulaVariant::MaterialAware,
        FormulaVariant::Legacy,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "reuse-aware" | "reuse" => Some(FormulaVariant::ReuseAware),
            "material-aware" | "material" => Some(FormulaVariant::MaterialAware),
            "legacy" => Some(FormulaVariant::Legacy),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FormulaVariant::ReuseAware => "reuse-aware",
            FormulaVariant::MaterialAware => "material-aware",
            FormulaVariant::Legacy => "legacy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaVariant::ReuseAware => "Reuse-aware (7 scenarios)",
            FormulaVariant::MaterialAware => "Material-aware (7 scenarios)",
            FormulaVariant::Legacy => "Legacy (6 scenarios)",
        }
    }

    /// Deprecated variants stay available for parity with older results.
    ///
    /// `MaterialAware` ignores the preset reuse rate in its embodied term, so
    /// reuse does not reduce embodied carbon there.
    pub fn is_deprecated(&self) -> bool {
        !matches!(self, FormulaVariant::ReuseAware)
    }

    /// Climate table read by this variant.
    pub fn climate_table(&self) -> ClimateTable {
        match self {
            FormulaVariant::ReuseAware | FormulaVariant::MaterialAware => ClimateTable::SixZone,
            FormulaVariant::Legacy => ClimateTable::FourZone,
        }
    }

    /// Preset catalog for `inputs`, in tie-break order.
    pub fn catalog(&self, inputs: &BuildingInputs) -> Result<Vec<ScenarioPreset>> {
        match self {
            FormulaVariant::ReuseAware | FormulaVariant::MaterialAware => {
                Ok(seven_scenario_catalog())
            }
            FormulaVariant::Legacy => {
                let lifespan = inputs
                    .design_lifespan_years
                    .ok_or(EstimatorError::MissingField("design_lifespan_years"))?;
                Ok(legacy_catalog(lifespan))
            }
        }
    }
}

impl fmt::Display for FormulaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Coefficients resolved once per calculation and shared by every scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBaselines {
    /// Gross floor area (m²)
    pub floor_area_m2: f64,
    /// Embodied baseline including any material add-on (MJ/m²)
    pub embodied_base_mj_per_m2: f64,
    /// Material quantity add-on included above (MJ/m²)
    pub material_add_on_mj_per_m2: f64,
    /// Operational baseline before climate and improvement (kWh/m²/yr)
    pub operational_baseline_kwh_per_m2: f64,
    /// Baseline implied by a declared operational context (kWh/m²/yr)
    pub operational_context_kwh_per_m2: Option<f64>,
    pub program_factor: f64,
    pub climate_factor: f64,
    /// Mean factor of the selected materials
    pub material_factor: f64,
    pub total_material_tonnes: f64,
    /// User reuse rate (legacy estimator only)
    pub reuse_rate: Option<f64>,
}

impl ResolvedBaselines {
    /// Resolves every lookup for `inputs` under `variant`.
    ///
    /// Lookup misses resolve to the documented defaults, never to errors.
    pub fn resolve(variant: FormulaVariant, inputs: &BuildingInputs) -> Self {
        let area = inputs.floor_area_m2;
        let climate_factor = variant.climate_table().multiplier(&inputs.climate_zone);
        let material_factor = average_material_factor(inputs.material_keys());
        let total_material_tonnes = inputs.total_material_tonnes();
        let operational_context_kwh_per_m2 =
            operational_context_baseline(inputs.operational_energy.context());

        let direct_embodied = inputs
            .embodied_energy
            .known_value()
            .unwrap_or_else(|| embodied_context_baseline(inputs.embodied_energy.context()));

        match variant {
            FormulaVariant::ReuseAware => Self {
                floor_area_m2: area,
                embodied_base_mj_per_m2: direct_embodied,
                material_add_on_mj_per_m2: 0.0,
                operational_baseline_kwh_per_m2: inputs
                    .operational_energy
                    .known_value()
                    .unwrap_or_else(|| program_baseline(&inputs.building_type)),
                operational_context_kwh_per_m2,
                program_factor: DEFAULT_PROGRAM_FACTOR,
                climate_factor,
                material_factor,
                total_material_tonnes,
                reuse_rate: None,
            },
            FormulaVariant::MaterialAware => {
                let material_carbon_kg: f64 = inputs
                    .materials
                    .iter()
                    .map(|m| m.quantity_tonnes * material_embodied_carbon(&m.material))
                    .sum();
                let material_energy_mj = material_carbon_kg * CARBON_TO_ENERGY_MJ_PER_KG;
                let add_on = material_energy_mj / area;

                Self {
                    floor_area_m2: area,
                    embodied_base_mj_per_m2: direct_embodied + add_on,
                    material_add_on_mj_per_m2: add_on,
                    operational_baseline_kwh_per_m2: program_baseline(&inputs.building_type),
                    operational_context_kwh_per_m2,
                    program_factor: program_factor(inputs.program_after_renovation.as_deref()),
                    climate_factor,
                    material_factor,
                    total_material_tonnes,
                    reuse_rate: None,
                }
            }
            FormulaVariant::Legacy => Self {
                floor_area_m2: area,
                embodied_base_mj_per_m2: inputs
                    .embodied_energy
                    .known_value()
                    .unwrap_or(DEFAULT_EMBODIED_BASELINE),
                material_add_on_mj_per_m2: 0.0,
                operational_baseline_kwh_per_m2: inputs
                    .operational_energy
                    .known_value()
                    .unwrap_or_else(|| program_baseline(&inputs.building_type)),
                operational_context_kwh_per_m2,
                program_factor: DEFAULT_PROGRAM_FACTOR,
                climate_factor,
                material_factor,
                total_material_tonnes,
                reuse_rate: Some(inputs.reuse_rate.unwrap_or(0.0)),
            },
        }
    }
}

/// Carbon figures for one scenario. Energies are whole megajoules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_key: String,
    pub display_name: String,
    pub category: ScenarioCategory,
    /// Service life used for the operational term (years)
    pub lifespan_years: f64,
    /// Preset reuse rate, for reporting
    pub reuse_rate: f64,
    /// Embodied energy (MJ)
    pub embodied_carbon: i64,
    /// Operational energy over the lifespan (MJ)
    pub operational_carbon: i64,
    /// Embodied plus operational (MJ)
    pub total_carbon: i64,
}

impl ScenarioResult {
    /// Builds a result from unrounded energies, rounding each term once.
    ///
    /// The total is the sum of the rounded terms so that
    /// `total == embodied + operational` holds exactly.
    ///
    /// # Errors
    /// [`EstimatorError::EnergyOutOfRange`] when a term is not finite or its
    /// magnitude exceeds [`MAX_SCENARIO_ENERGY_MJ`].
    pub fn from_energies(
        preset: &ScenarioPreset,
        embodied_mj: f64,
        operational_mj: f64,
    ) -> Result<Self> {
        let embodied_carbon = round_mj(preset, "embodied", embodied_mj)?;
        let operational_carbon = round_mj(preset, "operational", operational_mj)?;
        let total_carbon = embodied_carbon
            .checked_add(operational_carbon)
            .ok_or_else(|| out_of_range(preset, "total", embodied_mj + operational_mj))?;

        Ok(Self {
            scenario_key: preset.key.clone(),
            display_name: preset.display_name.clone(),
            category: preset.category,
            lifespan_years: preset.lifespan_years,
            reuse_rate: preset.reuse_rate,
            embodied_carbon,
            operational_carbon,
            total_carbon,
        })
    }

    /// Embodied share of the total, in percent (0 for a zero total).
    pub fn embodied_share_percent(&self) -> f64 {
        if self.total_carbon == 0 {
            0.0
        } else {
            self.embodied_carbon as f64 / self.total_carbon as f64 * 100.0
        }
    }

    /// Total energy per square metre of floor area (MJ/m²).
    pub fn intensity_per_m2(&self, floor_area_m2: f64) -> f64 {
        if floor_area_m2 > 0.0 {
            self.total_carbon as f64 / floor_area_m2
        } else {
            0.0
        }
    }
}

fn round_mj(preset: &ScenarioPreset, term: &'static str, value: f64) -> Result<i64> {
    if !value.is_finite() || value.abs() > MAX_SCENARIO_ENERGY_MJ {
        return Err(out_of_range(preset, term, value));
    }
    Ok(value.round() as i64)
}

fn out_of_range(preset: &ScenarioPreset, term: &'static str, value: f64) -> EstimatorError {
    EstimatorError::EnergyOutOfRange {
        scenario: preset.key.clone(),
        term,
        value,
    }
}

/// Applies the formula of `variant` to one preset.
///
/// # Arguments
/// * `variant` - Formula shape to apply
/// * `baselines` - Coefficients from [`ResolvedBaselines::resolve`]
/// * `preset` - Scenario coefficients
///
/// # Returns
/// The rounded [`ScenarioResult`] for this preset, or
/// [`EstimatorError::EnergyOutOfRange`] when the inputs are too large for
/// the result to be represented.
pub fn compute_scenario(
    variant: FormulaVariant,
    baselines: &ResolvedBaselines,
    preset: &ScenarioPreset,
) -> Result<ScenarioResult> {
    let area = baselines.floor_area_m2;

    let (embodied_mj, operational_mj) = match variant {
        FormulaVariant::ReuseAware => {
            let embodied_per_m2 = baselines.embodied_base_mj_per_m2
                * preset.embodied_factor
                * (1.0 - preset.reuse_rate);
            let embodied = embodied_per_m2 * area;

            let operational_climate =
                baselines.operational_baseline_kwh_per_m2 * baselines.climate_factor;
            let kwh_per_m2_year = operational_climate * (1.0 - preset.operational_improvement);
            let operational = kwh_per_m2_year * MJ_PER_KWH * preset.lifespan_years * area;
            (embodied, operational)
        }
        FormulaVariant::MaterialAware => {
            let embodied_per_m2 = baselines.embodied_base_mj_per_m2 * preset.embodied_factor;
            let embodied = embodied_per_m2 * area;

            let kwh_per_m2_year = baselines.operational_baseline_kwh_per_m2
                * baselines.program_factor
                * baselines.climate_factor
                * (1.0 - preset.operational_improvement);
            let operational = kwh_per_m2_year * MJ_PER_KWH * preset.lifespan_years * area;
            (embodied, operational)
        }
        FormulaVariant::Legacy => {
            let reuse = baselines.reuse_rate.unwrap_or(0.0);
            let embodied = baselines.embodied_base_mj_per_m2
                * area
                * preset.embodied_factor
                * baselines.material_factor
                * (1.0 - reuse);
            let operational = baselines.operational_baseline_kwh_per_m2
                * (1.0 - preset.operational_improvement)
                * area
                * baselines.climate_factor
                * preset.lifespan_years
                * LEGACY_GRID_INTENSITY;
            (embodied, operational)
        }
    };

    ScenarioResult::from_energies(preset, embodied_mj, operational_mj)
}
