//! Building description consumed by the estimator.
//!
//! Categorical fields are kept as raw form keys so that out-of-table values
//! still reach the lenient lookups in [`crate::tables`].

use crate::error::{EstimatorError, Result};
use crate::scenario::FormulaVariant;
use serde::{Deserialize, Serialize};

/// A directly entered baseline, or "unknown" with an optional context bucket.
///
/// Serialized as a bare number for known values and as
/// `{"context": "heavy-construction"}` for unknown ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnergyBaseline {
    Known(f64),
    Unknown {
        #[serde(default)]
        context: Option<String>,
    },
}

impl Default for EnergyBaseline {
    fn default() -> Self {
        EnergyBaseline::Unknown { context: None }
    }
}

impl EnergyBaseline {
    /// Shorthand for an unknown baseline with a context key.
    pub fn unknown(context: impl Into<String>) -> Self {
        EnergyBaseline::Unknown {
            context: Some(context.into()),
        }
    }

    /// The explicit value, if one was given.
    pub fn known_value(&self) -> Option<f64> {
        match self {
            EnergyBaseline::Known(value) => Some(*value),
            EnergyBaseline::Unknown { .. } => None,
        }
    }

    /// The declared context, if the baseline is unknown.
    pub fn context(&self) -> Option<&str> {
        match self {
            EnergyBaseline::Known(_) => None,
            EnergyBaseline::Unknown { context } => context.as_deref(),
        }
    }
}

/// Quantity of one structural material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    /// Material key (e.g. "steel")
    pub material: String,
    /// Quantity in tonnes
    #[serde(default)]
    pub quantity_tonnes: f64,
}

impl MaterialQuantity {
    pub fn new(material: impl Into<String>, quantity_tonnes: f64) -> Self {
        Self {
            material: material.into(),
            quantity_tonnes,
        }
    }
}

/// One complete snapshot of the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInputs {
    /// Current building type key
    pub building_type: String,
    /// Program after renovation (material-aware estimator only)
    #[serde(default)]
    pub program_after_renovation: Option<String>,
    /// Gross floor area (m²)
    pub floor_area_m2: f64,
    /// Climate zone key
    pub climate_zone: String,
    /// Selected materials in selection order
    #[serde(default)]
    pub materials: Vec<MaterialQuantity>,
    /// Embodied energy of the existing building (MJ/m²)
    #[serde(default)]
    pub embodied_energy: EnergyBaseline,
    /// Operational energy of the existing building (kWh/m²/yr)
    #[serde(default)]
    pub operational_energy: EnergyBaseline,
    /// Design lifespan in years (legacy estimator only)
    #[serde(default)]
    pub design_lifespan_years: Option<f64>,
    /// Fraction of existing fabric reused, 0-1 (legacy estimator only)
    #[serde(default)]
    pub reuse_rate: Option<f64>,
}

impl BuildingInputs {
    /// Creates inputs with unknown baselines and no materials.
    ///
    /// # Example
    /// ```
    /// use sustainabuild::inputs::{BuildingInputs, EnergyBaseline};
    ///
    /// let inputs = BuildingInputs::new("office", 1000.0, "temperate")
    ///     .with_embodied_energy(EnergyBaseline::Known(9000.0));
    /// assert_eq!(inputs.floor_area_m2, 1000.0);
    /// ```
    pub fn new(
        building_type: impl Into<String>,
        floor_area_m2: f64,
        climate_zone: impl Into<String>,
    ) -> Self {
        Self {
            building_type: building_type.into(),
            program_after_renovation: None,
            floor_area_m2,
            climate_zone: climate_zone.into(),
            materials: Vec::new(),
            embodied_energy: EnergyBaseline::default(),
            operational_energy: EnergyBaseline::default(),
            design_lifespan_years: None,
            reuse_rate: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program_after_renovation = Some(program.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>, quantity_tonnes: f64) -> Self {
        self.materials
            .push(MaterialQuantity::new(material, quantity_tonnes));
        self
    }

    pub fn with_embodied_energy(mut self, baseline: EnergyBaseline) -> Self {
        self.embodied_energy = baseline;
        self
    }

    pub fn with_operational_energy(mut self, baseline: EnergyBaseline) -> Self {
        self.operational_energy = baseline;
        self
    }

    pub fn with_design_lifespan(mut self, years: f64) -> Self {
        self.design_lifespan_years = Some(years);
        self
    }

    pub fn with_reuse_rate(mut self, rate: f64) -> Self {
        self.reuse_rate = Some(rate);
        self
    }

    /// Selected material keys in selection order.
    pub fn material_keys(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.material.as_str())
    }

    /// Sum of all material quantities (tonnes).
    pub fn total_material_tonnes(&self) -> f64 {
        self.materials.iter().map(|m| m.quantity_tonnes).sum()
    }

    /// Checks the constraints the arithmetic of `variant` depends on.
    ///
    /// Presence of optional form answers is the wizard's concern; this only
    /// rejects values that would make the results meaningless.
    pub fn validate(&self, variant: FormulaVariant) -> Result<()> {
        if !self.floor_area_m2.is_finite() || self.floor_area_m2 <= 0.0 {
            return Err(EstimatorError::InvalidFloorArea(self.floor_area_m2));
        }

        for entry in &self.materials {
            if !entry.quantity_tonnes.is_finite() || entry.quantity_tonnes < 0.0 {
                return Err(EstimatorError::InvalidValue {
                    field: "quantity_tonnes",
                    reason: format!(
                        "{} quantity must be a non-negative number, got {}",
                        entry.material, entry.quantity_tonnes
                    ),
                });
            }
        }

        check_baseline("embodied_energy", &self.embodied_energy)?;
        check_baseline("operational_energy", &self.operational_energy)?;

        if variant == FormulaVariant::Legacy {
            if self.embodied_energy.known_value().is_none() {
                return Err(EstimatorError::MissingField("embodied_energy"));
            }
            if self.operational_energy.known_value().is_none() {
                return Err(EstimatorError::MissingField("operational_energy"));
            }

            let lifespan = self
                .design_lifespan_years
                .ok_or(EstimatorError::MissingField("design_lifespan_years"))?;
            if !lifespan.is_finite() || lifespan <= 0.0 {
                return Err(EstimatorError::InvalidValue {
                    field: "design_lifespan_years",
                    reason: format!("must be positive, got {}", lifespan),
                });
            }

            let reuse = self
                .reuse_rate
                .ok_or(EstimatorError::MissingField("reuse_rate"))?;
            if !(0.0..=1.0).contains(&reuse) {
                return Err(EstimatorError::InvalidValue {
                    field: "reuse_rate",
                    reason: format!("must be between 0 and 1, got {}", reuse),
                });
            }
        }

        Ok(())
    }
}

fn check_baseline(field: &'static str, baseline: &EnergyBaseline) -> Result<()> {
    match baseline.known_value() {
        Some(value) if !value.is_finite() || value < 0.0 => Err(EstimatorError::InvalidValue {
            field,
            reason: format!("must be a non-negative number, got {}", value),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> BuildingInputs {
        BuildingInputs::new("office", 500.0, "temperate")
            .with_embodied_energy(EnergyBaseline::Known(9000.0))
    }

    #[test]
    fn test_rejects_non_positive_area() {
        let mut inputs = office();
        inputs.floor_area_m2 = 0.0;
        assert!(matches!(
            inputs.validate(FormulaVariant::ReuseAware),
            Err(EstimatorError::InvalidFloorArea(_))
        ));

        inputs.floor_area_m2 = f64::NAN;
        assert!(inputs.validate(FormulaVariant::ReuseAware).is_err());
    }

    #[test]
    fn test_unknown_keys_are_valid() {
        let inputs = BuildingInputs::new("spaceport", 100.0, "lunar");
        assert!(inputs.validate(FormulaVariant::ReuseAware).is_ok());
        assert!(inputs.validate(FormulaVariant::MaterialAware).is_ok());
    }

    #[test]
    fn test_legacy_requires_lifespan_and_reuse() {
        let inputs = office().with_operational_energy(EnergyBaseline::Known(200.0));
        assert!(matches!(
            inputs.validate(FormulaVariant::Legacy),
            Err(EstimatorError::MissingField("design_lifespan_years"))
        ));

        let inputs = inputs.with_design_lifespan(50.0).with_reuse_rate(1.5);
        assert!(matches!(
            inputs.validate(FormulaVariant::Legacy),
            Err(EstimatorError::InvalidValue { field: "reuse_rate", .. })
        ));

        let inputs = inputs.with_reuse_rate(0.3);
        assert!(inputs.validate(FormulaVariant::Legacy).is_ok());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let inputs = office().with_material("steel", -2.0);
        assert!(inputs.validate(FormulaVariant::MaterialAware).is_err());
    }

    #[test]
    fn test_baseline_json_shapes() {
        let known: EnergyBaseline = serde_json::from_str("9000").unwrap();
        assert_eq!(known, EnergyBaseline::Known(9000.0));

        let unknown: EnergyBaseline =
            serde_json::from_str(r#"{"context":"heavy-construction"}"#).unwrap();
        assert_eq!(unknown.context(), Some("heavy-construction"));

        let bare: EnergyBaseline = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, EnergyBaseline::default());
    }

    #[test]
    fn test_material_totals() {
        let inputs = office().with_material("steel", 20.0).with_material("timber", 5.5);
        assert_eq!(inputs.total_material_tonnes(), 25.5);
        assert_eq!(inputs.material_keys().collect::<Vec<_>>(), vec!["steel", "timber"]);
    }
}
