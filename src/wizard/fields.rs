//! Form fields, per-variant step layouts and field rules.

use super::FormDraft;
use crate::inputs::EnergyBaseline;
use crate::scenario::FormulaVariant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One answer on the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormField {
    BuildingType,
    ProgramAfterRenovation,
    FloorArea,
    ClimateZone,
    /// Material selection, plus quantities where the variant needs them
    Materials,
    EmbodiedEnergy,
    OperationalEnergy,
    DesignLifespan,
    ReuseRate,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::BuildingType => "Building type",
            FormField::ProgramAfterRenovation => "Program after renovation",
            FormField::FloorArea => "Building area (m²)",
            FormField::ClimateZone => "Climate zone",
            FormField::Materials => "Structural materials",
            FormField::EmbodiedEnergy => "Embodied energy (MJ/m²)",
            FormField::OperationalEnergy => "Operational energy (kWh/m²/yr)",
            FormField::DesignLifespan => "Design lifespan (years)",
            FormField::ReuseRate => "Reuse rate (%)",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A rejected answer and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: FormField,
    pub message: String,
}

impl FieldIssue {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

use FormField::*;

const MATERIAL_AWARE_STEPS: &[&[FormField]] = &[
    &[BuildingType],
    &[ProgramAfterRenovation, FloorArea, ClimateZone],
    &[Materials],
    &[EmbodiedEnergy, OperationalEnergy],
];

const REUSE_AWARE_STEPS: &[&[FormField]] = &[
    &[BuildingType, FloorArea, ClimateZone],
    &[Materials, EmbodiedEnergy, OperationalEnergy],
];

const LEGACY_STEPS: &[&[FormField]] = &[
    &[FloorArea, DesignLifespan, ClimateZone],
    &[Materials, EmbodiedEnergy, OperationalEnergy, ReuseRate],
];

/// Field groups shown on each step for `variant`.
pub fn step_layout(variant: FormulaVariant) -> &'static [&'static [FormField]] {
    match variant {
        FormulaVariant::MaterialAware => MATERIAL_AWARE_STEPS,
        FormulaVariant::ReuseAware => REUSE_AWARE_STEPS,
        FormulaVariant::Legacy => LEGACY_STEPS,
    }
}

fn required_text(field: FormField, value: &Option<String>) -> Option<FieldIssue> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => None,
        _ => Some(FieldIssue::new(field, "This field is required")),
    }
}

fn positive_number(field: FormField, value: Option<f64>, message: &str) -> Option<FieldIssue> {
    match value {
        None => Some(FieldIssue::new(field, "This field is required")),
        Some(v) if !v.is_finite() || v <= 0.0 => Some(FieldIssue::new(field, message)),
        Some(_) => None,
    }
}

fn baseline(
    field: FormField,
    value: &Option<EnergyBaseline>,
    allow_unknown: bool,
    context_message: &str,
) -> Option<FieldIssue> {
    match value {
        None => Some(FieldIssue::new(field, "This field is required")),
        Some(EnergyBaseline::Known(v)) if !v.is_finite() || *v < 0.0 => {
            Some(FieldIssue::new(field, "Enter a value of zero or more"))
        }
        Some(EnergyBaseline::Known(_)) => None,
        Some(EnergyBaseline::Unknown { .. }) if !allow_unknown => {
            Some(FieldIssue::new(field, "Enter a known value"))
        }
        Some(EnergyBaseline::Unknown { context }) => match context.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => None,
            _ => Some(FieldIssue::new(field, context_message)),
        },
    }
}

/// Checks one field of `draft` under the rules of `variant`.
pub fn validate_field(
    variant: FormulaVariant,
    field: FormField,
    draft: &FormDraft,
) -> Option<FieldIssue> {
    let allow_unknown = variant != FormulaVariant::Legacy;

    match field {
        BuildingType => required_text(field, &draft.building_type),
        ProgramAfterRenovation => required_text(field, &draft.program_after_renovation),
        ClimateZone => required_text(field, &draft.climate_zone),
        FloorArea => positive_number(
            field,
            draft.floor_area_m2,
            "Building area must be greater than zero",
        ),
        DesignLifespan => positive_number(
            field,
            draft.design_lifespan_years,
            "Lifespan must be greater than zero",
        ),
        ReuseRate => match draft.reuse_rate_percent {
            None => Some(FieldIssue::new(field, "This field is required")),
            Some(p) if !(0.0..=100.0).contains(&p) => {
                Some(FieldIssue::new(field, "Reuse rate must be between 0 and 100%"))
            }
            Some(_) => None,
        },
        Materials => {
            if draft.materials.is_empty() {
                return Some(FieldIssue::new(field, "Please select at least one material"));
            }
            if variant == FormulaVariant::MaterialAware {
                if let Some(entry) = draft
                    .materials
                    .iter()
                    .find(|m| !m.quantity_tonnes.is_finite() || m.quantity_tonnes <= 0.0)
                {
                    return Some(FieldIssue::new(
                        field,
                        format!("Enter a quantity greater than zero for {}", entry.material),
                    ));
                }
            }
            None
        }
        EmbodiedEnergy => baseline(
            field,
            &draft.embodied_energy,
            allow_unknown,
            "Select a construction context",
        ),
        OperationalEnergy => baseline(
            field,
            &draft.operational_energy,
            allow_unknown,
            "Select a performance context",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts() {
        assert_eq!(step_layout(FormulaVariant::MaterialAware).len(), 4);
        assert_eq!(step_layout(FormulaVariant::ReuseAware).len(), 2);
        assert_eq!(step_layout(FormulaVariant::Legacy).len(), 2);
        assert!(!step_layout(FormulaVariant::Legacy)
            .iter()
            .any(|step| step.contains(&BuildingType)));
    }

    #[test]
    fn test_unknown_needs_context() {
        let mut draft = FormDraft::default();
        draft.embodied_energy = Some(EnergyBaseline::Unknown { context: None });
        let issue = validate_field(FormulaVariant::ReuseAware, EmbodiedEnergy, &draft).unwrap();
        assert_eq!(issue.message, "Select a construction context");

        draft.embodied_energy = Some(EnergyBaseline::unknown("light-construction"));
        assert!(validate_field(FormulaVariant::ReuseAware, EmbodiedEnergy, &draft).is_none());
        assert!(validate_field(FormulaVariant::Legacy, EmbodiedEnergy, &draft).is_some());
    }

    #[test]
    fn test_known_baseline_accepts_zero() {
        let mut draft = FormDraft::default();
        for variant in FormulaVariant::ALL {
            draft.operational_energy = Some(EnergyBaseline::Known(0.0));
            assert!(validate_field(variant, OperationalEnergy, &draft).is_none());

            draft.operational_energy = Some(EnergyBaseline::Known(-1.0));
            let issue = validate_field(variant, OperationalEnergy, &draft).unwrap();
            assert_eq!(issue.message, "Enter a value of zero or more");
        }

        // the estimator takes the same values
        draft.operational_energy = Some(EnergyBaseline::Known(0.0));
        draft.embodied_energy = Some(EnergyBaseline::Known(0.0));
        draft.floor_area_m2 = Some(100.0);
        assert!(draft.to_inputs().validate(FormulaVariant::ReuseAware).is_ok());
    }

    #[test]
    fn test_blank_text_is_missing() {
        let draft = FormDraft {
            climate_zone: Some("   ".to_string()),
            ..FormDraft::default()
        };
        assert!(validate_field(FormulaVariant::ReuseAware, ClimateZone, &draft).is_some());
    }
}
