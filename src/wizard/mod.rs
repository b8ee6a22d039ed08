//! Multi-step calculator form as an immutable state machine.
//!
//! A [`WizardState`] is a plain value. Every transition borrows the current
//! state and returns a new one, so a rejected step leaves the caller's state
//! untouched. The final transition yields the [`BuildingInputs`] handed to the
//! estimator.

pub mod fields;

pub use fields::{step_layout, validate_field, FieldIssue, FormField};

use crate::inputs::{BuildingInputs, EnergyBaseline, MaterialQuantity};
use crate::scenario::FormulaVariant;
use serde::{Deserialize, Serialize};

/// Errors returned by rejected wizard transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    /// The current step has fields that fail validation.
    #[error("step {step} has {} invalid field(s)", .issues.len())]
    StepInvalid { step: usize, issues: Vec<FieldIssue> },

    /// The action is not available on this step.
    #[error("{action:?} is not available on step {step}")]
    ActionNotAllowed { action: WizardAction, step: usize },

    /// A restored state points past the last step of its form.
    #[error("step {step} is out of range for a {total}-step form")]
    StepOutOfRange { step: usize, total: usize },
}

/// User actions on the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardAction {
    Next,
    Back,
    Reset,
    Calculate,
}

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    BuildingType(String),
    ProgramAfterRenovation(String),
    FloorArea(f64),
    ClimateZone(String),
    /// Selects the material, or deselects it when already selected
    ToggleMaterial(String),
    /// Sets the quantity of a material, selecting it if needed
    MaterialQuantity { material: String, tonnes: f64 },
    EmbodiedEnergy(EnergyBaseline),
    OperationalEnergy(EnergyBaseline),
    DesignLifespan(f64),
    /// Reuse rate as entered, in percent
    ReuseRatePercent(f64),
}

/// Answers collected so far. Absent answers are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub building_type: Option<String>,
    pub program_after_renovation: Option<String>,
    pub floor_area_m2: Option<f64>,
    pub climate_zone: Option<String>,
    pub materials: Vec<MaterialQuantity>,
    pub embodied_energy: Option<EnergyBaseline>,
    pub operational_energy: Option<EnergyBaseline>,
    pub design_lifespan_years: Option<f64>,
    pub reuse_rate_percent: Option<f64>,
}

impl FormDraft {
    fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::BuildingType(v) => self.building_type = Some(v),
            FieldValue::ProgramAfterRenovation(v) => self.program_after_renovation = Some(v),
            FieldValue::FloorArea(v) => self.floor_area_m2 = Some(v),
            FieldValue::ClimateZone(v) => self.climate_zone = Some(v),
            FieldValue::ToggleMaterial(material) => {
                match self.materials.iter().position(|m| m.material == material) {
                    Some(index) => {
                        self.materials.remove(index);
                    }
                    None => self.materials.push(MaterialQuantity::new(material, 0.0)),
                }
            }
            FieldValue::MaterialQuantity { material, tonnes } => {
                match self.materials.iter_mut().find(|m| m.material == material) {
                    Some(entry) => entry.quantity_tonnes = tonnes,
                    None => self.materials.push(MaterialQuantity::new(material, tonnes)),
                }
            }
            FieldValue::EmbodiedEnergy(v) => self.embodied_energy = Some(v),
            FieldValue::OperationalEnergy(v) => self.operational_energy = Some(v),
            FieldValue::DesignLifespan(v) => self.design_lifespan_years = Some(v),
            FieldValue::ReuseRatePercent(v) => self.reuse_rate_percent = Some(v),
        }
    }

    /// Converts the answers into estimator inputs.
    ///
    /// Missing answers become empty keys or unknown baselines, which the
    /// estimator resolves through its fallback defaults.
    pub fn to_inputs(&self) -> BuildingInputs {
        BuildingInputs {
            building_type: self.building_type.clone().unwrap_or_default(),
            program_after_renovation: self.program_after_renovation.clone(),
            floor_area_m2: self.floor_area_m2.unwrap_or(0.0),
            climate_zone: self.climate_zone.clone().unwrap_or_default(),
            materials: self.materials.clone(),
            embodied_energy: self.embodied_energy.clone().unwrap_or_default(),
            operational_energy: self.operational_energy.clone().unwrap_or_default(),
            design_lifespan_years: self.design_lifespan_years,
            reuse_rate: self.reuse_rate_percent.map(|p| p / 100.0),
        }
    }
}

/// Result of a successful forward transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The wizard moved (or stayed) and this is the new state
    Advanced(WizardState),
    /// The last step validated and the inputs are ready to estimate
    Completed(BuildingInputs),
}

/// Current step and answers of the calculator form.
///
/// Deserializing rejects a step outside the variant's layout, so every
/// state in hand points at a real step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredWizardState")]
pub struct WizardState {
    variant: FormulaVariant,
    step: usize,
    draft: FormDraft,
}

/// Unchecked wire form of [`WizardState`].
#[derive(Deserialize)]
struct StoredWizardState {
    variant: FormulaVariant,
    step: usize,
    draft: FormDraft,
}

impl TryFrom<StoredWizardState> for WizardState {
    type Error = WizardError;

    fn try_from(stored: StoredWizardState) -> Result<Self, Self::Error> {
        let total = step_layout(stored.variant).len();
        if stored.step >= total {
            return Err(WizardError::StepOutOfRange {
                step: stored.step + 1,
                total,
            });
        }
        Ok(Self {
            variant: stored.variant,
            step: stored.step,
            draft: stored.draft,
        })
    }
}

impl WizardState {
    /// Starts an empty form on step 1.
    pub fn new(variant: FormulaVariant) -> Self {
        Self {
            variant,
            step: 0,
            draft: FormDraft::default(),
        }
    }

    pub fn variant(&self) -> FormulaVariant {
        self.variant
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// 1-based step number.
    pub fn step_number(&self) -> usize {
        self.step + 1
    }

    pub fn total_steps(&self) -> usize {
        step_layout(self.variant).len()
    }

    pub fn is_last_step(&self) -> bool {
        self.step_number() == self.total_steps()
    }

    /// (current step, total steps) for a progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        (self.step_number(), self.total_steps())
    }

    /// Fields shown on the current step.
    pub fn current_fields(&self) -> &'static [FormField] {
        step_layout(self.variant)[self.step]
    }

    /// Actions offered on the current step.
    pub fn allowed_actions(&self) -> Vec<WizardAction> {
        let mut actions = Vec::with_capacity(3);
        actions.push(if self.is_last_step() {
            WizardAction::Calculate
        } else {
            WizardAction::Next
        });
        if self.step > 0 {
            actions.push(WizardAction::Back);
        }
        actions.push(WizardAction::Reset);
        actions
    }

    /// Returns a new state with one answer changed. The step does not move.
    pub fn update(&self, value: FieldValue) -> Self {
        let mut next = self.clone();
        next.draft.apply(value);
        next
    }

    /// Issues for every field on the current step.
    pub fn validate_step(&self) -> Vec<FieldIssue> {
        self.current_fields()
            .iter()
            .filter_map(|&field| validate_field(self.variant, field, &self.draft))
            .collect()
    }

    /// Validates the current step, then moves forward or completes.
    pub fn next(&self) -> Result<Transition, WizardError> {
        let issues = self.validate_step();
        if !issues.is_empty() {
            tracing::debug!(step = self.step_number(), issues = issues.len(), "step rejected");
            return Err(WizardError::StepInvalid {
                step: self.step_number(),
                issues,
            });
        }

        if self.is_last_step() {
            return Ok(Transition::Completed(self.draft.to_inputs()));
        }

        Ok(Transition::Advanced(Self {
            step: self.step + 1,
            ..self.clone()
        }))
    }

    /// Moves back one step, keeping the answers. No-op on step 1.
    pub fn back(&self) -> Self {
        Self {
            step: self.step.saturating_sub(1),
            ..self.clone()
        }
    }

    /// Clears every answer and returns to step 1.
    pub fn reset(&self) -> Self {
        Self::new(self.variant)
    }

    /// Applies a user action if it is offered on the current step.
    pub fn apply(&self, action: WizardAction) -> Result<Transition, WizardError> {
        if !self.allowed_actions().contains(&action) {
            return Err(WizardError::ActionNotAllowed {
                action,
                step: self.step_number(),
            });
        }

        match action {
            WizardAction::Next | WizardAction::Calculate => self.next(),
            WizardAction::Back => Ok(Transition::Advanced(self.back())),
            WizardAction::Reset => Ok(Transition::Advanced(self.reset())),
        }
    }
}
