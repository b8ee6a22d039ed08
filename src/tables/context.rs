//! Fallback baselines for users who answer "unknown".
//!
//! When the embodied or operational energy of the existing building is not
//! known, the user picks a qualitative context instead. These maps turn the
//! context into a representative baseline.

use serde::{Deserialize, Serialize};

/// Embodied baseline used when no value or context is available.
pub const DEFAULT_EMBODIED_BASELINE: f64 = 9000.0; // MJ/m²

/// Construction weight class for an unknown embodied baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbodiedContext {
    LightConstruction,
    MediumConstruction,
    HeavyConstruction,
    ExistingBuilding,
}

impl EmbodiedContext {
    pub const ALL: [EmbodiedContext; 4] = [
        EmbodiedContext::LightConstruction,
        EmbodiedContext::MediumConstruction,
        EmbodiedContext::HeavyConstruction,
        EmbodiedContext::ExistingBuilding,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "light-construction" => Some(EmbodiedContext::LightConstruction),
            "medium-construction" => Some(EmbodiedContext::MediumConstruction),
            "heavy-construction" => Some(EmbodiedContext::HeavyConstruction),
            "existing-building" => Some(EmbodiedContext::ExistingBuilding),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            EmbodiedContext::LightConstruction => "light-construction",
            EmbodiedContext::MediumConstruction => "medium-construction",
            EmbodiedContext::HeavyConstruction => "heavy-construction",
            EmbodiedContext::ExistingBuilding => "existing-building",
        }
    }

    /// Representative baseline in MJ/m².
    pub fn baseline(&self) -> f64 {
        match self {
            EmbodiedContext::LightConstruction => 7500.0,
            EmbodiedContext::MediumConstruction => 9000.0,
            EmbodiedContext::HeavyConstruction => 10500.0,
            EmbodiedContext::ExistingBuilding => 7500.0,
        }
    }
}

/// Performance class for an unknown operational baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationalContext {
    HighPerformance,
    CodeCompliant,
    ExistingStandard,
    PoorPerformance,
}

impl OperationalContext {
    pub const ALL: [OperationalContext; 4] = [
        OperationalContext::HighPerformance,
        OperationalContext::CodeCompliant,
        OperationalContext::ExistingStandard,
        OperationalContext::PoorPerformance,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "high-performance" => Some(OperationalContext::HighPerformance),
            "code-compliant" => Some(OperationalContext::CodeCompliant),
            "existing-standard" => Some(OperationalContext::ExistingStandard),
            "poor-performance" => Some(OperationalContext::PoorPerformance),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            OperationalContext::HighPerformance => "high-performance",
            OperationalContext::CodeCompliant => "code-compliant",
            OperationalContext::ExistingStandard => "existing-standard",
            OperationalContext::PoorPerformance => "poor-performance",
        }
    }

    /// Representative baseline in kWh/m²/yr.
    pub fn baseline(&self) -> f64 {
        match self {
            OperationalContext::HighPerformance => 20.0,
            OperationalContext::CodeCompliant => 80.0,
            OperationalContext::ExistingStandard => 150.0,
            OperationalContext::PoorPerformance => 275.0,
        }
    }
}

/// Embodied baseline for an optional context key, 9000 MJ/m² when unknown.
pub fn embodied_context_baseline(context: Option<&str>) -> f64 {
    context
        .and_then(EmbodiedContext::from_key)
        .map(|c| c.baseline())
        .unwrap_or(DEFAULT_EMBODIED_BASELINE)
}

/// Operational baseline for a context key, if the key is known.
pub fn operational_context_baseline(context: Option<&str>) -> Option<f64> {
    context
        .and_then(OperationalContext::from_key)
        .map(|c| c.baseline())
}
