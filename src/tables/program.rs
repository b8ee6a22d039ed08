//! Building program tables.
//!
//! Operational energy baselines by building type and the program multipliers
//! applied after a change of use.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Baseline used when the building type is not in the table.
pub const DEFAULT_PROGRAM_BASELINE: f64 = 350.0; // kWh/m²/yr

/// Multiplier used when the program is absent or not in the table.
pub const DEFAULT_PROGRAM_FACTOR: f64 = 1.0;

/// Building program (current use, or use after renovation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramType {
    /// Office building
    Office,
    /// Housing
    Residential,
    /// Schools, hospitals, civic buildings
    Institutional,
    /// Manufacturing and process buildings
    Industrial,
}

impl ProgramType {
    /// All program types in table order.
    pub const ALL: [ProgramType; 4] = [
        ProgramType::Office,
        ProgramType::Residential,
        ProgramType::Institutional,
        ProgramType::Industrial,
    ];

    /// Parses a form key such as `"office"`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "office" => Some(ProgramType::Office),
            "residential" => Some(ProgramType::Residential),
            "institutional" => Some(ProgramType::Institutional),
            "industrial" => Some(ProgramType::Industrial),
            _ => None,
        }
    }

    /// Returns the form key for this program.
    pub fn key(&self) -> &'static str {
        match self {
            ProgramType::Office => "office",
            ProgramType::Residential => "residential",
            ProgramType::Institutional => "institutional",
            ProgramType::Industrial => "industrial",
        }
    }

    /// Returns the display name for this program.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProgramType::Office => "Office",
            ProgramType::Residential => "Residential",
            ProgramType::Institutional => "Institutional",
            ProgramType::Industrial => "Industrial",
        }
    }

    /// Operational energy baseline in kWh/m²/yr.
    pub fn baseline(&self) -> f64 {
        match self {
            ProgramType::Office => 350.0,
            ProgramType::Residential => 250.0,
            ProgramType::Institutional => 450.0,
            ProgramType::Industrial => 700.0,
        }
    }

    /// Multiplier on the baseline when the building is converted to this program.
    pub fn factor(&self) -> f64 {
        match self {
            ProgramType::Office => 1.00,
            ProgramType::Residential => 0.71,
            ProgramType::Institutional => 1.29,
            ProgramType::Industrial => 2.00,
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operational baseline for a building type key, falling back to 350 kWh/m²/yr.
pub fn program_baseline(building_type: &str) -> f64 {
    match ProgramType::from_key(building_type) {
        Some(program) => program.baseline(),
        None => {
            tracing::warn!(
                building_type,
                fallback = DEFAULT_PROGRAM_BASELINE,
                "unknown building type, using default baseline"
            );
            DEFAULT_PROGRAM_BASELINE
        }
    }
}

/// Program factor for an optional program key, falling back to 1.0.
pub fn program_factor(program: Option<&str>) -> f64 {
    program
        .and_then(ProgramType::from_key)
        .map(|p| p.factor())
        .unwrap_or(DEFAULT_PROGRAM_FACTOR)
}
