//! Climate multipliers.
//!
//! Two tables exist and are deliberately kept apart: the six-zone table used
//! by the seven-scenario estimator and the four-zone table of the legacy
//! estimator. Their values do not agree for shared zone names ("cold" is 1.27
//! in one and 1.2 in the other), so each has its own type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier used when a climate key is not in the active table.
pub const DEFAULT_CLIMATE_FACTOR: f64 = 1.0;

/// Six-zone climate classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClimateZone {
    Temperate,
    Cold,
    HotDry,
    HotHumid,
    Coastal,
    Mountain,
}

impl ClimateZone {
    /// All zones in table order.
    pub const ALL: [ClimateZone; 6] = [
        ClimateZone::Temperate,
        ClimateZone::Cold,
        ClimateZone::HotDry,
        ClimateZone::HotHumid,
        ClimateZone::Coastal,
        ClimateZone::Mountain,
    ];

    /// Parses a form key such as `"hot-dry"`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "temperate" => Some(ClimateZone::Temperate),
            "cold" => Some(ClimateZone::Cold),
            "hot-dry" => Some(ClimateZone::HotDry),
            "hot-humid" => Some(ClimateZone::HotHumid),
            "coastal" => Some(ClimateZone::Coastal),
            "mountain" => Some(ClimateZone::Mountain),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ClimateZone::Temperate => "temperate",
            ClimateZone::Cold => "cold",
            ClimateZone::HotDry => "hot-dry",
            ClimateZone::HotHumid => "hot-humid",
            ClimateZone::Coastal => "coastal",
            ClimateZone::Mountain => "mountain",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateZone::Temperate => "Temperate",
            ClimateZone::Cold => "Cold",
            ClimateZone::HotDry => "Hot & Dry",
            ClimateZone::HotHumid => "Hot & Humid",
            ClimateZone::Coastal => "Coastal",
            ClimateZone::Mountain => "Mountain",
        }
    }

    /// Dimensionless multiplier on operational energy.
    pub fn multiplier(&self) -> f64 {
        match self {
            ClimateZone::Temperate => 1.00,
            ClimateZone::Cold => 1.27,
            ClimateZone::HotDry => 0.92,
            ClimateZone::HotHumid => 0.95,
            ClimateZone::Coastal => 0.85,
            ClimateZone::Mountain => 1.13,
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Four-zone classification of the legacy estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegacyClimateZone {
    Cold,
    Temperate,
    Warm,
    Hot,
}

impl LegacyClimateZone {
    pub const ALL: [LegacyClimateZone; 4] = [
        LegacyClimateZone::Cold,
        LegacyClimateZone::Temperate,
        LegacyClimateZone::Warm,
        LegacyClimateZone::Hot,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "cold" => Some(LegacyClimateZone::Cold),
            "temperate" => Some(LegacyClimateZone::Temperate),
            "warm" => Some(LegacyClimateZone::Warm),
            "hot" => Some(LegacyClimateZone::Hot),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LegacyClimateZone::Cold => "cold",
            LegacyClimateZone::Temperate => "temperate",
            LegacyClimateZone::Warm => "warm",
            LegacyClimateZone::Hot => "hot",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LegacyClimateZone::Cold => "Cold",
            LegacyClimateZone::Temperate => "Temperate",
            LegacyClimateZone::Warm => "Warm",
            LegacyClimateZone::Hot => "Hot",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            LegacyClimateZone::Cold => 1.2,
            LegacyClimateZone::Temperate => 1.0,
            LegacyClimateZone::Warm => 0.9,
            LegacyClimateZone::Hot => 1.1,
        }
    }
}

impl fmt::Display for LegacyClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which climate table a formula variant reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClimateTable {
    SixZone,
    FourZone,
}

impl ClimateTable {
    /// Multiplier for `zone`, or 1.0 when the key is not in this table.
    pub fn multiplier(&self, zone: &str) -> f64 {
        let factor = match self {
            ClimateTable::SixZone => ClimateZone::from_key(zone).map(|z| z.multiplier()),
            ClimateTable::FourZone => LegacyClimateZone::from_key(zone).map(|z| z.multiplier()),
        };
        factor.unwrap_or_else(|| {
            tracing::warn!(zone, table = ?self, "unknown climate zone, using neutral multiplier");
            DEFAULT_CLIMATE_FACTOR
        })
    }

    /// Human label for `zone`, echoing the raw key when it is not in the table.
    pub fn label(&self, zone: &str) -> String {
        let name = match self {
            ClimateTable::SixZone => ClimateZone::from_key(zone).map(|z| z.display_name()),
            ClimateTable::FourZone => LegacyClimateZone::from_key(zone).map(|z| z.display_name()),
        };
        name.map(str::to_string).unwrap_or_else(|| zone.to_string())
    }

    /// Form keys accepted by this table.
    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            ClimateTable::SixZone => ClimateZone::ALL.iter().map(|z| z.key()).collect(),
            ClimateTable::FourZone => LegacyClimateZone::ALL.iter().map(|z| z.key()).collect(),
        }
    }
}
