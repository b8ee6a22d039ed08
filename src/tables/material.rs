//! Structural material coefficients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Factor used when a material key is not in the table.
pub const DEFAULT_MATERIAL_FACTOR: f64 = 1.0;

/// Embodied carbon used when a material key is not in the table.
pub const DEFAULT_MATERIAL_EMBODIED_CARBON: f64 = 500.0; // kgCO2e/t

/// Heuristic conversion from material carbon to embodied energy.
pub const CARBON_TO_ENERGY_MJ_PER_KG: f64 = 50.0; // MJ per kgCO2e

/// Primary structural material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    Concrete,
    Steel,
    Timber,
    Masonry,
    Mixed,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Concrete,
        Material::Steel,
        Material::Timber,
        Material::Masonry,
        Material::Mixed,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "concrete" => Some(Material::Concrete),
            "steel" => Some(Material::Steel),
            "timber" => Some(Material::Timber),
            "masonry" => Some(Material::Masonry),
            "mixed" => Some(Material::Mixed),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Material::Concrete => "concrete",
            Material::Steel => "steel",
            Material::Timber => "timber",
            Material::Masonry => "masonry",
            Material::Mixed => "mixed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Concrete => "Concrete",
            Material::Steel => "Steel",
            Material::Timber => "Timber",
            Material::Masonry => "Masonry",
            Material::Mixed => "Mixed",
        }
    }

    /// Relative embodied intensity, concrete = 1.0.
    pub fn factor(&self) -> f64 {
        match self {
            Material::Concrete => 1.0,
            Material::Steel => 1.3,
            Material::Timber => 0.7,
            Material::Masonry => 0.9,
            Material::Mixed => 1.0,
        }
    }

    /// Embodied carbon in kgCO2e per tonne.
    pub fn embodied_carbon(&self) -> f64 {
        match self {
            Material::Concrete => 150.0,
            Material::Steel => 1850.0,
            Material::Timber => 100.0,
            Material::Masonry => 200.0,
            Material::Mixed => 500.0,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Material factor for a key, 1.0 when unknown.
pub fn material_factor(material: &str) -> f64 {
    Material::from_key(material)
        .map(|m| m.factor())
        .unwrap_or(DEFAULT_MATERIAL_FACTOR)
}

/// Embodied carbon (kgCO2e/t) for a key, 500 when unknown.
pub fn material_embodied_carbon(material: &str) -> f64 {
    Material::from_key(material)
        .map(|m| m.embodied_carbon())
        .unwrap_or(DEFAULT_MATERIAL_EMBODIED_CARBON)
}

/// Mean material factor over `materials`, 1.0 for an empty selection.
pub fn average_material_factor<'a, I>(materials: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let (sum, count) = materials
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), m| (sum + material_factor(m), n + 1));
    if count == 0 {
        DEFAULT_MATERIAL_FACTOR
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_factors() {
        assert_eq!(material_factor("concrete"), 1.0);
        assert_eq!(material_factor("steel"), 1.3);
        assert_eq!(material_factor("timber"), 0.7);
        assert_eq!(material_factor("masonry"), 0.9);
        assert_eq!(material_factor("mixed"), 1.0);
        assert_eq!(material_factor("adobe"), DEFAULT_MATERIAL_FACTOR);
    }

    #[test]
    fn test_embodied_carbon_fallback() {
        assert_eq!(material_embodied_carbon("steel"), 1850.0);
        assert_eq!(material_embodied_carbon("bamboo"), 500.0);
    }

    #[test]
    fn test_average_factor() {
        assert_eq!(average_material_factor(Vec::<&str>::new()), 1.0);
        assert_eq!(average_material_factor(["timber"]), 0.7);
        let avg = average_material_factor(["steel", "timber"]);
        assert!((avg - 1.0).abs() < 1e-12);
    }
}
