//! Scenario presets.
//!
//! Each preset is one renovation or new-build strategy with fixed
//! coefficients. Catalog order matters: it is the tie-break order when two
//! scenarios of the same category have equal totals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a scenario keeps the existing building or replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCategory {
    Renovation,
    Newbuild,
}

impl ScenarioCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScenarioCategory::Renovation => "Renovation",
            ScenarioCategory::Newbuild => "New Build",
        }
    }
}

impl fmt::Display for ScenarioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioCategory::Renovation => write!(f, "renovation"),
            ScenarioCategory::Newbuild => write!(f, "new build"),
        }
    }
}

/// A renovation or new-build strategy with calibrated coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    /// Stable identifier (e.g. "deep-renovation")
    pub key: String,
    /// Name shown to users
    pub display_name: String,
    /// Short description for reports
    pub description: String,
    /// Fraction of existing fabric retained (0-1)
    pub reuse_rate: f64,
    /// Share of the embodied baseline incurred by the works
    pub embodied_factor: f64,
    /// Fractional reduction in operational energy (0-1)
    pub operational_improvement: f64,
    /// Expected service life (years)
    pub lifespan_years: f64,
    pub category: ScenarioCategory,
}

impl ScenarioPreset {
    /// Creates a preset with an empty description.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        category: ScenarioCategory,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: String::new(),
            reuse_rate: 0.0,
            embodied_factor: 1.0,
            operational_improvement: 0.0,
            lifespan_years: 1.0,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reuse_rate(mut self, rate: f64) -> Self {
        self.reuse_rate = rate;
        self
    }

    pub fn with_embodied_factor(mut self, factor: f64) -> Self {
        self.embodied_factor = factor;
        self
    }

    pub fn with_operational_improvement(mut self, improvement: f64) -> Self {
        self.operational_improvement = improvement;
        self
    }

    pub fn with_lifespan(mut self, years: f64) -> Self {
        self.lifespan_years = years;
        self
    }

    /// Light renovation: cosmetic upgrades, nearly all fabric kept.
    pub fn light_renovation() -> Self {
        Self::new("light-renovation", "Light Renovation", ScenarioCategory::Renovation)
            .with_description(
                "Minimal intervention preserving nearly all existing fabric. Window \
                replacement, insulation upgrades, HVAC controls and lighting \
                retrofit.",
            )
            .with_reuse_rate(0.90)
            .with_embodied_factor(0.10)
            .with_operational_improvement(0.25)
            .with_lifespan(17.5)
    }

    /// Medium renovation: services and envelope upgrades.
    pub fn medium_renovation() -> Self {
        Self::new("medium-renovation", "Medium Renovation", ScenarioCategory::Renovation)
            .with_description(
                "Significant envelope upgrade with full HVAC replacement and \
                interior reconfiguration. Primary structure untouched while half \
                of the envelope is replaced.",
            )
            .with_reuse_rate(0.70)
            .with_embodied_factor(0.275)
            .with_operational_improvement(0.475)
            .with_lifespan(22.5)
    }

    /// Deep renovation: strip back to structure and rebuild the envelope.
    pub fn deep_renovation() -> Self {
        Self::new("deep-renovation", "Deep Renovation", ScenarioCategory::Renovation)
            .with_description(
                "Full envelope rebuild and complete systems replacement. \
                Load-bearing structure retained with high-performance assemblies.",
            )
            .with_reuse_rate(0.525)
            .with_embodied_factor(0.45)
            .with_operational_improvement(0.70)
            .with_lifespan(30.0)
    }

    /// Deep renovation with partial demolition.
    pub fn deep_renovation_demolition() -> Self {
        Self::new(
            "deep-renovation-demolition",
            "Deep + Demo",
            ScenarioCategory::Renovation,
        )
        .with_description(
            "Deep renovation plus selective structural modifications such as \
            removing load-bearing walls or adding new slabs for extensions.",
        )
        .with_reuse_rate(0.425)
        .with_embodied_factor(0.55)
        .with_operational_improvement(0.75)
        .with_lifespan(35.0)
    }

    /// New build to minimum code requirements.
    pub fn code_compliant_new() -> Self {
        Self::new("code-compliant-new", "Code-Compliant", ScenarioCategory::Newbuild)
            .with_description(
                "Complete demolition followed by conventional new construction \
                meeting current energy code minimums, with minimal foundation \
                reuse.",
            )
            .with_reuse_rate(0.025)
            .with_embodied_factor(0.975)
            .with_operational_improvement(0.84)
            .with_lifespan(40.0)
    }

    /// New build targeting high operational performance.
    pub fn high_performance_new() -> Self {
        Self::new("high-performance-new", "High-Performance", ScenarioCategory::Newbuild)
            .with_description(
                "Demolition plus advanced new build with triple glazing, heat pump \
                and heat recovery ventilation, achieving a low-energy standard.",
            )
            .with_reuse_rate(0.10)
            .with_embodied_factor(0.825)
            .with_operational_improvement(0.94)
            .with_lifespan(50.0)
    }

    /// New build with low-carbon materials and near-zero operation.
    pub fn low_carbon_new() -> Self {
        Self::new("low-carbon-new", "Low-Carbon", ScenarioCategory::Newbuild)
            .with_description(
                "Demolition plus nearly net-zero building with a mass timber \
                structure, on-site PV and a high share of recycled materials.",
            )
            .with_reuse_rate(0.225)
            .with_embodied_factor(0.65)
            .with_operational_improvement(0.98)
            .with_lifespan(60.0)
    }
}

/// The seven-scenario catalog in table order.
pub fn seven_scenario_catalog() -> Vec<ScenarioPreset> {
    vec![
        ScenarioPreset::light_renovation(),
        ScenarioPreset::medium_renovation(),
        ScenarioPreset::deep_renovation(),
        ScenarioPreset::deep_renovation_demolition(),
        ScenarioPreset::code_compliant_new(),
        ScenarioPreset::high_performance_new(),
        ScenarioPreset::low_carbon_new(),
    ]
}

// (key, display name, reuse, embodied factor, improvement, category)
const LEGACY_TABLE: [(&str, &str, f64, f64, f64, ScenarioCategory); 6] = [
    ("light-renovation", "Light Renovation", 0.90, 0.15, 0.25, ScenarioCategory::Renovation),
    ("medium-renovation", "Medium Renovation", 0.70, 0.35, 0.40, ScenarioCategory::Renovation),
    ("deep-renovation", "Deep Renovation", 0.50, 0.60, 0.55, ScenarioCategory::Renovation),
    ("code-compliant-new", "Code-Compliant New Build", 0.10, 1.50, 0.60, ScenarioCategory::Newbuild),
    ("high-performance-new", "High-Performance New Build", 0.05, 1.30, 0.75, ScenarioCategory::Newbuild),
    ("low-carbon-new", "Low-Carbon New Build", 0.15, 0.90, 0.80, ScenarioCategory::Newbuild),
];

/// The six-scenario legacy catalog.
///
/// Legacy presets have no lifespan of their own; every scenario uses the
/// design lifespan entered by the user.
pub fn legacy_catalog(design_lifespan_years: f64) -> Vec<ScenarioPreset> {
    LEGACY_TABLE
        .iter()
        .map(|&(key, name, reuse, embodied, improvement, category)| {
            ScenarioPreset::new(key, name, category)
                .with_description(legacy_description(category))
                .with_reuse_rate(reuse)
                .with_embodied_factor(embodied)
                .with_operational_improvement(improvement)
                .with_lifespan(design_lifespan_years)
        })
        .collect()
}

fn legacy_description(category: ScenarioCategory) -> &'static str {
    match category {
        ScenarioCategory::Renovation => "Retrofit of the existing building at the given reuse rate.",
        ScenarioCategory::Newbuild => "Demolition and replacement with a new building.",
    }
}
