//! Carbon assessment reports.
//!
//! A [`CarbonReport`] is built from the same [`DecisionResult`] the charts
//! consume, plus the [`BuildingInputs`] that produced it. It never reads back
//! rendered text. Sections follow the printed assessment: cover, input
//! summary, results with key insights, full comparison, methodology.
//!
//! Magnitudes are shown in GJ (MJ / 1000).

pub mod chart;
mod render;

pub use chart::ChartData;

use crate::error::{EstimatorError, Result};
use crate::inputs::BuildingInputs;
use crate::scenario::{Decision, DecisionResult, FormulaVariant, ScenarioCategory, ScenarioResult};
use crate::tables::{material_embodied_carbon, material_factor, Material, ProgramType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Number of scenarios listed on the results page.
pub const TOP_SCENARIO_COUNT: usize = 4;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Html,
    Csv,
    Json,
}

impl ReportFormat {
    /// Parses a CLI or config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "html" | "htm" => Some(ReportFormat::Html),
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    /// Picks a format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("txt") => Some(ReportFormat::Markdown),
            Some("html") | Some("htm") => Some(ReportFormat::Html),
            Some("csv") => Some(ReportFormat::Csv),
            Some("json") => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Project overview shown on the cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub building_type: String,
    pub program_after_renovation: Option<String>,
    pub floor_area_m2: f64,
    pub climate: String,
    pub climate_factor: f64,
    pub total_material_tonnes: f64,
    pub material_types: usize,
}

/// One line of the materials breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub material: String,
    pub quantity_tonnes: f64,
    pub factor: f64,
    /// kgCO2e per tonne
    pub embodied_carbon: f64,
}

/// Resolved inputs echoed back on the input summary page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    /// MJ/m², including the material add-on
    pub embodied_base_mj_per_m2: f64,
    /// MJ/m²
    pub material_add_on_mj_per_m2: f64,
    /// kWh/m²/yr
    pub operational_baseline_kwh_per_m2: f64,
    /// kWh/m²/yr implied by the declared context, if any
    pub operational_context_kwh_per_m2: Option<f64>,
    pub program_factor: f64,
    pub material_factor: f64,
    pub reuse_rate: Option<f64>,
    pub design_lifespan_years: Option<f64>,
    pub materials: Vec<MaterialLine>,
}

/// Average totals of each category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryComparison {
    /// MJ
    pub average_renovation: f64,
    /// MJ
    pub average_newbuild: f64,
    /// New build minus renovation (MJ)
    pub difference: f64,
    /// Difference relative to the new-build average, in percent
    pub difference_percent: f64,
}

/// Name and description of one scenario for the methodology page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDescription {
    pub name: String,
    pub description: String,
}

/// Multi-section carbon assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub variant: FormulaVariant,
    pub decision: Decision,
    pub recommended_scenario: String,
    /// MJ
    pub savings: i64,
    pub savings_percent: f64,
    pub project: ProjectOverview,
    pub inputs: InputSummary,
    pub best_renovation: ScenarioResult,
    pub best_newbuild: ScenarioResult,
    /// Lowest totals first
    pub top_scenarios: Vec<ScenarioResult>,
    pub insights: Vec<String>,
    /// Catalog order
    pub all_scenarios: Vec<ScenarioResult>,
    pub comparison: CategoryComparison,
    pub charts: ChartData,
    pub methodology: Vec<String>,
    pub scenario_descriptions: Vec<ScenarioDescription>,
    pub disclaimer: String,
}

impl CarbonReport {
    /// Builds a report from an estimator result and its inputs.
    pub fn new(result: &DecisionResult, inputs: &BuildingInputs) -> Self {
        let baselines = &result.baselines;
        let table = result.variant.climate_table();

        let project = ProjectOverview {
            building_type: program_label(&inputs.building_type),
            program_after_renovation: inputs
                .program_after_renovation
                .as_deref()
                .map(program_label),
            floor_area_m2: inputs.floor_area_m2,
            climate: table.label(&inputs.climate_zone),
            climate_factor: baselines.climate_factor,
            total_material_tonnes: baselines.total_material_tonnes,
            material_types: inputs.materials.len(),
        };

        let summary = InputSummary {
            embodied_base_mj_per_m2: baselines.embodied_base_mj_per_m2,
            material_add_on_mj_per_m2: baselines.material_add_on_mj_per_m2,
            operational_baseline_kwh_per_m2: baselines.operational_baseline_kwh_per_m2,
            operational_context_kwh_per_m2: baselines.operational_context_kwh_per_m2,
            program_factor: baselines.program_factor,
            material_factor: baselines.material_factor,
            reuse_rate: baselines.reuse_rate,
            design_lifespan_years: inputs.design_lifespan_years,
            materials: inputs
                .materials
                .iter()
                .map(|m| MaterialLine {
                    material: material_label(&m.material),
                    quantity_tonnes: m.quantity_tonnes,
                    factor: material_factor(&m.material),
                    embodied_carbon: material_embodied_carbon(&m.material),
                })
                .collect(),
        };

        let mut top_scenarios = result.all_scenario_results.clone();
        top_scenarios.sort_by_key(|s| s.total_carbon);
        top_scenarios.truncate(TOP_SCENARIO_COUNT);

        let average_renovation = result.average_total(ScenarioCategory::Renovation);
        let average_newbuild = result.average_total(ScenarioCategory::Newbuild);
        let difference = average_newbuild - average_renovation;
        let comparison = CategoryComparison {
            average_renovation,
            average_newbuild,
            difference,
            difference_percent: if average_newbuild != 0.0 {
                difference / average_newbuild * 100.0
            } else {
                0.0
            },
        };

        let scenario_descriptions = result
            .variant
            .catalog(inputs)
            .unwrap_or_default()
            .into_iter()
            .map(|p| ScenarioDescription {
                name: p.display_name,
                description: p.description,
            })
            .collect();

        Self {
            title: "SustainaBuild Building Carbon Assessment".to_string(),
            generated_at: Utc::now(),
            variant: result.variant,
            decision: result.decision,
            recommended_scenario: result.recommended_scenario.clone(),
            savings: result.savings,
            savings_percent: result.savings_percent,
            insights: key_insights(result, inputs),
            project,
            inputs: summary,
            best_renovation: result.best_renovation.clone(),
            best_newbuild: result.best_newbuild.clone(),
            top_scenarios,
            all_scenarios: result.all_scenario_results.clone(),
            comparison,
            charts: ChartData::from_decision(result),
            methodology: methodology(result.variant),
            scenario_descriptions,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Renders the report in `format`.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Html => Ok(self.to_html()),
            ReportFormat::Csv => Ok(self.to_csv()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Generates a Markdown report.
    pub fn to_markdown(&self) -> String {
        render::markdown(self)
    }

    /// Generates a standalone HTML report.
    pub fn to_html(&self) -> String {
        render::html(self)
    }

    /// Generates a CSV report with one row per scenario.
    pub fn to_csv(&self) -> String {
        render::csv(self)
    }

    /// Serializes the whole report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the report to a file based on the extension.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ReportFormat::from_extension(path).ok_or_else(|| {
            EstimatorError::UnsupportedFormat(format!(
                "{} (use .md, .html, .csv, or .json)",
                path.display()
            ))
        })?;

        std::fs::write(path, self.render(format)?)?;
        tracing::info!(path = %path.display(), %format, "report saved");
        Ok(())
    }

    /// Prints a summary to stdout.
    pub fn print_summary(&self) {
        println!("Carbon Assessment Summary:");
        println!("  Decision: {}", self.decision);
        println!("  Recommended Scenario: {}", self.recommended_scenario);
        println!(
            "  Savings: {:.1} GJ ({:.1}%)",
            gj(self.savings),
            self.savings_percent
        );
        println!(
            "  Best Renovation: {} ({:.1} GJ)",
            self.best_renovation.display_name,
            gj(self.best_renovation.total_carbon)
        );
        println!(
            "  Best New Build: {} ({:.1} GJ)",
            self.best_newbuild.display_name,
            gj(self.best_newbuild.total_carbon)
        );
        println!("  Estimator: {}", self.variant);
    }
}

/// MJ to GJ.
pub fn gj(mj: i64) -> f64 {
    mj as f64 / 1000.0
}

fn program_label(key: &str) -> String {
    ProgramType::from_key(key)
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|| key.to_string())
}

fn material_label(key: &str) -> String {
    Material::from_key(key)
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Plain-language findings for the results page.
pub fn key_insights(result: &DecisionResult, inputs: &BuildingInputs) -> Vec<String> {
    let best = &result.best_renovation;
    let recommended = result.recommended();
    let alternative = result.alternative();
    let mut insights = Vec::new();

    insights.push(format!(
        "The {} scenario achieves the lowest footprint among renovation options at {:.1} GJ over {} years.",
        best.display_name,
        gj(best.total_carbon),
        best.lifespan_years
    ));

    if result.savings == 0 {
        insights.push(format!(
            "The best renovation ({}) and the best new build ({}) are tied on total lifecycle energy.",
            result.best_renovation.display_name, result.best_newbuild.display_name
        ));
    } else {
        insights.push(format!(
            "Compared to the best {} option ({}), the recommended scenario saves {:.1}% in total lifecycle energy.",
            alternative.category.display_name().to_lowercase(),
            alternative.display_name,
            result.savings_percent
        ));
    }

    insights.push(format!(
        "Embodied energy represents {:.0}% of the total in the recommended scenario, highlighting the importance of material selection and reuse.",
        recommended.embodied_share_percent()
    ));

    insights.push(format!(
        "Energy intensity for the recommended scenario is {:.1} MJ/m² over the project lifespan.",
        recommended.intensity_per_m2(inputs.floor_area_m2)
    ));

    let tonnes = inputs.total_material_tonnes();
    if tonnes > 0.0 {
        insights.push(format!(
            "Total materials specified: {} tonnes across {} material types.",
            tonnes,
            inputs.materials.len()
        ));
    }

    insights
}

fn methodology(variant: FormulaVariant) -> Vec<String> {
    let embodied = match variant {
        FormulaVariant::ReuseAware => {
            "Embodied energy: the embodied baseline (MJ/m²) scaled by each scenario's embodied factor and by the share of fabric not reused, times floor area."
        }
        FormulaVariant::MaterialAware => {
            "Embodied energy: the embodied baseline (MJ/m²) plus a material add-on from specified quantities and their carbon intensities, scaled by each scenario's embodied factor, times floor area."
        }
        FormulaVariant::Legacy => {
            "Embodied energy: the embodied baseline (MJ/m²) times floor area, scenario embodied factor and material factor, reduced by the reuse rate entered."
        }
    };
    let operational = match variant {
        FormulaVariant::Legacy => {
            "Operational energy: the operational baseline (kWh/m²/yr) reduced by each scenario's performance improvement, adjusted for climate and a grid-intensity factor of 0.5, over the design lifespan."
        }
        FormulaVariant::ReuseAware => {
            "Operational energy: the operational value entered (kWh/m²/yr), or the building-type baseline when none is given, adjusted for climate zone, reduced by each scenario's performance improvement and converted at 3.6 MJ/kWh over the scenario lifespan."
        }
        FormulaVariant::MaterialAware => {
            "Operational energy: the building-type baseline (kWh/m²/yr), adjusted for climate zone and program, reduced by each scenario's performance improvement and converted at 3.6 MJ/kWh over the scenario lifespan."
        }
    };

    vec![
        embodied.to_string(),
        operational.to_string(),
        "Total: embodied plus operational energy over the lifespan of each scenario. Each figure is rounded to the nearest MJ once.".to_string(),
        "Decision logic: the best renovation is compared with the best new build. RENOVATE is recommended only when renovation is strictly lower; otherwise DEMOLISH & REBUILD.".to_string(),
        format!("Estimator: {}.", variant),
    ]
}

const DISCLAIMER: &str = "This assessment provides preliminary estimates based on simplified \
assumptions and industry-standard factors. Actual emissions may vary significantly with project \
details, local conditions, material sourcing, construction methods and occupant behaviour. Use \
this report for comparative analysis and early decision-making only. A detailed life cycle \
assessment by qualified professionals is recommended for final decisions and regulatory \
compliance.";
