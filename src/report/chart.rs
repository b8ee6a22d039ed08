//! Chart-ready series derived from a [`DecisionResult`].
//!
//! Rendering is left to whatever front end consumes these values; this
//! module only shapes the numbers.

use crate::scenario::{DecisionResult, ScenarioCategory, ScenarioResult};
use serde::{Deserialize, Serialize};

/// Longest horizon drawn on a cumulative chart (years).
pub const MAX_CHART_YEARS: u32 = 100;

/// One stacked bar: embodied and operational of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    pub category: ScenarioCategory,
    pub embodied: i64,
    pub operational: i64,
    pub total: i64,
}

/// Embodied versus operational split of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieBreakdown {
    pub label: String,
    pub embodied: i64,
    pub operational: i64,
}

impl PieBreakdown {
    fn from_result(result: &ScenarioResult) -> Self {
        Self {
            label: result.display_name.clone(),
            embodied: result.embodied_carbon,
            operational: result.operational_carbon,
        }
    }
}

/// Cumulative energy of one scenario, one point per year from year 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub label: String,
    pub category: ScenarioCategory,
    /// `values[year]` in MJ
    pub values: Vec<i64>,
}

impl CumulativeSeries {
    /// Embodied up front, then operational spread evenly over the lifespan.
    pub fn from_result(result: &ScenarioResult) -> Self {
        let last_year = result.lifespan_years.min(MAX_CHART_YEARS as f64).max(0.0).floor() as u32;
        let per_year = if result.lifespan_years > 0.0 {
            result.operational_carbon as f64 / result.lifespan_years
        } else {
            0.0
        };

        let values = (0..=last_year)
            .map(|year| (result.embodied_carbon as f64 + per_year * year as f64).round() as i64)
            .collect();

        Self {
            label: result.display_name.clone(),
            category: result.category,
            values,
        }
    }
}

/// One row of the comparison table, with the column minima flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub category: ScenarioCategory,
    pub lifespan_years: f64,
    pub embodied: i64,
    pub operational: i64,
    pub total: i64,
    pub best_embodied: bool,
    pub best_operational: bool,
    pub best_total: bool,
}

/// Every chart the results view draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Scenarios sorted by ascending total
    pub bar: Vec<BarPoint>,
    /// Best renovation then best new build
    pub pies: Vec<PieBreakdown>,
    /// One series per scenario in catalog order
    pub cumulative: Vec<CumulativeSeries>,
    /// Catalog order with best values marked
    pub comparison: Vec<ComparisonRow>,
}

impl ChartData {
    pub fn from_decision(result: &DecisionResult) -> Self {
        Self {
            bar: bar_series(&result.all_scenario_results),
            pies: vec![
                PieBreakdown::from_result(&result.best_renovation),
                PieBreakdown::from_result(&result.best_newbuild),
            ],
            cumulative: result
                .all_scenario_results
                .iter()
                .map(CumulativeSeries::from_result)
                .collect(),
            comparison: comparison_table(&result.all_scenario_results),
        }
    }
}

/// Scenarios sorted by total. Equal totals keep catalog order.
pub fn bar_series(results: &[ScenarioResult]) -> Vec<BarPoint> {
    let mut sorted: Vec<&ScenarioResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.total_carbon);
    sorted
        .into_iter()
        .map(|r| BarPoint {
            label: r.display_name.clone(),
            category: r.category,
            embodied: r.embodied_carbon,
            operational: r.operational_carbon,
            total: r.total_carbon,
        })
        .collect()
}

/// Comparison rows with every minimum flagged (ties flag all).
pub fn comparison_table(results: &[ScenarioResult]) -> Vec<ComparisonRow> {
    let min_embodied = results.iter().map(|r| r.embodied_carbon).min();
    let min_operational = results.iter().map(|r| r.operational_carbon).min();
    let min_total = results.iter().map(|r| r.total_carbon).min();

    results
        .iter()
        .map(|r| ComparisonRow {
            label: r.display_name.clone(),
            category: r.category,
            lifespan_years: r.lifespan_years,
            embodied: r.embodied_carbon,
            operational: r.operational_carbon,
            total: r.total_carbon,
            best_embodied: Some(r.embodied_carbon) == min_embodied,
            best_operational: Some(r.operational_carbon) == min_operational,
            best_total: Some(r.total_carbon) == min_total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioPreset;

    fn result(key: &str, lifespan: f64, embodied: f64, operational: f64) -> ScenarioResult {
        let preset = ScenarioPreset::new(key, key, ScenarioCategory::Renovation).with_lifespan(lifespan);
        ScenarioResult::from_energies(&preset, embodied, operational).unwrap()
    }

    #[test]
    fn test_bar_sorted_ascending_and_stable() {
        let results = vec![
            result("a", 10.0, 50.0, 50.0),
            result("b", 10.0, 10.0, 10.0),
            result("c", 10.0, 60.0, 40.0),
        ];
        let labels: Vec<String> = bar_series(&results).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_cumulative_reaches_total() {
        let series = CumulativeSeries::from_result(&result("x", 20.0, 1000.0, 2000.0));
        assert_eq!(series.values.len(), 21);
        assert_eq!(series.values[0], 1000);
        assert_eq!(series.values[10], 2000);
        assert_eq!(series.values[20], 3000);
    }

    #[test]
    fn test_cumulative_caps_horizon() {
        let series = CumulativeSeries::from_result(&result("x", 250.0, 0.0, 250.0));
        assert_eq!(series.values.len(), 101);
        assert_eq!(series.values[100], 100);

        let fractional = CumulativeSeries::from_result(&result("y", 17.5, 0.0, 35.0));
        assert_eq!(fractional.values.len(), 18);
        assert_eq!(fractional.values[17], 34);
    }

    #[test]
    fn test_comparison_flags_minima() {
        let results = vec![
            result("a", 10.0, 10.0, 90.0),
            result("b", 10.0, 30.0, 20.0),
        ];
        let rows = comparison_table(&results);
        assert!(rows[0].best_embodied && !rows[0].best_operational && !rows[0].best_total);
        assert!(!rows[1].best_embodied && rows[1].best_operational && rows[1].best_total);
    }
}
