//! Renovate-or-rebuild decision.
//!
//! Reduces the per-scenario results to the best option of each category and
//! a binary recommendation.

use super::formula::{FormulaVariant, ResolvedBaselines, ScenarioResult};
use super::preset::ScenarioCategory;
use crate::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Renovate,
    DemolishAndRebuild,
}

impl Decision {
    /// Returns the label shown on results and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Decision::Renovate => "RENOVATE",
            Decision::DemolishAndRebuild => "DEMOLISH & REBUILD",
        }
    }

    /// Category whose best scenario is recommended.
    pub fn category(&self) -> ScenarioCategory {
        match self {
            Decision::Renovate => ScenarioCategory::Renovation,
            Decision::DemolishAndRebuild => ScenarioCategory::Newbuild,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Outcome of one estimator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub decision: Decision,
    /// Display name of the recommended scenario
    pub recommended_scenario: String,
    /// Absolute difference between the two best totals (MJ)
    pub savings: i64,
    /// Savings relative to the larger of the two best totals, one decimal
    pub savings_percent: f64,
    pub best_renovation: ScenarioResult,
    pub best_newbuild: ScenarioResult,
    /// Every scenario in catalog order
    pub all_scenario_results: Vec<ScenarioResult>,
    /// Formula configuration that produced these results
    pub variant: FormulaVariant,
    /// Coefficients shared by every scenario
    pub baselines: ResolvedBaselines,
}

impl DecisionResult {
    /// The best scenario of the recommended category.
    pub fn recommended(&self) -> &ScenarioResult {
        match self.decision {
            Decision::Renovate => &self.best_renovation,
            Decision::DemolishAndRebuild => &self.best_newbuild,
        }
    }

    /// The best scenario of the other category.
    pub fn alternative(&self) -> &ScenarioResult {
        match self.decision {
            Decision::Renovate => &self.best_newbuild,
            Decision::DemolishAndRebuild => &self.best_renovation,
        }
    }

    /// Scenarios of one category, in catalog order.
    pub fn scenarios_in(&self, category: ScenarioCategory) -> impl Iterator<Item = &ScenarioResult> {
        self.all_scenario_results
            .iter()
            .filter(move |s| s.category == category)
    }

    /// Mean total of one category (MJ), 0 when empty.
    pub fn average_total(&self, category: ScenarioCategory) -> f64 {
        let (sum, count) = self
            .scenarios_in(category)
            .fold((0.0, 0usize), |(sum, n), s| (sum + s.total_carbon as f64, n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

/// Lowest total in `results` for `category`. Earlier entries win ties.
pub fn best_in_category(
    results: &[ScenarioResult],
    category: ScenarioCategory,
) -> Option<&ScenarioResult> {
    results
        .iter()
        .filter(|r| r.category == category)
        .fold(None, |best: Option<&ScenarioResult>, current| match best {
            Some(b) if current.total_carbon < b.total_carbon => Some(current),
            Some(b) => Some(b),
            None => Some(current),
        })
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregates scenario results into a recommendation.
///
/// Renovation is recommended only when its best total is strictly lower
/// than the best new build; an exact tie recommends demolition.
///
/// # Errors
/// [`EstimatorError::MissingCategory`] when either category is empty.
pub fn aggregate(
    results: Vec<ScenarioResult>,
    variant: FormulaVariant,
    baselines: ResolvedBaselines,
) -> Result<DecisionResult> {
    let best_renovation = best_in_category(&results, ScenarioCategory::Renovation)
        .cloned()
        .ok_or(EstimatorError::MissingCategory(ScenarioCategory::Renovation))?;
    let best_newbuild = best_in_category(&results, ScenarioCategory::Newbuild)
        .cloned()
        .ok_or(EstimatorError::MissingCategory(ScenarioCategory::Newbuild))?;

    let decision = if best_renovation.total_carbon < best_newbuild.total_carbon {
        Decision::Renovate
    } else {
        Decision::DemolishAndRebuild
    };

    let savings = (best_renovation.total_carbon - best_newbuild.total_carbon).abs();
    let larger = best_renovation.total_carbon.max(best_newbuild.total_carbon);
    let savings_percent = if larger > 0 {
        round1(savings as f64 / larger as f64 * 100.0)
    } else {
        0.0
    };

    let recommended_scenario = match decision {
        Decision::Renovate => best_renovation.display_name.clone(),
        Decision::DemolishAndRebuild => best_newbuild.display_name.clone(),
    };

    Ok(DecisionResult {
        decision,
        recommended_scenario,
        savings,
        savings_percent,
        best_renovation,
        best_newbuild,
        all_scenario_results: results,
        variant,
        baselines,
    })
}
