//! SustainaBuild scenario carbon estimator.
//!
//! Estimates embodied and operational energy of a building across a fixed
//! set of renovation and new-build scenarios, then recommends whether to
//! renovate or to demolish and rebuild.
//!
//! ```
//! use sustainabuild::{compute_scenarios, BuildingInputs, Decision, EnergyBaseline};
//!
//! let inputs = BuildingInputs::new("office", 500.0, "temperate")
//!     .with_embodied_energy(EnergyBaseline::Known(10500.0))
//!     .with_operational_energy(EnergyBaseline::Known(20.0));
//! let result = compute_scenarios(&inputs).unwrap();
//! assert_eq!(result.decision, Decision::Renovate);
//! ```

pub mod config;
pub mod error;
pub mod estimator;
pub mod inputs;
pub mod report;
pub mod scenario;
pub mod tables;
pub mod wizard;

pub use config::EstimatorConfig;
pub use error::{EstimatorError, Result};
pub use estimator::{compute_scenarios, Estimator};
pub use inputs::{BuildingInputs, EnergyBaseline, MaterialQuantity};
pub use report::{CarbonReport, ChartData, ReportFormat};
pub use scenario::{
    Decision, DecisionResult, FormulaVariant, ScenarioCategory, ScenarioPreset, ScenarioResult,
};
pub use wizard::{Transition, WizardState};
