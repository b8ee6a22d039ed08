//! Error types for the carbon estimator.
//!
//! Lookup misses are never errors: categorical tables fall back to named
//! defaults. Errors are reserved for inputs that would make the arithmetic
//! meaningless (non-positive floor area) or for I/O around reports and config.

use crate::scenario::ScenarioCategory;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Errors raised while validating inputs, estimating, or exporting reports.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    /// Floor area must be finite and strictly positive.
    #[error("floor area must be a positive number of m², got {0}")]
    InvalidFloorArea(f64),

    /// A field required by the selected formula variant is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but outside its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// A scenario term is too large to report as whole megajoules.
    #[error("{term} energy of scenario {scenario} is out of range: {value}")]
    EnergyOutOfRange {
        scenario: String,
        term: &'static str,
        value: f64,
    },

    /// The preset catalog produced no scenario for a category.
    #[error("no {0} scenario available to compare")]
    MissingCategory(ScenarioCategory),

    /// Unknown report or variant name.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EstimatorError::InvalidFloorArea(0.0);
        assert_eq!(
            err.to_string(),
            "floor area must be a positive number of m², got 0"
        );

        let err = EstimatorError::MissingCategory(ScenarioCategory::Newbuild);
        assert_eq!(err.to_string(), "no new build scenario available to compare");

        let err = EstimatorError::InvalidValue {
            field: "reuse_rate",
            reason: "must be between 0 and 1".to_string(),
        };
        assert!(err.to_string().contains("reuse_rate"));

        let err = EstimatorError::EnergyOutOfRange {
            scenario: "light-renovation".to_string(),
            term: "total",
            value: f64::INFINITY,
        };
        assert_eq!(
            err.to_string(),
            "total energy of scenario light-renovation is out of range: inf"
        );
    }
}
