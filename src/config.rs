//! Estimator configuration.
//!
//! Settings come from an optional JSON file and from environment variables,
//! with environment variables taking precedence:
//!
//! - `SUSTAINABUILD_VARIANT`: `reuse-aware`, `material-aware` or `legacy`
//! - `SUSTAINABUILD_REPORT_FORMAT`: `markdown`, `html`, `csv` or `json`
//! - `SUSTAINABUILD_REPORT_DIR`: directory for saved reports
//! - `SUSTAINABUILD_VERBOSE`: `1` or `true` for per-scenario logging

use crate::error::Result;
use crate::report::ReportFormat;
use crate::scenario::FormulaVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for estimator runs and report export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Formula configuration
    pub variant: FormulaVariant,
    /// Default export format
    pub report_format: ReportFormat,
    /// Directory for saved reports
    pub report_dir: Option<PathBuf>,
    /// Log every scenario at debug level
    pub verbose: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            variant: FormulaVariant::default(),
            report_format: ReportFormat::Markdown,
            report_dir: None,
            verbose: false,
        }
        .with_env_overrides()
    }
}

impl EstimatorConfig {
    /// Creates a config from environment variables only.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Creates a config for `variant` with every other setting at its default.
    pub fn for_variant(variant: FormulaVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Loads a JSON config file, then applies environment overrides.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: EstimatorConfig = serde_json::from_str(&content)?;
        Ok(config.with_env_overrides())
    }

    /// Applies any `SUSTAINABUILD_*` variables that are set and parse.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var("SUSTAINABUILD_VARIANT") {
            match FormulaVariant::from_key(&value) {
                Some(variant) => self.variant = variant,
                None => tracing::warn!(value = %value, "ignoring unknown SUSTAINABUILD_VARIANT"),
            }
        }

        if let Ok(value) = std::env::var("SUSTAINABUILD_REPORT_FORMAT") {
            match ReportFormat::from_name(&value) {
                Some(format) => self.report_format = format,
                None => tracing::warn!(value = %value, "ignoring unknown SUSTAINABUILD_REPORT_FORMAT"),
            }
        }

        if let Ok(dir) = std::env::var("SUSTAINABUILD_REPORT_DIR") {
            self.report_dir = Some(PathBuf::from(dir));
        }

        if let Ok(value) = std::env::var("SUSTAINABUILD_VERBOSE") {
            self.verbose = value == "1" || value.to_lowercase() == "true";
        }

        self
    }

    /// Path for a report named `stem` in the configured format.
    pub fn report_path(&self, stem: &str) -> PathBuf {
        let file = format!("{}.{}", stem, self.report_format.extension());
        match &self.report_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_variant() {
        let config = EstimatorConfig::for_variant(FormulaVariant::Legacy);
        assert_eq!(config.variant, FormulaVariant::Legacy);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EstimatorConfig =
            serde_json::from_str(r#"{"variant":"material-aware"}"#).unwrap();
        assert_eq!(config.variant, FormulaVariant::MaterialAware);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sustainabuild.json");
        std::fs::write(&path, r#"{"report_format":"csv","report_dir":"reports"}"#).unwrap();

        let config = EstimatorConfig::from_file(&path).unwrap();
        assert_eq!(config.report_dir, Some(PathBuf::from("reports")));
        assert!(EstimatorConfig::from_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_report_path() {
        let config = EstimatorConfig {
            variant: FormulaVariant::ReuseAware,
            report_format: ReportFormat::Html,
            report_dir: Some(PathBuf::from("out")),
            verbose: false,
        };
        assert_eq!(config.report_path("assessment"), PathBuf::from("out/assessment.html"));
    }
}
