//! Run configuration.
//!
//! Values resolve in three layers, later ones winning:
//! 1. built-in defaults
//! 2. a YAML file named by `VALIDATOR_CONFIG`
//! 3. the environment variables `ANALYSIS_PATH`, `BASELINE_PATH`,
//!    `REPORT_PATH` and `REPORT_DATE`
//!
//! Matching tolerance and keyword tables are not configurable.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utilities::{Result, ValidationError};

pub const CONFIG_FILE_VAR: &str = "VALIDATOR_CONFIG";
pub const ANALYSIS_PATH_VAR: &str = "ANALYSIS_PATH";
pub const BASELINE_PATH_VAR: &str = "BASELINE_PATH";
pub const REPORT_PATH_VAR: &str = "REPORT_PATH";
pub const REPORT_DATE_VAR: &str = "REPORT_DATE";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Paths and report date for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Persona analyses, `cluster key -> persona -> text`.
    pub analysis_path: PathBuf,
    /// Baseline cluster profiles, a JSON array.
    pub baseline_path: PathBuf,
    /// Where the JSON report is written.
    pub report_path: PathBuf,
    /// `YYYY-MM-DD`, copied into the report metadata.
    pub report_date: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            analysis_path: PathBuf::from("llm_multi_persona_analysis.json"),
            baseline_path: PathBuf::from("cluster_profiles.json"),
            report_path: PathBuf::from("METRICS_VALIDATION_REPORT.json"),
            report_date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        let yaml = match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) => Some(std::fs::read_to_string(&path).map_err(|source| {
                ValidationError::Io {
                    path: PathBuf::from(path),
                    source,
                }
            })?),
            Err(_) => None,
        };
        Self::resolve(yaml.as_deref(), |name| std::env::var(name).ok())
    }

    /// Layer an optional YAML document and a variable lookup over the
    /// defaults, then validate.
    pub fn resolve<F>(yaml: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match yaml {
            Some(doc) => serde_yaml::from_str::<Self>(doc)?,
            None => Self::default(),
        };

        if let Some(v) = lookup(ANALYSIS_PATH_VAR) {
            config.analysis_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(BASELINE_PATH_VAR) {
            config.baseline_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(REPORT_PATH_VAR) {
            config.report_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(REPORT_DATE_VAR) {
            config.report_date = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the report date is a real calendar date.
    pub fn validate(&self) -> Result<()> {
        NaiveDate::parse_from_str(&self.report_date, DATE_FORMAT).map_err(|e| {
            ValidationError::Config(format!(
                "report_date '{}' is not YYYY-MM-DD: {}",
                self.report_date, e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = ValidatorConfig::resolve(None, vars(&[])).unwrap();
        assert_eq!(config.analysis_path, PathBuf::from("llm_multi_persona_analysis.json"));
        assert_eq!(config.baseline_path, PathBuf::from("cluster_profiles.json"));
        assert_eq!(config.report_path, PathBuf::from("METRICS_VALIDATION_REPORT.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_then_env_precedence() {
        let yaml = r#"
analysis_path: "data/personas.json"
baseline_path: "data/profiles.json"
report_date: "2026-01-31"
"#;
        let config = ValidatorConfig::resolve(
            Some(yaml),
            vars(&[("BASELINE_PATH", "/tmp/override.json")]),
        )
        .unwrap();
        assert_eq!(config.analysis_path, PathBuf::from("data/personas.json"));
        assert_eq!(config.baseline_path, PathBuf::from("/tmp/override.json"));
        assert_eq!(config.report_path, PathBuf::from("METRICS_VALIDATION_REPORT.json"));
        assert_eq!(config.report_date, "2026-01-31");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let err = ValidatorConfig::resolve(None, vars(&[("REPORT_DATE", "31/01/2026")]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Config(_)));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let err = ValidatorConfig::resolve(Some("analysis_path: [unclosed"), vars(&[]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Yaml(_)));
    }
}
