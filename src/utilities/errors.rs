//! Error types for the validation engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs, resolving configuration or writing
/// the report.
///
/// Every variant is fatal for a run: the engine has no partial-result mode.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// File I/O failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The YAML config file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Two baseline records share a cluster id.
    #[error("Duplicate baseline record for cluster id {0}")]
    DuplicateCluster(i64),

    /// A baseline record lacks a fact the grounding check relies on.
    #[error("Baseline record for cluster id {cluster_id} is missing {missing}")]
    IncompleteProfile { cluster_id: i64, missing: String },

    /// A persona name outside the fixed role set.
    #[error("Unknown persona '{persona}' in {cluster}")]
    UnknownPersona { cluster: String, persona: String },

    /// Configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_cluster_and_persona() {
        let err = ValidationError::UnknownPersona {
            cluster: "cluster_3".to_string(),
            persona: "auditor".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown persona 'auditor' in cluster_3");
    }

    #[test]
    fn test_duplicate_cluster_message() {
        assert_eq!(
            ValidationError::DuplicateCluster(7).to_string(),
            "Duplicate baseline record for cluster id 7"
        );
    }

    #[test]
    fn test_incomplete_profile_message() {
        let err = ValidationError::IncompleteProfile {
            cluster_id: 2,
            missing: "numeric_stats.bytes.mean".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Baseline record for cluster id 2 is missing numeric_stats.bytes.mean"
        );
    }
}
