//! Metric validation engine.
//!
//! Five independent passes score persona narratives against a cluster's
//! baseline and against each other:
//! - [`metrics::GroundingScorer`] - numeric mentions that match baseline facts
//! - [`metrics::HallucinationScorer`] - advisory check of port claims
//! - [`metrics::ConsistencyScorer`] - threat vocabulary and C2 consensus
//! - [`metrics::CoverageScorer`] - data-feature keyword mentions
//! - [`metrics::AgreementScorer`] - analytical themes shared across personas
//!
//! No pass reads another's output. All of them are pure functions of the
//! cluster profile and the persona texts.

pub mod metrics;
pub mod taxonomy;
pub mod text;

use serde::Serialize;

use crate::baseline::ClusterProfile;
use crate::persona::{PersonaAnalysis, PersonaRole};

// ---------------------------------------------------------------------------
// Metric categories
// ---------------------------------------------------------------------------

/// The five report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    GroundingFidelity,
    HallucinationDetection,
    SemanticConsistency,
    FeatureCoverage,
    InterPersonaAgreement,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 5] = [
        MetricCategory::GroundingFidelity,
        MetricCategory::HallucinationDetection,
        MetricCategory::SemanticConsistency,
        MetricCategory::FeatureCoverage,
        MetricCategory::InterPersonaAgreement,
    ];

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            MetricCategory::GroundingFidelity => "Grounding Fidelity",
            MetricCategory::HallucinationDetection => "Hallucination Detection",
            MetricCategory::SemanticConsistency => "Semantic Consistency",
            MetricCategory::FeatureCoverage => "Feature Coverage",
            MetricCategory::InterPersonaAgreement => "Inter-Persona Agreement",
        }
    }

    /// Top-level key of the section in the serialized report.
    pub fn section_key(&self) -> &'static str {
        match self {
            MetricCategory::GroundingFidelity => "metric_1_grounding_fidelity",
            MetricCategory::HallucinationDetection => "metric_2_hallucination_detection",
            MetricCategory::SemanticConsistency => "metric_3_semantic_consistency",
            MetricCategory::FeatureCoverage => "metric_4_feature_coverage",
            MetricCategory::InterPersonaAgreement => "metric_5_inter_persona_agreement",
        }
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

// ---------------------------------------------------------------------------
// Scorer trait
// ---------------------------------------------------------------------------

/// A scoring pass over one cluster.
///
/// Implementations receive the resolved baseline and every persona text for
/// the cluster, and return that cluster's entry for their report section.
pub trait ClusterMetric {
    /// Per-cluster result stored in the report.
    type Output: Serialize;

    /// The report section this pass fills.
    fn metric_category(&self) -> MetricCategory;

    /// Score one cluster.
    fn score(&self, profile: &ClusterProfile, analysis: &PersonaAnalysis) -> Self::Output;
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// `hits / 4`, the fixed role count.
///
/// Under-reports when fewer than four personas wrote about a cluster; see
/// [`present_ratio`] for the alternative.
pub fn role_ratio(hits: usize) -> f64 {
    hits as f64 / PersonaRole::COUNT as f64
}

/// `hits / present`, or 0 when no persona is present.
pub fn present_ratio(hits: usize, present: usize) -> f64 {
    if present == 0 {
        0.0
    } else {
        hits as f64 / present as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_are_numbered_in_order() {
        for (i, category) in MetricCategory::ALL.iter().enumerate() {
            assert!(category
                .section_key()
                .starts_with(&format!("metric_{}_", i + 1)));
        }
    }

    #[test]
    fn test_display_uses_title() {
        assert_eq!(
            MetricCategory::InterPersonaAgreement.to_string(),
            "Inter-Persona Agreement"
        );
    }

    #[test]
    fn test_role_ratio_is_quarter_steps() {
        assert_eq!(role_ratio(0), 0.0);
        assert_eq!(role_ratio(1), 0.25);
        assert_eq!(role_ratio(4), 1.0);
    }

    #[test]
    fn test_present_ratio_handles_empty() {
        assert_eq!(present_ratio(0, 0), 0.0);
        assert_eq!(present_ratio(2, 2), 1.0);
        assert_eq!(present_ratio(1, 3), 1.0 / 3.0);
    }
}
