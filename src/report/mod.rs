//! Report assembly.
//!
//! [`compute_report`] is the whole engine: it joins every analysed cluster
//! with its baseline profile, runs the five scorers and returns an immutable
//! [`MetricReport`]. It performs no I/O; the only side effect is tracing.

mod summary;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::BaselineIndex;
use crate::evaluation::metrics::{
    AbsoluteTolerance, AgreementResult, AgreementScorer, ConsistencyResult, ConsistencyScorer,
    CoverageResult, CoverageScorer, GroundingScore, GroundingScorer, HallucinationScorer,
    HallucinationSection, NumberMatcher,
};
use crate::baseline::ClusterProfile;
use crate::evaluation::{ClusterMetric, MetricCategory};
use crate::persona::{AnalysisSet, PersonaAnalysis, PersonaRole};

/// Grounding scores for one cluster, by persona.
pub type ClusterGrounding = BTreeMap<PersonaRole, GroundingScore>;

/// Dataset counts and the caller-supplied report date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    /// Clusters in the persona input, including skipped ones.
    pub total_clusters: usize,
    pub total_personas: usize,
    /// `total_clusters * total_personas`.
    pub total_analyses: usize,
    /// Clusters that had a baseline profile and were scored.
    pub evaluated_clusters: usize,
    /// Cluster keys dropped for lack of a baseline profile.
    pub skipped_clusters: Vec<String>,
    pub report_date: String,
}

/// The validation report. Section keys are fixed by the output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub metadata: ReportMetadata,
    #[serde(rename = "metric_1_grounding_fidelity")]
    pub grounding: BTreeMap<String, ClusterGrounding>,
    #[serde(rename = "metric_2_hallucination_detection")]
    pub hallucination: HallucinationSection,
    #[serde(rename = "metric_3_semantic_consistency")]
    pub consistency: BTreeMap<String, ConsistencyResult>,
    #[serde(rename = "metric_4_feature_coverage")]
    pub coverage: BTreeMap<String, CoverageResult>,
    #[serde(rename = "metric_5_inter_persona_agreement")]
    pub agreement: BTreeMap<String, AgreementResult>,
}

impl MetricReport {
    /// Mean fidelity over every (cluster, persona) score, if any.
    pub fn average_fidelity(&self) -> Option<f64> {
        let fidelities: Vec<f64> = self
            .grounding
            .values()
            .flat_map(|personas| personas.values().map(|s| s.fidelity))
            .collect();
        if fidelities.is_empty() {
            None
        } else {
            Some(fidelities.iter().sum::<f64>() / fidelities.len() as f64)
        }
    }

    /// Pretty-printed JSON, as written to disk.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Runs every scorer over every cluster.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler<M = AbsoluteTolerance> {
    grounding: GroundingScorer<M>,
    hallucination: HallucinationScorer,
    consistency: ConsistencyScorer,
    coverage: CoverageScorer,
    agreement: AgreementScorer,
}

impl ReportAssembler<AbsoluteTolerance> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: NumberMatcher> ReportAssembler<M> {
    /// Use a custom grounding policy.
    pub fn with_grounding(grounding: GroundingScorer<M>) -> Self {
        Self {
            grounding,
            hallucination: HallucinationScorer::new(),
            consistency: ConsistencyScorer::new(),
            coverage: CoverageScorer::new(),
            agreement: AgreementScorer::new(),
        }
    }

    /// The section each scorer fills, in report order.
    pub fn categories(&self) -> [MetricCategory; 5] {
        [
            self.grounding.metric_category(),
            self.hallucination.metric_category(),
            self.consistency.metric_category(),
            self.coverage.metric_category(),
            self.agreement.metric_category(),
        ]
    }

    /// Score every cluster in `analyses` that has a baseline profile.
    pub fn assemble(
        &self,
        baseline: &BaselineIndex,
        analyses: &AnalysisSet,
        report_date: impl Into<String>,
    ) -> MetricReport {
        let mut grounding = BTreeMap::new();
        let mut hallucination = HallucinationSection::placeholder();
        let mut consistency = BTreeMap::new();
        let mut coverage = BTreeMap::new();
        let mut agreement = BTreeMap::new();
        let mut skipped_clusters = Vec::new();

        for (key, analysis) in analyses.iter() {
            let Some(profile) = baseline.get(key) else {
                tracing::warn!(cluster = key, "no baseline profile, cluster excluded from every metric");
                skipped_clusters.push(key.to_string());
                continue;
            };
            tracing::debug!(cluster = key, personas = analysis.len(), "scoring cluster");

            grounding.insert(key.to_string(), run(&self.grounding, key, profile, analysis));
            hallucination.record(key, run(&self.hallucination, key, profile, analysis));
            consistency.insert(key.to_string(), run(&self.consistency, key, profile, analysis));
            coverage.insert(key.to_string(), run(&self.coverage, key, profile, analysis));
            agreement.insert(key.to_string(), run(&self.agreement, key, profile, analysis));
        }

        let total_clusters = analyses.len();
        let metadata = ReportMetadata {
            total_clusters,
            total_personas: PersonaRole::COUNT,
            total_analyses: total_clusters * PersonaRole::COUNT,
            evaluated_clusters: grounding.len(),
            skipped_clusters,
            report_date: report_date.into(),
        };

        MetricReport {
            metadata,
            grounding,
            hallucination,
            consistency,
            coverage,
            agreement,
        }
    }
}

/// One scorer over one cluster, traced under its report section.
fn run<S: ClusterMetric>(
    scorer: &S,
    cluster: &str,
    profile: &ClusterProfile,
    analysis: &PersonaAnalysis,
) -> S::Output {
    let _span = tracing::trace_span!(
        "score",
        cluster,
        section = scorer.metric_category().section_key()
    )
    .entered();
    scorer.score(profile, analysis)
}

/// Compute the report with the default grounding policy.
pub fn compute_report(
    baseline: &BaselineIndex,
    analyses: &AnalysisSet,
    report_date: impl Into<String>,
) -> MetricReport {
    ReportAssembler::new().assemble(baseline, analyses, report_date)
}
