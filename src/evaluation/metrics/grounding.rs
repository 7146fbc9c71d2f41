//! Grounding fidelity: how many numbers a persona quotes are real.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline::ClusterProfile;
use crate::evaluation::text::extract_numbers;
use crate::evaluation::{ClusterMetric, MetricCategory};
use crate::persona::{PersonaAnalysis, PersonaRole};

/// Absolute distance under which a quoted number counts as a baseline fact.
pub const GROUNDING_TOLERANCE: f64 = 0.1;

/// Decides whether a quoted number corresponds to one of the facts.
pub trait NumberMatcher {
    fn is_grounded(&self, candidate: f64, facts: &[f64]) -> bool;
}

/// Strictly within [`GROUNDING_TOLERANCE`] of any fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteTolerance;

impl NumberMatcher for AbsoluteTolerance {
    fn is_grounded(&self, candidate: f64, facts: &[f64]) -> bool {
        facts
            .iter()
            .any(|fact| (candidate - fact).abs() < GROUNDING_TOLERANCE)
    }
}

/// Grounding result for one (cluster, persona).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundingScore {
    pub grounded_count: usize,
    /// Numbers mentioned; 1 when the text mentions none.
    pub total_count: usize,
    /// `grounded_count / total_count * 100`.
    pub fidelity: f64,
}

impl GroundingScore {
    fn from_counts(grounded_count: usize, mentioned: usize) -> Self {
        // No mentions scores 0/1 rather than an undefined ratio.
        let total_count = mentioned.max(1);
        Self {
            grounded_count,
            total_count,
            fidelity: grounded_count as f64 / total_count as f64 * 100.0,
        }
    }
}

/// Scores every persona's text for a cluster against its numeric facts.
#[derive(Debug, Clone, Default)]
pub struct GroundingScorer<M = AbsoluteTolerance> {
    matcher: M,
}

impl GroundingScorer<AbsoluteTolerance> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: NumberMatcher> GroundingScorer<M> {
    /// Use a different matching policy.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Score a single text against a precomputed fact list.
    pub fn score_text(&self, text: &str, facts: &[f64]) -> GroundingScore {
        let numbers = extract_numbers(text);
        let grounded = numbers
            .iter()
            .filter(|n| self.matcher.is_grounded(**n, facts))
            .count();
        GroundingScore::from_counts(grounded, numbers.len())
    }
}

impl<M: NumberMatcher> ClusterMetric for GroundingScorer<M> {
    type Output = BTreeMap<PersonaRole, GroundingScore>;

    fn metric_category(&self) -> MetricCategory {
        MetricCategory::GroundingFidelity
    }

    fn score(&self, profile: &ClusterProfile, analysis: &PersonaAnalysis) -> Self::Output {
        let facts = profile.grounding_values();
        analysis
            .iter()
            .map(|(role, text)| (role, self.score_text(text, &facts)))
            .collect()
    }
}
