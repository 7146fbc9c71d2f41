//! Semantic consistency: do the personas agree on the threat?

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::ClusterProfile;
use crate::evaluation::taxonomy::{KeywordGroup, BOTNET_SIGNAL, C2_SIGNAL, THREAT_TERMS};
use crate::evaluation::text::{contains_any, count_all};
use crate::evaluation::{present_ratio, role_ratio, ClusterMetric, MetricCategory};
use crate::persona::{PersonaAnalysis, PersonaRole};

/// Threat signals found in one persona's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonaThreatFlags {
    pub mentions_c2: bool,
    pub mentions_botnet: bool,
}

/// Consistency result for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyResult {
    /// Threat term -> occurrences across all personas' text.
    pub threat_mentions: BTreeMap<&'static str, usize>,
    pub persona_agreements: BTreeMap<PersonaRole, PersonaThreatFlags>,
    /// Personas mentioning C2, over the fixed role count.
    pub c2_consensus: f64,
    /// Personas mentioning C2, over the personas present.
    pub c2_consensus_present: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ConsistencyScorer {
    terms: &'static [KeywordGroup],
}

impl ConsistencyScorer {
    pub fn new() -> Self {
        Self {
            terms: THREAT_TERMS,
        }
    }
}

impl Default for ConsistencyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterMetric for ConsistencyScorer {
    type Output = ConsistencyResult;

    fn metric_category(&self) -> MetricCategory {
        MetricCategory::SemanticConsistency
    }

    fn score(&self, _profile: &ClusterProfile, analysis: &PersonaAnalysis) -> ConsistencyResult {
        let combined = analysis.combined_folded();
        let threat_mentions = self
            .terms
            .iter()
            .map(|group| (group.name, count_all(&combined, group.keywords)))
            .collect();

        let persona_agreements: BTreeMap<PersonaRole, PersonaThreatFlags> = analysis
            .folded()
            .into_iter()
            .map(|(role, text)| {
                let flags = PersonaThreatFlags {
                    mentions_c2: contains_any(&text, C2_SIGNAL.keywords),
                    mentions_botnet: contains_any(&text, BOTNET_SIGNAL.keywords),
                };
                (role, flags)
            })
            .collect();

        let c2_hits = persona_agreements.values().filter(|f| f.mentions_c2).count();
        ConsistencyResult {
            threat_mentions,
            c2_consensus: role_ratio(c2_hits),
            c2_consensus_present: present_ratio(c2_hits, persona_agreements.len()),
            persona_agreements,
        }
    }
}
