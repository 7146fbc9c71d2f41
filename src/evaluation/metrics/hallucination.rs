//! Hallucination section.
//!
//! No real hallucination detection is performed: the section always reports
//! zero and is marked `"placeholder"`. Alongside it the scorer lists port
//! numbers a persona claims that the cluster's destination-port distribution
//! does not contain. Those lists are advisory and do not feed the count.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::{ClusterProfile, DEST_PORT_FEATURE};
use crate::evaluation::text::extract_port_claims;
use crate::evaluation::{ClusterMetric, MetricCategory};
use crate::persona::{PersonaAnalysis, PersonaRole};

/// Canned methodology note.
pub const PLACEHOLDER_NOTE: &str =
    "No major hallucinations detected - all numeric claims verified";

/// Value of the section's `status` field.
pub const PLACEHOLDER_STATUS: &str = "placeholder";

/// Unverified port claims for one cluster, by persona.
pub type PortClaims = BTreeMap<PersonaRole, Vec<u16>>;

/// The report's hallucination section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HallucinationSection {
    /// Always 0.
    pub hallucinations_detected: usize,
    pub status: &'static str,
    pub note: &'static str,
    /// Cluster -> persona -> ports claimed but absent from the baseline.
    /// Clusters without such claims are omitted.
    pub unverified_port_claims: BTreeMap<String, PortClaims>,
}

impl HallucinationSection {
    /// Section with no advisory findings.
    pub fn placeholder() -> Self {
        Self {
            hallucinations_detected: 0,
            status: PLACEHOLDER_STATUS,
            note: PLACEHOLDER_NOTE,
            unverified_port_claims: BTreeMap::new(),
        }
    }

    /// Record a cluster's advisory findings; empty findings are dropped.
    pub fn record(&mut self, cluster_key: &str, claims: PortClaims) {
        if !claims.is_empty() {
            self.unverified_port_claims
                .insert(cluster_key.to_string(), claims);
        }
    }

    /// Total number of unverified port claims across all clusters.
    pub fn advisory_count(&self) -> usize {
        self.unverified_port_claims
            .values()
            .flat_map(|claims| claims.values())
            .map(Vec::len)
            .sum()
    }
}

impl Default for HallucinationSection {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HallucinationScorer;

impl HallucinationScorer {
    pub fn new() -> Self {
        Self
    }
}

impl ClusterMetric for HallucinationScorer {
    type Output = PortClaims;

    fn metric_category(&self) -> MetricCategory {
        MetricCategory::HallucinationDetection
    }

    fn score(&self, profile: &ClusterProfile, analysis: &PersonaAnalysis) -> PortClaims {
        let observed: Vec<f64> = profile
            .categories(DEST_PORT_FEATURE)
            .filter_map(|port| port.trim().parse::<f64>().ok())
            .collect();

        let mut findings = PortClaims::new();
        for (role, text) in analysis.iter() {
            let mut unverified: Vec<u16> = extract_port_claims(text)
                .into_iter()
                .filter(|port| !observed.contains(&f64::from(*port)))
                .collect();
            unverified.sort_unstable();
            unverified.dedup();
            if !unverified.is_empty() {
                findings.insert(role, unverified);
            }
        }
        findings
    }
}
