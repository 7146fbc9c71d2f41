//! Baseline cluster profiles and the index that resolves them by key.
//!
//! Profiles are produced upstream by the clustering step and handed to the
//! engine as a JSON array. The index maps the synthesized key
//! `cluster_<id>` to each record so persona analyses can be joined against
//! their cluster.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utilities::{Result, ValidationError};

/// Numeric feature holding per-cluster packet counts.
pub const PACKETS_FEATURE: &str = "pkts";
/// Numeric feature holding per-cluster byte counts.
pub const BYTES_FEATURE: &str = "bytes";
/// Categorical feature holding the protocol distribution.
pub const PROTOCOL_FEATURE: &str = "proto";
/// Categorical feature holding the destination-port distribution.
pub const DEST_PORT_FEATURE: &str = "dport";

/// Numeric features whose `mean` and `max` are grounding facts.
pub const FACT_NUMERIC_FEATURES: [&str; 2] = [PACKETS_FEATURE, BYTES_FEATURE];
/// Categorical features whose frequencies are grounding facts.
pub const FACT_CATEGORICAL_FEATURES: [&str; 2] = [PROTOCOL_FEATURE, DEST_PORT_FEATURE];

/// Summary statistics for one numeric feature.
///
/// `max` is always present. `mean` is required for the fact features and
/// optional elsewhere (the LOF summary may omit it). Any other statistic in
/// the input (`min`, `std`, quantiles) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    #[serde(default)]
    pub mean: Option<f64>,
    pub max: f64,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl StatSummary {
    pub fn new(mean: f64, max: f64) -> Self {
        Self {
            mean: Some(mean),
            max,
            other: BTreeMap::new(),
        }
    }
}

/// Baseline facts for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster_id: i64,
    pub size: u64,
    pub numeric_stats: BTreeMap<String, StatSummary>,
    pub lof_score_stats: StatSummary,
    /// Categorical feature -> category value -> frequency.
    pub categorical_dist: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ClusterProfile {
    /// Key under which persona analyses refer to this cluster.
    pub fn key(&self) -> String {
        cluster_key(self.cluster_id)
    }

    /// Reject a profile that lacks any grounding fact.
    ///
    /// Both numeric fact features need a `mean`, and both categorical fact
    /// features need a distribution. Extra features are allowed.
    pub fn validate(&self) -> Result<()> {
        let missing = |what: String| ValidationError::IncompleteProfile {
            cluster_id: self.cluster_id,
            missing: what,
        };
        for feature in FACT_NUMERIC_FEATURES {
            let stats = self
                .numeric_stats
                .get(feature)
                .ok_or_else(|| missing(format!("numeric_stats.{}", feature)))?;
            if stats.mean.is_none() {
                return Err(missing(format!("numeric_stats.{}.mean", feature)));
            }
        }
        for feature in FACT_CATEGORICAL_FEATURES {
            if !self.categorical_dist.contains_key(feature) {
                return Err(missing(format!("categorical_dist.{}", feature)));
            }
        }
        Ok(())
    }

    /// Numeric facts a persona may legitimately quote.
    pub fn grounding_values(&self) -> Vec<f64> {
        let mut values = vec![self.size as f64];
        for feature in FACT_NUMERIC_FEATURES {
            if let Some(stats) = self.numeric_stats.get(feature) {
                values.extend(stats.mean);
                values.push(stats.max);
            }
        }
        values.push(self.lof_score_stats.max);
        for feature in FACT_CATEGORICAL_FEATURES {
            if let Some(dist) = self.categorical_dist.get(feature) {
                values.extend(dist.values().copied());
            }
        }
        values
    }

    /// Category values of a categorical feature, e.g. the observed ports.
    pub fn categories(&self, feature: &str) -> impl Iterator<Item = &str> {
        self.categorical_dist
            .get(feature)
            .into_iter()
            .flat_map(|dist| dist.keys().map(String::as_str))
    }
}

/// Synthesize the lookup key for a cluster id.
pub fn cluster_key(cluster_id: i64) -> String {
    format!("cluster_{}", cluster_id)
}

/// Lookup from `cluster_<id>` to profile.
#[derive(Debug, Clone, Default)]
pub struct BaselineIndex {
    profiles: BTreeMap<String, ClusterProfile>,
}

impl BaselineIndex {
    /// Build the index. An incomplete profile or a repeated `cluster_id`
    /// is rejected.
    pub fn build(profiles: Vec<ClusterProfile>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for profile in profiles {
            profile.validate()?;
            let id = profile.cluster_id;
            if index.insert(profile.key(), profile).is_some() {
                return Err(ValidationError::DuplicateCluster(id));
            }
        }
        Ok(Self { profiles: index })
    }

    /// Resolve a cluster key; `None` means the cluster must be skipped.
    pub fn get(&self, cluster_key: &str) -> Option<&ClusterProfile> {
        self.profiles.get(cluster_key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
