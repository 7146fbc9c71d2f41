//! Persona roles and the per-cluster narratives they produce.
//!
//! Four fixed viewpoints write one free-text analysis each per cluster.
//! The raw input is a JSON object `cluster key -> persona name -> text`;
//! [`AnalysisSet::from_raw`] turns it into typed [`PersonaAnalysis`] values
//! and rejects persona names outside the role set. Persona order within a
//! cluster is kept as written, since the combined text is joined in that
//! order.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utilities::{Result, ValidationError};

// ---------------------------------------------------------------------------
// Persona roles
// ---------------------------------------------------------------------------

/// The closed set of narrative viewpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaRole {
    PenetrationTester,
    SecurityResearcher,
    SecurityOpsEngineer,
    DataAnalyst,
}

impl PersonaRole {
    /// All roles, in canonical order.
    pub const ALL: [PersonaRole; 4] = [
        PersonaRole::PenetrationTester,
        PersonaRole::SecurityResearcher,
        PersonaRole::SecurityOpsEngineer,
        PersonaRole::DataAnalyst,
    ];

    /// Number of roles. Used as the fixed denominator of consensus ratios.
    pub const COUNT: usize = Self::ALL.len();

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PenetrationTester => "penetration_tester",
            Self::SecurityResearcher => "security_researcher",
            Self::SecurityOpsEngineer => "security_ops_engineer",
            Self::DataAnalyst => "data_analyst",
        }
    }
}

impl fmt::Display for PersonaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PersonaRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown persona '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Per-cluster analyses
// ---------------------------------------------------------------------------

/// The narratives written about one cluster, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonaAnalysis {
    texts: BTreeMap<PersonaRole, String>,
    /// Roles in first-insertion order.
    #[serde(skip)]
    order: Vec<PersonaRole>,
}

impl PersonaAnalysis {
    /// Create an empty analysis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, role: PersonaRole, text: impl Into<String>) -> Self {
        self.insert(role, text);
        self
    }

    /// Set the narrative for `role`, replacing any previous text.
    ///
    /// A replaced narrative keeps its original position.
    pub fn insert(&mut self, role: PersonaRole, text: impl Into<String>) {
        if self.texts.insert(role, text.into()).is_none() {
            self.order.push(role);
        }
    }

    /// Narrative for `role`, if present.
    pub fn get(&self, role: PersonaRole) -> Option<&str> {
        self.texts.get(&role).map(String::as_str)
    }

    /// Iterate `(role, text)` pairs in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (PersonaRole, &str)> {
        self.texts.iter().map(|(role, text)| (*role, text.as_str()))
    }

    /// Number of personas that wrote about this cluster.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Every narrative case-folded, in role order.
    pub fn folded(&self) -> Vec<(PersonaRole, String)> {
        self.iter()
            .map(|(role, text)| (role, text.to_lowercase()))
            .collect()
    }

    /// All narratives joined by a single space and case-folded, in the
    /// order they were inserted.
    ///
    /// A phrase can span two narratives, so the order affects counts.
    pub fn combined_folded(&self) -> String {
        self.order
            .iter()
            .filter_map(|role| self.texts.get(role).map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A JSON object read as a list of entries, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<V> IntoIterator for OrderedEntries<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Raw persona input as it appears on disk.
pub type RawAnalyses = OrderedEntries<OrderedEntries<String>>;

/// Analyses for every cluster under evaluation, keyed by `cluster_<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSet {
    clusters: BTreeMap<String, PersonaAnalysis>,
}

impl AnalysisSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw input. Any persona name outside the role set is an error.
    ///
    /// A cluster key repeated in the document keeps its last analysis.
    pub fn from_raw(raw: RawAnalyses) -> Result<Self> {
        let mut clusters = BTreeMap::new();
        for (cluster, personas) in raw {
            let mut analysis = PersonaAnalysis::new();
            for (name, text) in personas {
                let role = name.parse::<PersonaRole>().map_err(|_| {
                    ValidationError::UnknownPersona {
                        cluster: cluster.clone(),
                        persona: name.clone(),
                    }
                })?;
                analysis.insert(role, text);
            }
            clusters.insert(cluster, analysis);
        }
        Ok(Self { clusters })
    }

    /// Add or replace the analysis for a cluster key.
    pub fn insert(&mut self, cluster_key: impl Into<String>, analysis: PersonaAnalysis) {
        self.clusters.insert(cluster_key.into(), analysis);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonaAnalysis)> {
        self.clusters.iter().map(|(key, a)| (key.as_str(), a))
    }

    pub fn get(&self, cluster_key: &str) -> Option<&PersonaAnalysis> {
        self.clusters.get(cluster_key)
    }

    /// Number of clusters in the input, with or without a baseline.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_roundtrip_through_from_str() {
        for role in PersonaRole::ALL {
            assert_eq!(role.as_str().parse::<PersonaRole>().unwrap(), role);
        }
        assert!("ciso".parse::<PersonaRole>().is_err());
        assert_eq!(PersonaRole::COUNT, 4);
    }

    #[test]
    fn test_role_serde_matches_as_str() {
        let json = serde_json::to_string(&PersonaRole::SecurityOpsEngineer).unwrap();
        assert_eq!(json, "\"security_ops_engineer\"");
    }

    #[test]
    fn test_combined_folded_joins_in_insertion_order() {
        let mut analysis = PersonaAnalysis::new()
            .with(PersonaRole::DataAnalyst, "First")
            .with(PersonaRole::PenetrationTester, "SECOND");
        assert_eq!(analysis.combined_folded(), "first second");
        analysis.insert(PersonaRole::DataAnalyst, "Replaced");
        assert_eq!(analysis.combined_folded(), "replaced second");
        assert_eq!(analysis.len(), 2);
        // Per-persona iteration stays in role order.
        let roles: Vec<PersonaRole> = analysis.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![PersonaRole::PenetrationTester, PersonaRole::DataAnalyst]);
    }

    #[test]
    fn test_from_raw_keeps_document_order_for_combined_text() {
        // "command and control" only appears when the researcher's text
        // precedes the tester's, as it does in the document.
        let raw: RawAnalyses = serde_json::from_str(
            r#"{"cluster_0": {
                "security_researcher": "Beaconing via command and",
                "penetration_tester": "control channel"
            }}"#,
        )
        .unwrap();
        let set = AnalysisSet::from_raw(raw).unwrap();
        let combined = set.get("cluster_0").unwrap().combined_folded();
        assert_eq!(combined, "beaconing via command and control channel");
    }

    #[test]
    fn test_raw_input_rejects_non_object() {
        assert!(serde_json::from_str::<RawAnalyses>(r#"["cluster_0"]"#).is_err());
        let wrong_text = r#"{"cluster_0": {"data_analyst": 3}}"#;
        assert!(serde_json::from_str::<RawAnalyses>(wrong_text).is_err());
    }

    #[test]
    fn test_from_raw_rejects_unknown_persona() {
        let raw: RawAnalyses = serde_json::from_value(serde_json::json!({
            "cluster_0": {"penetration_tester": "ok", "auditor": "nope"}
        }))
        .unwrap();
        let err = AnalysisSet::from_raw(raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownPersona { ref persona, .. } if persona == "auditor"
        ));
    }

    #[test]
    fn test_from_raw_keeps_every_cluster() {
        let raw: RawAnalyses = serde_json::from_value(serde_json::json!({
            "cluster_0": {"data_analyst": "a"},
            "cluster_9": {}
        }))
        .unwrap();
        let set = AnalysisSet::from_raw(raw).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("cluster_9").unwrap().is_empty());
        assert_eq!(
            set.get("cluster_0").unwrap().get(PersonaRole::DataAnalyst),
            Some("a")
        );
    }
}
