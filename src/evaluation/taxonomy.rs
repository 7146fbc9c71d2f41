//! Keyword tables used by the lexical scorers.
//!
//! Each table is an ordered list of named keyword groups. Scorers iterate
//! the tables; they never embed keywords themselves.

/// A named set of literal, lower-case keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    pub const fn new(name: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { name, keywords }
    }
}

/// Threat vocabulary counted across a cluster's combined text.
///
/// "scanning" also matches "scan", so each "scanning" counts twice.
pub const THREAT_TERMS: &[KeywordGroup] = &[
    KeywordGroup::new("c2", &["c2"]),
    KeywordGroup::new("command_control", &["command and control", "command & control"]),
    KeywordGroup::new("botnet", &["botnet"]),
    KeywordGroup::new("malware", &["malware"]),
    KeywordGroup::new("exfiltration", &["exfiltration"]),
    KeywordGroup::new("dos", &["dos", "denial"]),
    KeywordGroup::new("scanning", &["scanning", "scan"]),
    KeywordGroup::new("reconnaissance", &["reconnaissance"]),
];

/// Per-persona C2 signal. Narrower than `c2` + `command_control` above:
/// "command & control" is not accepted here.
pub const C2_SIGNAL: KeywordGroup = KeywordGroup::new("c2", &["c2", "command and control"]);

/// Per-persona botnet signal.
pub const BOTNET_SIGNAL: KeywordGroup = KeywordGroup::new("botnet", &["botnet"]);

/// Data-feature taxonomy for coverage.
pub const FEATURE_CATEGORIES: &[KeywordGroup] = &[
    KeywordGroup::new("protocols", &["tcp", "udp"]),
    KeywordGroup::new("ports", &["port 80", "80"]),
    KeywordGroup::new("states", &["int", "req", "rst"]),
    KeywordGroup::new("destinations", &["192.168.100"]),
    KeywordGroup::new("anomaly", &["lof", "anomaly"]),
    KeywordGroup::new("bytes", &["bytes", "flow"]),
    KeywordGroup::new("packets", &["packet", "pkts"]),
];

/// Analytical themes for inter-persona agreement.
pub const THEMES: &[KeywordGroup] = &[
    KeywordGroup::new(
        "technical",
        &["bandwidth", "latency", "packets", "bytes", "protocol"],
    ),
    KeywordGroup::new("threat", &["attack", "botnet", "malware", "threat", "exploit"]),
    KeywordGroup::new(
        "actionable",
        &["recommend", "should", "must", "must implement", "isolate", "block", "monitor"],
    ),
    KeywordGroup::new(
        "defensive",
        &["defense", "mitigation", "detection", "prevention"],
    ),
];
