//! # persona-validation
//!
//! Validates free-text analyses written by four security personas about
//! network-traffic clusters. Each narrative is scored against the cluster's
//! baseline profile and against the other personas' narratives, producing a
//! five-section JSON report:
//!
//! 1. grounding fidelity - quoted numbers that match baseline facts
//! 2. hallucination detection - placeholder plus an advisory port check
//! 3. semantic consistency - threat vocabulary and C2 consensus
//! 4. feature coverage - data-feature keywords mentioned
//! 5. inter-persona agreement - analytical themes shared across personas
//!
//! Scoring is deterministic lexical and numeric comparison. The engine
//! ([`report::compute_report`]) is a pure function of already-loaded inputs;
//! [`loader`] and [`config`] handle the surrounding I/O.

pub mod baseline;
pub mod config;
pub mod evaluation;
pub mod loader;
pub mod persona;
pub mod report;
pub mod utilities;

pub use baseline::{BaselineIndex, ClusterProfile};
pub use config::ValidatorConfig;
pub use evaluation::{ClusterMetric, MetricCategory};
pub use persona::{AnalysisSet, PersonaAnalysis, PersonaRole};
pub use report::{compute_report, MetricReport, ReportAssembler};
pub use utilities::{Result, ValidationError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
