//! Scorer implementations, one per report section.

pub mod agreement;
pub mod consistency;
pub mod coverage;
pub mod grounding;
pub mod hallucination;

pub use agreement::{AgreementResult, AgreementScorer};
pub use consistency::{ConsistencyResult, ConsistencyScorer, PersonaThreatFlags};
pub use coverage::{CategoryCoverage, CoverageResult, CoverageScorer};
pub use grounding::{
    AbsoluteTolerance, GroundingScore, GroundingScorer, NumberMatcher, GROUNDING_TOLERANCE,
};
pub use hallucination::{HallucinationScorer, HallucinationSection, PortClaims};
