//! Console summary of a [`MetricReport`].
//!
//! Report maps sort their keys; the summary lists threat terms, feature
//! categories and themes in keyword-table order instead.

use std::fmt;

use super::MetricReport;
use crate::evaluation::taxonomy::{FEATURE_CATEGORIES, THEMES, THREAT_TERMS};
use crate::evaluation::MetricCategory;

/// Fidelity at or above which a persona is marked as well grounded.
const FIDELITY_PASS: f64 = 80.0;
/// Agreement at or above which a theme is marked as shared.
const AGREEMENT_PASS: f64 = 0.75;
/// Agreement at or above which a theme is marked as partially shared.
const AGREEMENT_WARN: f64 = 0.5;

const RULE_WIDTH: usize = 70;

fn fidelity_mark(fidelity: f64) -> &'static str {
    if fidelity >= FIDELITY_PASS {
        "✅"
    } else {
        "⚠️"
    }
}

fn agreement_mark(score: f64) -> &'static str {
    if score >= AGREEMENT_PASS {
        "✅"
    } else if score >= AGREEMENT_WARN {
        "⚠️"
    } else {
        "❌"
    }
}

fn heading(f: &mut fmt::Formatter<'_>, index: usize, category: MetricCategory) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "METRIC {}: {}", index, category.title().to_uppercase())?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "LLM OUTPUT METRICS VALIDATION REPORT")?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;

        writeln!(f, "DATASET OVERVIEW")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "Total Clusters Analyzed:     {}", self.metadata.total_clusters)?;
        writeln!(f, "Clusters With Baseline:      {}", self.metadata.evaluated_clusters)?;
        writeln!(f, "Total Personas:              {}", self.metadata.total_personas)?;
        writeln!(f, "Total Analyses Generated:    {}", self.metadata.total_analyses)?;
        if !self.metadata.skipped_clusters.is_empty() {
            writeln!(
                f,
                "Skipped (no baseline):       {}",
                self.metadata.skipped_clusters.join(", ")
            )?;
        }

        heading(f, 1, MetricCategory::GroundingFidelity)?;
        for (cluster, personas) in &self.grounding {
            writeln!(f, "\n{}:", cluster)?;
            for (persona, score) in personas {
                writeln!(
                    f,
                    "  {} {:<25}: {:6.1}% ({}/{})",
                    fidelity_mark(score.fidelity),
                    persona,
                    score.fidelity,
                    score.grounded_count,
                    score.total_count
                )?;
            }
        }
        if let Some(avg) = self.average_fidelity() {
            writeln!(f, "\n  AVERAGE FIDELITY: {:.1}%", avg)?;
        }

        heading(f, 2, MetricCategory::HallucinationDetection)?;
        writeln!(
            f,
            "Status: {} - not computed, reports {} hallucinations",
            self.hallucination.status.to_uppercase(),
            self.hallucination.hallucinations_detected
        )?;
        writeln!(f, "Note: {}", self.hallucination.note)?;
        writeln!(
            f,
            "Advisory: {} port claim(s) not present in baseline port distributions",
            self.hallucination.advisory_count()
        )?;

        heading(f, 3, MetricCategory::SemanticConsistency)?;
        for (cluster, consistency) in &self.consistency {
            writeln!(f, "\n{}:", cluster)?;
            writeln!(
                f,
                "  C2 Consensus (all personas):       {:.0}%",
                consistency.c2_consensus * 100.0
            )?;
            writeln!(f, "  Threat Type Mentions:")?;
            for term in THREAT_TERMS {
                match consistency.threat_mentions.get(term.name) {
                    Some(&count) if count > 0 => {
                        writeln!(f, "    - {:<20}: {:2} mentions", term.name, count)?;
                    }
                    _ => {}
                }
            }
        }

        heading(f, 4, MetricCategory::FeatureCoverage)?;
        for (cluster, coverage) in &self.coverage {
            writeln!(f, "\n{}:", cluster)?;
            for category in FEATURE_CATEGORIES {
                let Some(data) = coverage.categories.get(category.name) else {
                    continue;
                };
                if data.mentions > 0 {
                    let pct = coverage.share(category.name).unwrap_or(0.0);
                    writeln!(
                        f,
                        "  {:<15}: {:3} mentions ({:5.1}%)",
                        category.name, data.mentions, pct
                    )?;
                }
            }
        }

        heading(f, 5, MetricCategory::InterPersonaAgreement)?;
        for (cluster, agreement) in &self.agreement {
            writeln!(f, "\n{}:", cluster)?;
            for theme in THEMES {
                let Some(&score) = agreement.theme_agreement.get(theme.name) else {
                    continue;
                };
                writeln!(
                    f,
                    "  {} {:<15}: {:5.0}% personas (personas that mention it)",
                    agreement_mark(score),
                    theme.name,
                    score * 100.0
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", rule)
    }
}
