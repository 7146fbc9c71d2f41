//! Inter-persona agreement on analytical themes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::ClusterProfile;
use crate::evaluation::taxonomy::{KeywordGroup, THEMES};
use crate::evaluation::text::contains_any;
use crate::evaluation::{present_ratio, role_ratio, ClusterMetric, MetricCategory};
use crate::persona::{PersonaAnalysis, PersonaRole};

/// Agreement result for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementResult {
    /// Persona -> theme -> exhibited.
    pub themes: BTreeMap<PersonaRole, BTreeMap<&'static str, bool>>,
    /// Theme -> personas exhibiting it, over the fixed role count.
    pub theme_agreement: BTreeMap<&'static str, f64>,
    /// Theme -> personas exhibiting it, over the personas present.
    pub theme_agreement_present: BTreeMap<&'static str, f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct AgreementScorer {
    themes: &'static [KeywordGroup],
}

impl AgreementScorer {
    pub fn new() -> Self {
        Self { themes: THEMES }
    }
}

impl Default for AgreementScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterMetric for AgreementScorer {
    type Output = AgreementResult;

    fn metric_category(&self) -> MetricCategory {
        MetricCategory::InterPersonaAgreement
    }

    fn score(&self, _profile: &ClusterProfile, analysis: &PersonaAnalysis) -> AgreementResult {
        let themes: BTreeMap<PersonaRole, BTreeMap<&'static str, bool>> = analysis
            .folded()
            .into_iter()
            .map(|(role, text)| {
                let flags = self
                    .themes
                    .iter()
                    .map(|theme| (theme.name, contains_any(&text, theme.keywords)))
                    .collect();
                (role, flags)
            })
            .collect();

        let present = themes.len();
        let mut theme_agreement = BTreeMap::new();
        let mut theme_agreement_present = BTreeMap::new();
        for theme in self.themes {
            let hits = themes
                .values()
                .filter(|flags| flags.get(theme.name).copied().unwrap_or(false))
                .count();
            theme_agreement.insert(theme.name, role_ratio(hits));
            theme_agreement_present.insert(theme.name, present_ratio(hits, present));
        }

        AgreementResult {
            themes,
            theme_agreement,
            theme_agreement_present,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::tests::sample_profile;

    fn run(analysis: &PersonaAnalysis) -> AgreementResult {
        AgreementScorer::new().score(&sample_profile(), analysis)
    }

    #[test]
    fn test_any_keyword_marks_theme() {
        let analysis = PersonaAnalysis::new()
            .with(PersonaRole::PenetrationTester, "We should BLOCK this exploit.")
            .with(PersonaRole::DataAnalyst, "Latency is normal.");
        let result = run(&analysis);
        let pen = &result.themes[&PersonaRole::PenetrationTester];
        assert!(pen["actionable"]);
        assert!(pen["threat"]);
        assert!(!pen["technical"]);
        assert!(!pen["defensive"]);
        let analyst = &result.themes[&PersonaRole::DataAnalyst];
        assert!(analyst["technical"]);
        assert!(!analyst["threat"]);
    }

    #[test]
    fn test_agreement_over_fixed_and_present_counts() {
        let analysis = PersonaAnalysis::new()
            .with(PersonaRole::PenetrationTester, "attack detection")
            .with(PersonaRole::SecurityResearcher, "malware")
            .with(PersonaRole::SecurityOpsEngineer, "monitor bandwidth");
        let result = run(&analysis);
        assert_eq!(result.theme_agreement["threat"], 0.5);
        assert_eq!(result.theme_agreement_present["threat"], 2.0 / 3.0);
        assert_eq!(result.theme_agreement["defensive"], 0.25);
        assert_eq!(result.theme_agreement["technical"], 0.25);
        assert_eq!(result.theme_agreement["actionable"], 0.25);
    }

    #[test]
    fn test_ratios_are_quarter_steps_with_four_personas() {
        let mut analysis = PersonaAnalysis::new();
        let texts = ["packets", "threat", "recommend", "nothing relevant"];
        for (role, text) in PersonaRole::ALL.into_iter().zip(texts) {
            analysis.insert(role, text);
        }
        let result = run(&analysis);
        for ratio in result.theme_agreement.values() {
            assert!((0.0..=1.0).contains(ratio));
            assert_eq!((ratio * 4.0).fract(), 0.0);
        }
        assert_eq!(result.theme_agreement["defensive"], 0.0);
    }

    #[test]
    fn test_empty_cluster_scores_zero() {
        let result = run(&PersonaAnalysis::new());
        assert!(result.themes.is_empty());
        assert!(result.theme_agreement.values().all(|r| *r == 0.0));
        assert!(result.theme_agreement_present.values().all(|r| *r == 0.0));
    }
}
