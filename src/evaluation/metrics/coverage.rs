//! Feature coverage: which data features the personas talk about.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::ClusterProfile;
use crate::evaluation::taxonomy::{KeywordGroup, FEATURE_CATEGORIES};
use crate::evaluation::text::count_all;
use crate::evaluation::{ClusterMetric, MetricCategory};
use crate::persona::PersonaAnalysis;

/// Mentions of one feature category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCoverage {
    pub keywords: Vec<&'static str>,
    pub mentions: usize,
}

/// Coverage result for one cluster.
///
/// Counts are raw and only comparable with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageResult {
    pub categories: BTreeMap<&'static str, CategoryCoverage>,
    /// Sum of every category's mentions.
    pub total_mentions: usize,
}

impl CoverageResult {
    /// Share of all mentions falling in `category`, in percent.
    ///
    /// `None` for an unknown category; 0 when nothing was mentioned at all.
    pub fn share(&self, category: &str) -> Option<f64> {
        let coverage = self.categories.get(category)?;
        if self.total_mentions == 0 {
            return Some(0.0);
        }
        Some(coverage.mentions as f64 / self.total_mentions as f64 * 100.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoverageScorer {
    categories: &'static [KeywordGroup],
}

impl CoverageScorer {
    pub fn new() -> Self {
        Self {
            categories: FEATURE_CATEGORIES,
        }
    }
}

impl Default for CoverageScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterMetric for CoverageScorer {
    type Output = CoverageResult;

    fn metric_category(&self) -> MetricCategory {
        MetricCategory::FeatureCoverage
    }

    fn score(&self, _profile: &ClusterProfile, analysis: &PersonaAnalysis) -> CoverageResult {
        let combined = analysis.combined_folded();
        let categories: BTreeMap<&'static str, CategoryCoverage> = self
            .categories
            .iter()
            .map(|group| {
                let coverage = CategoryCoverage {
                    keywords: group.keywords.to_vec(),
                    mentions: count_all(&combined, group.keywords),
                };
                (group.name, coverage)
            })
            .collect();
        let total_mentions = categories.values().map(|c| c.mentions).sum();
        CoverageResult {
            categories,
            total_mentions,
        }
    }
}
