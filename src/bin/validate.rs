//! Metric validation binary.
//!
//! Loads the persona analyses and baseline profiles, computes the report,
//! writes it as JSON and prints a summary to stdout.
//!
//! # Environment Variables
//!
//! - `ANALYSIS_PATH` - persona analyses (default: `llm_multi_persona_analysis.json`)
//! - `BASELINE_PATH` - cluster profiles (default: `cluster_profiles.json`)
//! - `REPORT_PATH` - output report (default: `METRICS_VALIDATION_REPORT.json`)
//! - `REPORT_DATE` - date stamped into the report metadata (default: today)
//! - `VALIDATOR_CONFIG` - optional YAML file with the same keys, lower precedence
//! - `RUST_LOG` - tracing filter (default: "info,persona_validation=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin validate
//! ```

use anyhow::Context;

use persona_validation::{compute_report, loader, ValidatorConfig};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the summary.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,persona_validation=debug".into()),
        )
        .init();

    let config = ValidatorConfig::from_env().context("Failed to resolve configuration")?;
    tracing::debug!(?config, "configuration resolved");

    let baseline = loader::load_baseline_index(&config.baseline_path)
        .with_context(|| format!("Failed to load baseline {}", config.baseline_path.display()))?;
    let analyses = loader::load_analyses(&config.analysis_path).with_context(|| {
        format!(
            "Failed to load persona analyses {}",
            config.analysis_path.display()
        )
    })?;

    let report = compute_report(&baseline, &analyses, config.report_date.clone());
    if !report.metadata.skipped_clusters.is_empty() {
        tracing::warn!(
            skipped = report.metadata.skipped_clusters.len(),
            "some clusters had no baseline profile"
        );
    }

    let written = loader::write_report(&config.report_path, &report)
        .with_context(|| format!("Failed to write report {}", config.report_path.display()))?;

    println!("{}", report);
    println!("Report saved to: {}", written.display());
    Ok(())
}
