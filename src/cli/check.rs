use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::checks::CheckRunner;
use crate::config::Config;
use crate::llm::factory;
use crate::report::Severity;
use crate::store::WorldSnapshot;

/// Run the full check pipeline over a snapshot file.
///
/// Returns whether the run passed (no high or critical issues), so the
/// caller can map it to a process exit status.
pub async fn run(
    snapshot_path: String,
    output: Option<String>,
    config_path: Option<String>,
    provider_override: Option<String>,
    model_override: Option<String>,
    base_url_override: Option<String>,
    dry_run: bool,
) -> Result<bool> {
    info!("Snapshot: {}", snapshot_path);
    if let Some(ref cfg) = config_path {
        info!("Config: {}", cfg);
    }
    info!("Dry run: {}", dry_run);

    // Load config (explicit path, repo root, or user config dir)
    let mut config = Config::load_with_path(config_path)?;

    // Apply CLI overrides
    if let Some(ref provider) = provider_override {
        info!("CLI override: provider = {}", provider);
        config.llm.provider = provider.clone();
    }
    if let Some(ref model) = model_override {
        info!("CLI override: model = {}", model);
        config.llm.model = model.clone();
    }
    if let Some(ref base_url) = base_url_override {
        info!("CLI override: base_url = {}", base_url);
        config.llm.base_url = Some(base_url.clone());
    }

    // Create the oracle client first: a missing credential must fail the
    // run before any check starts.
    let oracle = factory::create_client(&config, dry_run)?;
    if dry_run {
        info!("Using stub oracle");
    } else {
        info!("Using {} LLM provider", config.llm.provider);
    }

    let snapshot = WorldSnapshot::load(Path::new(&snapshot_path))
        .with_context(|| format!("failed to load snapshot from {}", snapshot_path))?;

    let runner = CheckRunner::new(oracle.as_ref());
    let report = runner.run(&snapshot).await;

    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(ref path) => {
            fs::write(path, &json)
                .with_context(|| format!("failed to write report to {}", path))?;
            info!("✓ Report written to {}", path);
        }
        None => println!("{}", json),
    }

    print_summary(&report);
    Ok(report.passed())
}

fn print_summary(report: &crate::report::Report) {
    if report.issues.is_empty() {
        println!("\n✓ No consistency issues found");
        return;
    }

    println!("\n⚠ Found {} issue(s):", report.total_issues);
    for severity in Severity::ALL.iter().rev() {
        let count = report.by_severity.get(severity).copied().unwrap_or(0);
        if count > 0 {
            println!("  {}: {}", severity, count);
        }
    }
    for (i, issue) in report.issues.iter().enumerate() {
        println!(
            "  {}. [{}][{}] {}",
            i + 1,
            issue.severity,
            issue.category,
            issue.title
        );
    }
    if !report.passed() {
        println!("\nHigh or critical issues present, failing the run.");
    }
}
