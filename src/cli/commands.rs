// ABOUTME: Command implementations for the flowcheck CLI
// ABOUTME: Handles execution of check, validate, and list commands

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::args::ReportFormat;
use super::config::Config;
use crate::checks::{battery, runner, BatteryReport};
use crate::parser::WorkflowParser;

/// Run the full check battery and report per-check outcomes
pub async fn run_checks(
    workflow_path: PathBuf,
    format: ReportFormat,
    _config: &Config,
) -> Result<()> {
    info!("Running check battery against: {}", workflow_path.display());

    let report = runner::run_battery(&workflow_path).await;

    match format {
        ReportFormat::Text => print_text_report(&report),
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("Failed to serialize report to JSON: {}", e))?;
            println!("{}", json);
        }
    }

    info!(
        passed = report.passed,
        failed = report.failed,
        "check battery completed"
    );

    // Return error if any check failed to ensure proper exit code
    if report.all_passed() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("{} check(s) failed", report.failed))
    }
}

fn print_text_report(report: &BatteryReport) {
    for outcome in &report.outcomes {
        if outcome.passed {
            println!("✓ {}", outcome.id);
        } else {
            let message = outcome.message.as_deref().unwrap_or("check failed");
            println!("✗ {}: {}", outcome.id, message);
        }
    }

    println!();
    if report.all_passed() {
        println!("All {} checks passed!", report.total());
    } else {
        println!("{} check(s) failed", report.failed);
    }
}

/// Parse a workflow file and print a document summary
pub async fn validate_workflow(workflow_path: PathBuf, _config: &Config) -> Result<()> {
    info!("Parsing workflow: {}", workflow_path.display());

    let parser = WorkflowParser::new();
    let workflow = parser
        .parse_file(&workflow_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to parse workflow: {}", e))?;

    let job_ids = workflow.job_ids();
    let step_count: usize = job_ids
        .iter()
        .filter_map(|id| workflow.job(id))
        .map(|job| job.steps.len())
        .sum();

    println!(
        "✓ Workflow '{}' parsed",
        workflow.name.as_deref().unwrap_or("<unnamed>")
    );
    println!("  Jobs: {}", job_ids.len());
    println!("  Steps: {}", step_count);

    info!("Workflow parsed successfully");

    Ok(())
}

/// Print the registered checks in execution order
pub fn list_checks() -> Result<()> {
    for check in battery::all() {
        println!("{}", check.id);
    }
    Ok(())
}
