// ABOUTME: Failure-isolating runner for the policy check battery
// ABOUTME: Reloads the document per check so one failure never stops its siblings

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::parser::WorkflowParser;

use super::battery;
use super::report::{BatteryReport, CheckOutcome};

/// Run the full battery against a workflow file.
///
/// The document is re-read and re-parsed for every check; validation is
/// deterministic and idempotent, so the redundancy only costs time. A load
/// failure (missing file, bad YAML, empty document) is recorded as that
/// check's failure, and the remaining checks still run.
pub async fn run_battery<P: AsRef<Path>>(path: P) -> BatteryReport {
    let path = path.as_ref();
    let parser = WorkflowParser::new();
    let started = Instant::now();

    let mut outcomes = Vec::new();
    for check in battery::all() {
        let outcome = match parser.parse_file(path).await {
            Ok(workflow) => match (check.run)(&workflow) {
                Ok(()) => CheckOutcome::pass(check.id),
                Err(violation) => CheckOutcome::fail(check.id, violation.to_string()),
            },
            Err(load_error) => CheckOutcome::fail(check.id, load_error.to_string()),
        };

        debug!(
            check = check.id,
            passed = outcome.passed,
            "check completed"
        );
        outcomes.push(outcome);
    }

    BatteryReport::new(
        path.display().to_string(),
        outcomes,
        started.elapsed().as_millis() as u64,
    )
}
