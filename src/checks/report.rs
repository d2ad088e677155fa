// ABOUTME: Battery outcome types and report aggregation
// ABOUTME: Defines per-check outcomes and the summarized battery report

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub id: String,
    pub passed: bool,
    /// Failure message; `None` for a passing check.
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatteryReport {
    pub workflow_path: String,
    pub outcomes: Vec<CheckOutcome>,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl CheckOutcome {
    pub fn pass(id: &str) -> Self {
        Self {
            id: id.to_string(),
            passed: true,
            message: None,
        }
    }

    pub fn fail(id: &str, message: String) -> Self {
        Self {
            id: id.to_string(),
            passed: false,
            message: Some(message),
        }
    }
}

impl BatteryReport {
    pub fn new(workflow_path: String, outcomes: Vec<CheckOutcome>, duration_ms: u64) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed = outcomes.len() - passed;
        Self {
            workflow_path,
            outcomes,
            passed,
            failed,
            duration_ms,
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
