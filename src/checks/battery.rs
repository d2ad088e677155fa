// ABOUTME: The fixed battery of workflow policy checks
// ABOUTME: Each check is a pure function over a parsed document with a stable id

use crate::parser::{Job, Workflow};

use super::error::{CheckError, Result};
use super::graph;

pub const EXPECTED_WORKFLOW_NAME: &str = "Django CI";
pub const EXPECTED_RUNNER: &str = "ubuntu-latest";
pub const EXPECTED_BRANCHES: [&str; 2] = ["main", "develop"];
pub const REQUIRED_TOP_LEVEL_KEYS: [&str; 3] = ["name", "on", "jobs"];
pub const REQUIRED_JOBS: [&str; 4] = ["test", "lint", "security", "build"];
pub const REQUIRED_PYTHON_VERSIONS: [&str; 3] = ["3.10", "3.11", "3.12"];
pub const REQUIRED_SECRET_ENV_VARS: [&str; 6] = [
    "SECRET_KEY",
    "DEBUG",
    "EMAIL_HOST_USER",
    "EMAIL_HOST_PASSWORD",
    "GOOGLE_OAUTH_CLIENT_ID",
    "GOOGLE_OAUTH_CLIENT_SECRET",
];
pub const CACHE_ACTION_PREFIX: &str = "actions/cache";
pub const EXPECTED_CACHE_PATH: &str = "~/.cache/pip";

/// A registered policy check: a stable id plus a pure function over the
/// parsed document. Loading and failure isolation live in the runner.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub id: &'static str,
    pub run: fn(&Workflow) -> Result<()>,
}

/// The full battery in execution order.
pub fn all() -> Vec<Check> {
    vec![
        Check {
            id: "workflow_exists",
            run: workflow_exists,
        },
        Check {
            id: "workflow_has_required_keys",
            run: workflow_has_required_keys,
        },
        Check {
            id: "workflow_name",
            run: workflow_name,
        },
        Check {
            id: "workflow_triggers",
            run: workflow_triggers,
        },
        Check {
            id: "workflow_has_concurrency",
            run: workflow_has_concurrency,
        },
        Check {
            id: "workflow_has_all_jobs",
            run: workflow_has_all_jobs,
        },
        Check {
            id: "test_job",
            run: test_job,
        },
        Check {
            id: "lint_job",
            run: lint_job,
        },
        Check {
            id: "security_job",
            run: security_job,
        },
        Check {
            id: "build_job",
            run: build_job,
        },
        Check {
            id: "test_job_has_secret_env_vars",
            run: test_job_has_secret_env_vars,
        },
        Check {
            id: "workflow_caching",
            run: workflow_caching,
        },
        Check {
            id: "job_dependency_graph",
            run: graph::job_dependency_graph,
        },
    ]
}

pub fn workflow_exists(workflow: &Workflow) -> Result<()> {
    if workflow.is_vacant() {
        return Err(CheckError::EmptyDocument);
    }
    Ok(())
}

pub fn workflow_has_required_keys(workflow: &Workflow) -> Result<()> {
    let mut missing = Vec::new();
    if workflow.name.is_none() {
        missing.push("name".to_string());
    }
    if workflow.on.is_none() {
        missing.push("on".to_string());
    }
    if workflow.jobs.is_none() {
        missing.push("jobs".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingRequiredKeys { keys: missing })
    }
}

pub fn workflow_name(workflow: &Workflow) -> Result<()> {
    let name = workflow.name.as_deref().unwrap_or_default();
    if name.trim().is_empty() {
        return Err(CheckError::EmptyName);
    }
    if name != EXPECTED_WORKFLOW_NAME {
        return Err(CheckError::NameMismatch {
            expected: EXPECTED_WORKFLOW_NAME.to_string(),
            actual: name.to_string(),
        });
    }
    Ok(())
}

pub fn workflow_triggers(workflow: &Workflow) -> Result<()> {
    let triggers = workflow.on.as_ref().ok_or(CheckError::MissingTrigger {
        trigger: "push".to_string(),
    })?;

    let expected: Vec<String> = EXPECTED_BRANCHES.iter().map(|b| b.to_string()).collect();

    for (trigger, config) in [("push", &triggers.push), ("pull_request", &triggers.pull_request)] {
        let config = config.as_ref().ok_or_else(|| CheckError::MissingTrigger {
            trigger: trigger.to_string(),
        })?;
        if config.branches != expected {
            return Err(CheckError::BranchMismatch {
                trigger: trigger.to_string(),
                expected: expected.clone(),
                actual: config.branches.clone(),
            });
        }
    }

    Ok(())
}

pub fn workflow_has_concurrency(workflow: &Workflow) -> Result<()> {
    let concurrency = workflow
        .concurrency
        .as_ref()
        .ok_or(CheckError::MissingConcurrency)?;

    if concurrency.group.is_none() {
        return Err(CheckError::MissingConcurrencyGroup);
    }
    if concurrency.cancel_in_progress != Some(true) {
        return Err(CheckError::CancelInProgressDisabled);
    }
    Ok(())
}

pub fn workflow_has_all_jobs(workflow: &Workflow) -> Result<()> {
    let missing: Vec<String> = REQUIRED_JOBS
        .iter()
        .filter(|job| !workflow.has_job(job))
        .map(|job| job.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingJobs { jobs: missing })
    }
}

pub fn test_job(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "test")?;
    require_runner(job, "test")?;

    if job.strategy.as_ref().and_then(|s| s.matrix.as_ref()).is_none() {
        return Err(CheckError::MissingMatrix {
            job: "test".to_string(),
        });
    }

    let versions = job
        .matrix_values("python-version")
        .ok_or_else(|| CheckError::MissingMatrixAxis {
            job: "test".to_string(),
            axis: "python-version".to_string(),
        })?;

    for version in REQUIRED_PYTHON_VERSIONS {
        if !versions.iter().any(|v| v == version) {
            return Err(CheckError::MissingMatrixValue {
                job: "test".to_string(),
                axis: "Python".to_string(),
                value: version.to_string(),
            });
        }
    }

    for needle in ["checkout", "python", "dependencies", "migration", "test"] {
        require_step(job, "test", needle)?;
    }

    Ok(())
}

pub fn lint_job(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "lint")?;
    require_runner(job, "lint")?;

    let needs = job.needs.as_ref().ok_or_else(|| CheckError::MissingDependency {
        job: "lint".to_string(),
    })?;
    if !needs.is_exactly("test") {
        return Err(CheckError::DependencyMismatch {
            job: "lint".to_string(),
            expected: "test".to_string(),
            actual: job.needs_list().iter().map(|d| d.to_string()).collect(),
        });
    }

    for needle in ["black", "isort", "flake8"] {
        require_step(job, "lint", needle)?;
    }

    Ok(())
}

pub fn security_job(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "security")?;
    require_runner(job, "security")?;

    if job.needs.is_none() {
        return Err(CheckError::MissingDependency {
            job: "security".to_string(),
        });
    }

    require_step(job, "security", "bandit")?;
    require_step_any(job, "security", &["safety", "dependencies"])?;

    Ok(())
}

pub fn build_job(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "build")?;
    require_runner(job, "build")?;

    if job.needs.is_none() {
        return Err(CheckError::MissingDependency {
            job: "build".to_string(),
        });
    }

    let condition = job.if_cond.as_deref().ok_or_else(|| CheckError::MissingCondition {
        job: "build".to_string(),
    })?;
    if !condition.contains("main") {
        return Err(CheckError::ConditionMismatch {
            job: "build".to_string(),
            needle: "main".to_string(),
            actual: condition.to_string(),
        });
    }

    require_step(job, "build", "static")?;
    require_step_any(job, "build", &["package", "deploy"])?;
    require_step(job, "build", "artifact")?;

    Ok(())
}

pub fn test_job_has_secret_env_vars(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "test")?;

    if job.env_step_count() == 0 {
        return Err(CheckError::NoEnvSteps {
            job: "test".to_string(),
        });
    }

    let declared = job.env_keys();
    let missing: Vec<String> = REQUIRED_SECRET_ENV_VARS
        .iter()
        .filter(|var| !declared.contains(**var))
        .map(|var| var.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingEnvVars {
            job: "test".to_string(),
            vars: missing,
        })
    }
}

pub fn workflow_caching(workflow: &Workflow) -> Result<()> {
    let job = require_job(workflow, "test")?;

    let cache_steps = job.steps_using(CACHE_ACTION_PREFIX);
    let cache_step = cache_steps.first().ok_or_else(|| CheckError::MissingCacheStep {
        job: "test".to_string(),
        prefix: CACHE_ACTION_PREFIX.to_string(),
    })?;

    let path = cache_step.with_param("path").unwrap_or_default();
    if path != EXPECTED_CACHE_PATH {
        return Err(CheckError::CachePathMismatch {
            expected: EXPECTED_CACHE_PATH.to_string(),
            actual: path,
        });
    }

    Ok(())
}

fn require_job<'a>(workflow: &'a Workflow, job_id: &str) -> Result<&'a Job> {
    workflow.job(job_id).ok_or_else(|| CheckError::UnknownJob {
        job: job_id.to_string(),
    })
}

fn require_runner(job: &Job, job_id: &str) -> Result<()> {
    if job.runs_on.as_deref() != Some(EXPECTED_RUNNER) {
        return Err(CheckError::RunnerMismatch {
            job: job_id.to_string(),
            expected: EXPECTED_RUNNER.to_string(),
        });
    }
    Ok(())
}

fn require_step(job: &Job, job_id: &str, needle: &str) -> Result<()> {
    if !job.has_step_containing(needle) {
        return Err(CheckError::MissingStep {
            job: job_id.to_string(),
            needle: needle.to_string(),
        });
    }
    Ok(())
}

fn require_step_any(job: &Job, job_id: &str, needles: &[&str]) -> Result<()> {
    if !needles.iter().any(|needle| job.has_step_containing(needle)) {
        return Err(CheckError::MissingStepAnyOf {
            job: job_id.to_string(),
            needles: needles.iter().map(|n| n.to_string()).collect(),
        });
    }
    Ok(())
}
