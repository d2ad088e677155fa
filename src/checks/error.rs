// ABOUTME: Error types for workflow policy checks
// ABOUTME: One variant per violation class, each carrying the data for its message

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Workflow file is empty or invalid YAML")]
    EmptyDocument,

    #[error("Workflow missing required keys: {keys:?}")]
    MissingRequiredKeys { keys: Vec<String> },

    #[error("Workflow name is empty")]
    EmptyName,

    #[error("Expected '{expected}', got '{actual}'")]
    NameMismatch { expected: String, actual: String },

    #[error("Workflow missing '{trigger}' trigger")]
    MissingTrigger { trigger: String },

    #[error("'{trigger}' branches should be {expected:?}, got {actual:?}")]
    BranchMismatch {
        trigger: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Workflow missing concurrency settings")]
    MissingConcurrency,

    #[error("Concurrency missing group configuration")]
    MissingConcurrencyGroup,

    #[error("Concurrency should cancel in-progress jobs")]
    CancelInProgressDisabled,

    #[error("Workflow missing jobs: {jobs:?}")]
    MissingJobs { jobs: Vec<String> },

    #[error("Job '{job}' is not defined")]
    UnknownJob { job: String },

    #[error("Job '{job}' should run on '{expected}'")]
    RunnerMismatch { job: String, expected: String },

    #[error("Job '{job}' missing strategy matrix")]
    MissingMatrix { job: String },

    #[error("Job '{job}' matrix missing '{axis}' axis")]
    MissingMatrixAxis { job: String, axis: String },

    #[error("Job '{job}' matrix should include {axis} {value}")]
    MissingMatrixValue {
        job: String,
        axis: String,
        value: String,
    },

    #[error("Job '{job}' missing a step named like '{needle}'")]
    MissingStep { job: String, needle: String },

    #[error("Job '{job}' missing a step named like any of {needles:?}")]
    MissingStepAnyOf { job: String, needles: Vec<String> },

    #[error("Job '{job}' should declare a dependency")]
    MissingDependency { job: String },

    #[error("Job '{job}' should depend on '{expected}', got {actual:?}")]
    DependencyMismatch {
        job: String,
        expected: String,
        actual: Vec<String>,
    },

    #[error("Job '{job}' missing 'if' condition")]
    MissingCondition { job: String },

    #[error("Job '{job}' condition should reference '{needle}', got '{actual}'")]
    ConditionMismatch {
        job: String,
        needle: String,
        actual: String,
    },

    #[error("Job '{job}' should have steps with environment variables")]
    NoEnvSteps { job: String },

    #[error("Missing required environment variables: {vars:?}")]
    MissingEnvVars { job: String, vars: Vec<String> },

    #[error("Job '{job}' should use a '{prefix}' caching step")]
    MissingCacheStep { job: String, prefix: String },

    #[error("Cache path should be '{expected}', got '{actual}'")]
    CachePathMismatch { expected: String, actual: String },

    #[error("Job '{job}' depends on unknown job '{dependency}'")]
    UnknownDependency { job: String, dependency: String },

    #[error("Circular dependency detected in jobs: {jobs:?}")]
    CircularDependency { jobs: Vec<String> },
}

pub type Result<T> = std::result::Result<T, CheckError>;
