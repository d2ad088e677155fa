// ABOUTME: Core workflow document structures and parsing functionality
// ABOUTME: Defines the top-level Workflow struct, triggers, and concurrency types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use super::error::{ParserError, Result};
use super::job::Job;
use tokio::fs;

/// Parsed workflow document. Top-level keys are optional so that a malformed
/// document still deserializes and each policy check can report exactly which
/// expectation it violates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: Option<String>,
    pub on: Option<Triggers>,
    pub concurrency: Option<Concurrency>,
    pub jobs: Option<IndexMap<String, Job>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Triggers {
    pub push: Option<TriggerConfig>,
    pub pull_request: Option<TriggerConfig>,
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TriggerConfig {
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concurrency {
    pub group: Option<String>,
    #[serde(rename = "cancel-in-progress")]
    pub cancel_in_progress: Option<bool>,
}

impl Workflow {
    /// Parse a workflow document from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ParserError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse a workflow document from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(ParserError::YamlError)?;
        if value.is_null() {
            return Err(ParserError::EmptyDocument);
        }

        let workflow: Workflow = serde_yaml::from_value(value).map_err(ParserError::YamlError)?;
        Ok(workflow)
    }

    /// Get all job ids in document order
    pub fn job_ids(&self) -> Vec<String> {
        self.jobs
            .as_ref()
            .map(|jobs| jobs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Get a job definition by id
    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.as_ref()?.get(job_id)
    }

    /// Check whether a job is declared in the document
    pub fn has_job(&self, job_id: &str) -> bool {
        self.jobs
            .as_ref()
            .map(|jobs| jobs.contains_key(job_id))
            .unwrap_or(false)
    }

    /// True when the document carries none of the top-level workflow keys
    pub fn is_vacant(&self) -> bool {
        self.name.is_none()
            && self.on.is_none()
            && self.concurrency.is_none()
            && self.jobs.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowParser;

impl WorkflowParser {
    pub fn new() -> Self {
        Self
    }

    pub async fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Workflow> {
        let content = fs::read_to_string(path.as_ref())
            .await
            .map_err(ParserError::IoError)?;
        self.parse_string(&content)
    }

    pub fn parse_string(&self, content: &str) -> Result<Workflow> {
        Workflow::from_yaml(content)
    }
}

impl Default for WorkflowParser {
    fn default() -> Self {
        Self::new()
    }
}
