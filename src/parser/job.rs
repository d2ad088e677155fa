// ABOUTME: Job, step, and strategy structures for workflow documents
// ABOUTME: Defines the per-job configuration types and their accessors

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashSet;

/// A single job definition. Every field the policy battery inspects is
/// optional: the document is untrusted input, and a missing field must be
/// reported by a check rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "runs-on")]
    pub runs_on: Option<String>,
    pub strategy: Option<Strategy>,
    pub needs: Option<Needs>,
    #[serde(rename = "if")]
    pub if_cond: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub matrix: Option<IndexMap<String, Value>>,
}

/// Job dependencies, either a single job id or a list of them. Both forms
/// appear in real documents and the distinction is significant: some policies
/// require exactly one named dependency, others only that one is declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Needs {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: Option<String>,
    pub uses: Option<String>,
    pub run: Option<String>,
    #[serde(rename = "if")]
    pub if_cond: Option<String>,
    pub with: Option<IndexMap<String, Value>>,
    pub env: Option<IndexMap<String, Value>>,
}

impl Job {
    /// Names of all steps that declare a `name`. Unnamed steps are skipped.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| step.name.as_deref())
            .collect()
    }

    /// Case-insensitive substring search over the declared step names.
    pub fn has_step_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.step_names()
            .iter()
            .any(|name| name.to_lowercase().contains(&needle))
    }

    /// Union of the env variable names declared across all steps. Variables
    /// may be split across steps, so callers get the merged key set.
    pub fn env_keys(&self) -> HashSet<&str> {
        self.steps
            .iter()
            .filter_map(|step| step.env.as_ref())
            .flat_map(|env| env.keys().map(String::as_str))
            .collect()
    }

    /// Number of steps that carry an `env` mapping.
    pub fn env_step_count(&self) -> usize {
        self.steps.iter().filter(|step| step.env.is_some()).count()
    }

    /// Scalar values of a matrix axis, stringified. Returns `None` when the
    /// job has no matrix or the axis is missing or not a sequence.
    pub fn matrix_values(&self, axis: &str) -> Option<Vec<String>> {
        let matrix = self.strategy.as_ref()?.matrix.as_ref()?;
        let values = matrix.get(axis)?.as_sequence()?;
        Some(values.iter().filter_map(scalar_to_string).collect())
    }

    /// Steps whose `uses` reference starts with the given action prefix.
    pub fn steps_using(&self, prefix: &str) -> Vec<&Step> {
        self.steps
            .iter()
            .filter(|step| {
                step.uses
                    .as_deref()
                    .map(|uses| uses.starts_with(prefix))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Declared dependencies as a flat list, regardless of the `needs` form.
    pub fn needs_list(&self) -> Vec<&str> {
        match &self.needs {
            Some(Needs::One(dep)) => vec![dep.as_str()],
            Some(Needs::Many(deps)) => deps.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }
}

impl Needs {
    /// True only for the single-string form naming exactly this job.
    pub fn is_exactly(&self, job_id: &str) -> bool {
        matches!(self, Needs::One(dep) if dep == job_id)
    }
}

impl Step {
    /// String value of a `with` parameter, if present and scalar.
    pub fn with_param(&self, key: &str) -> Option<String> {
        self.with.as_ref()?.get(key).and_then(scalar_to_string)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
