// ABOUTME: Job dependency graph validation for workflow documents
// ABOUTME: Checks that every needs reference resolves and the graph is acyclic

use petgraph::algo::toposort;
use petgraph::graph::NodeIndex;
use petgraph::Graph;
use std::collections::HashMap;

use crate::parser::Workflow;

use super::error::{CheckError, Result};

/// Validate the `needs` references across all jobs: each must point at a
/// declared job, and the resulting graph must have a topological order.
pub fn job_dependency_graph(workflow: &Workflow) -> Result<()> {
    let jobs = match &workflow.jobs {
        Some(jobs) => jobs,
        None => return Ok(()),
    };

    for (job_id, job) in jobs {
        for dep in job.needs_list() {
            if !workflow.has_job(dep) {
                return Err(CheckError::UnknownDependency {
                    job: job_id.clone(),
                    dependency: dep.to_string(),
                });
            }
        }
    }

    let mut graph = Graph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    for job_id in jobs.keys() {
        let node = graph.add_node(job_id.clone());
        nodes.insert(job_id.as_str(), node);
    }

    for (job_id, job) in jobs {
        let job_node = nodes[job_id.as_str()];
        for dep in job.needs_list() {
            if let Some(&dep_node) = nodes.get(dep) {
                graph.add_edge(dep_node, job_node, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(_) => Ok(()),
        Err(cycle) => Err(CheckError::CircularDependency {
            jobs: vec![graph[cycle.node_id()].clone()],
        }),
    }
}
