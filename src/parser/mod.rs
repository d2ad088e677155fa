// ABOUTME: Parser module for YAML workflow documents
// ABOUTME: Exports workflow parsing and data structures

pub mod error;
pub mod job;
pub mod workflow;

pub use error::ParserError;
pub use job::{Job, Needs, Step, Strategy};
pub use workflow::{Concurrency, TriggerConfig, Triggers, Workflow, WorkflowParser};
