// ABOUTME: Main library module for the flowcheck CI policy checker
// ABOUTME: Exports all core modules and provides the public API

pub mod checks;
pub mod cli;
pub mod parser;

// Re-export commonly used types
pub use checks::{BatteryReport, Check, CheckError, CheckOutcome};
pub use cli::{App, Args, Config};
pub use parser::{Job, Needs, ParserError, Step, Workflow, WorkflowParser};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
