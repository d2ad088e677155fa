// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for flowcheck

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowcheck")]
#[command(about = "Structural policy checks for CI workflow definitions")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full check battery against a workflow file
    Check {
        #[arg(help = "Path to workflow YAML file (defaults to the configured workflow)")]
        workflow: Option<PathBuf>,

        #[arg(
            short,
            long,
            value_enum,
            default_value = "text",
            help = "Report output format"
        )]
        format: ReportFormat,
    },

    /// Parse a workflow file and print a document summary without policy checks
    Validate {
        #[arg(help = "Path to workflow YAML file (defaults to the configured workflow)")]
        workflow: Option<PathBuf>,
    },

    /// List the registered checks in execution order
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
