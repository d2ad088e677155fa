// ABOUTME: Error types for workflow document loading and parsing
// ABOUTME: Defines specific error types for parser module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to read workflow file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Workflow file is empty or contains no document")]
    EmptyDocument,

    #[error("Invalid workflow format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;
