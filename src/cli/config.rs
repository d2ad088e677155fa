// ABOUTME: Configuration management for the flowcheck application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/django.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workflow: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;
            config.merge_env();
            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = vec![
            PathBuf::from("flowcheck.yaml"),
            PathBuf::from("flowcheck.yml"),
            PathBuf::from(".flowcheck.yaml"),
            PathBuf::from(".flowcheck.yml"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".flowcheck").join("config.yaml");
            if home_config.exists() {
                return home_config;
            }
        }

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        PathBuf::from("flowcheck.yaml")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(workflow) = std::env::var("FLOWCHECK_WORKFLOW") {
            self.workflow = Some(PathBuf::from(workflow));
        }
        if let Ok(level) = std::env::var("FLOWCHECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FLOWCHECK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Resolve the workflow path from CLI argument, config, or the default
    pub fn workflow_path(&self, cli_path: Option<PathBuf>) -> PathBuf {
        cli_path
            .or_else(|| self.workflow.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKFLOW_PATH))
    }
}
