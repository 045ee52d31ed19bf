use joblib::{types::Cores, PriorityMethod, QueueConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use std::{fs, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] io::Error),
    #[error("Config file is not valid yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid job queue settings: {0}")]
    Queue(#[from] joblib::error::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    // cores shared by every job the runner starts
    pub cores: Cores,
    // dsmc warnings that do not fail a job
    #[serde(default)]
    pub whitelisted_warnings: Vec<String>,
    // seconds between queue polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    #[serde(default = "default_priority_method")]
    pub priority_method: String,
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Parse and check a config, so a bad file fails before any job queue exists.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.queue_config()?.validate()?;
        Ok(config)
    }

    pub fn whitelist(&self) -> HashSet<String> {
        self.whitelisted_warnings.iter().cloned().collect()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn priority(&self) -> Result<PriorityMethod, ConfigError> {
        Ok(self.priority_method.parse()?)
    }

    pub fn queue_config(&self) -> Result<QueueConfig, ConfigError> {
        Ok(QueueConfig {
            cores: self.cores,
            interval: self.interval(),
            priority: self.priority()?,
            use_shell: true,
        })
    }
}

fn default_poll_interval() -> u64 {
    30
}

fn default_priority_method() -> String {
    PriorityMethod::Fifo.to_string()
}
