use crate::error::{Error, Result};
use crate::priority::PriorityMethod;
use crate::types::Cores;
use std::time::Duration;

/// Settings a [`JobQueue`](crate::JobQueue) is spawned with.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Total number of cores shared by all running jobs.
    pub cores: Cores,
    /// How often pending jobs are reconsidered without any other trigger.
    pub interval: Duration,
    pub priority: PriorityMethod,
    /// Run commands through `sh -c` instead of splitting them on whitespace.
    pub use_shell: bool,
}

impl QueueConfig {
    pub fn new(cores: Cores) -> Self {
        Self {
            cores,
            interval: Duration::from_secs(30),
            priority: PriorityMethod::Fifo,
            use_shell: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cores == 0 {
            return Err(Error::NoCores);
        }
        if self.interval.is_zero() {
            return Err(Error::InvalidInterval(self.interval));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = QueueConfig::new(4);
        assert_eq!(config.interval, Duration::from_secs(30));
        assert_eq!(config.priority, PriorityMethod::Fifo);
        assert!(config.use_shell);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_budget_and_zero_interval() {
        assert!(matches!(QueueConfig::new(0).validate(), Err(Error::NoCores)));

        let mut config = QueueConfig::new(2);
        config.interval = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::InvalidInterval(_))));
    }
}
