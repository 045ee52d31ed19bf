use crate::adapter::JobRunnerAdapter;
use crate::config::{ConfigError, RunnerConfig};
use crate::dsmc;
use crate::state::State;
use async_trait::async_trait;
use joblib::types::{Cores, JobId};
use joblib::{error, JobQueue, PriorityMethod, QueueConfig, Status};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{instrument, warn};

const MESSAGE_CAPACITY: usize = 64;

/// Runs jobs on this node through a [`JobQueue`].
pub struct LocalQueueAdapter {
    cores: Cores,
    whitelisted_warnings: HashSet<String>,
    queue: JobQueue,
}

impl LocalQueueAdapter {
    /// Spawn the backing queue. Must be called from within a tokio runtime.
    pub fn new(
        cores: Cores,
        whitelisted_warnings: HashSet<String>,
        interval: Duration,
        priority: PriorityMethod,
    ) -> error::Result<Self> {
        let config = QueueConfig {
            cores,
            interval,
            priority,
            use_shell: true,
        };
        let queue = JobQueue::spawn(config, MESSAGE_CAPACITY)?;
        Ok(Self {
            cores,
            whitelisted_warnings,
            queue,
        })
    }

    pub fn from_config(config: &RunnerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.cores,
            config.whitelist(),
            config.interval(),
            config.priority()?,
        )?)
    }

    pub fn cores(&self) -> Cores {
        self.cores
    }

    pub fn whitelisted_warnings(&self) -> &HashSet<String> {
        &self.whitelisted_warnings
    }
}

#[async_trait]
impl JobRunnerAdapter for LocalQueueAdapter {
    #[instrument(skip(self))]
    async fn start(
        &self,
        cmd: &str,
        cores: Cores,
        run_dir: &Path,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
    ) -> Option<JobId> {
        match self.queue.add(cmd, cores, run_dir, stdout, stderr).await {
            Ok(job_id) => Some(job_id),
            Err(e) => {
                warn!("failed to start job: {}", e);
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn stop(&self, job_id: JobId) -> Option<JobId> {
        self.queue
            .stop_job_with_id(job_id)
            .await
            .unwrap_or_else(|e| {
                warn!("failed to stop job: {}", e);
                None
            })
    }

    #[instrument(skip(self))]
    async fn stop_all(&self) {
        if let Err(e) = self.queue.stop_all_jobs().await {
            warn!("failed to stop jobs: {}", e);
        }
    }

    #[instrument(skip(self))]
    async fn status(&self, job_id: JobId) -> State {
        // status and return code must come from one snapshot, the job may exit between two requests
        let job = match self.queue.get_job_with_id(job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => return State::from_status(Status::NotFound),
            Err(e) => {
                warn!("failed to query job status: {}", e);
                return State::None;
            }
        };

        let state = State::from_status(job.status);
        // can't be sure this only ever catches dsmc jobs, but the command is all there is to go on
        if state == State::Error && dsmc::is_dsmc_job(&job.cmd) {
            dsmc::reinterpret(&job, &self.whitelisted_warnings).await
        } else {
            state
        }
    }

    // TODO: rewrite dsmc warning exits here the same way `status` does once callers agree on it.
    #[instrument(skip(self))]
    async fn status_all(&self) -> HashMap<JobId, State> {
        match self.queue.get_status_all().await {
            Ok(all) => all
                .into_iter()
                .map(|(job_id, status)| (job_id, State::from_status(status)))
                .collect(),
            Err(e) => {
                warn!("failed to query job statuses: {}", e);
                HashMap::new()
            }
        }
    }
}
