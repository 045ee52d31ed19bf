mod actor;
mod messages;

use self::{
    actor::JobQueue,
    messages::QueueMessage::{self, Add, GetJob, GetStatus, GetStatusAll, Stop, StopAll},
};
use crate::config::QueueConfig;
use crate::error::{self, Error};
use crate::events::Status;
use crate::job::Job;
use crate::types::{Cmd, Cores, JobId};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::{mpsc, oneshot};

/// A single-node job queue running shell commands under a core budget.
///
/// This struct is an actor handle, the queue itself lives in the task started by `JobQueueHandle::spawn`.
/// Handles can be cloned freely. Once the last one is dropped the queue shuts down and kills whatever is
/// still running.
#[derive(Clone)]
pub struct JobQueueHandle {
    sender: mpsc::Sender<QueueMessage>,
}

impl JobQueueHandle {
    /// Spawn a new queue on the current tokio runtime.
    ///
    /// `message_capacity` limits the build-up of inbound requests.
    pub fn spawn(config: QueueConfig, message_capacity: usize) -> error::Result<Self> {
        config.validate()?;
        let (sender, receiver) = mpsc::channel(message_capacity);
        JobQueue::spawn(receiver, config);
        Ok(Self { sender })
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> QueueMessage,
    ) -> error::Result<T> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| Error::Closed)?;
        rx.await.map_err(|_| Error::Closed)
    }

    /// Queue a command. Output goes to `<run_dir>/job-<id>.out` and `.err` unless given.
    pub async fn add(
        &self,
        cmd: impl Into<Cmd>,
        cores: Cores,
        run_dir: impl Into<PathBuf>,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
    ) -> error::Result<JobId> {
        let cmd = cmd.into();
        let run_dir = run_dir.into();
        self.request(|response| Add {
            cmd,
            cores,
            run_dir,
            stdout,
            stderr,
            response,
        })
        .await?
    }

    /// Stop a job. Returns the id back, or `None` if the queue never saw it.
    pub async fn stop_job_with_id(&self, job_id: JobId) -> error::Result<Option<JobId>> {
        self.request(|response| Stop { job_id, response }).await
    }

    pub async fn stop_all_jobs(&self) -> error::Result<()> {
        self.request(|response| StopAll { response }).await
    }

    pub async fn get_job_with_id(&self, job_id: JobId) -> error::Result<Option<Job>> {
        self.request(|response| GetJob { job_id, response }).await
    }

    pub async fn get_status(&self, job_id: JobId) -> error::Result<Status> {
        self.request(|response| GetStatus { job_id, response }).await
    }

    pub async fn get_status_all(&self) -> error::Result<HashMap<JobId, Status>> {
        self.request(|response| GetStatusAll { response }).await
    }
}
