use crate::error;
use crate::events::Status;
use crate::job::Job;
use crate::types::{Cmd, Cores, JobId};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum QueueMessage {
    Add {
        cmd: Cmd,
        cores: Cores,
        run_dir: PathBuf,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
        response: oneshot::Sender<error::Result<JobId>>,
    },
    Stop {
        job_id: JobId,
        response: oneshot::Sender<Option<JobId>>,
    },
    StopAll {
        response: oneshot::Sender<()>,
    },
    GetJob {
        job_id: JobId,
        response: oneshot::Sender<Option<Job>>,
    },
    GetStatus {
        job_id: JobId,
        response: oneshot::Sender<Status>,
    },
    GetStatusAll {
        response: oneshot::Sender<HashMap<JobId, Status>>,
    },
}
