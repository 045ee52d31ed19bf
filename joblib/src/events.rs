use crate::types::JobId;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a queued job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Completed,
    Failed,
    Pending,
    Running,
    Cancelled,
    NotFound,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Pending => "pending",
            Status::Running => "running",
            Status::Cancelled => "cancelled",
            Status::NotFound => "not_found",
        }
    }

    /// Whether the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::Completed | Status::Failed | Status::Cancelled
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Status::Completed),
            "failed" => Ok(Status::Failed),
            "pending" => Ok(Status::Pending),
            "running" => Ok(Status::Running),
            "cancelled" => Ok(Status::Cancelled),
            "not_found" => Ok(Status::NotFound),
            other => Err(format!("unknown job status `{}`", other)),
        }
    }
}

/// How a job's process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessExit {
    Exited { code: i32 },
    Killed { signal: i32 },
    // waiting on the child failed, the outcome is unknown
    Lost,
}

/// Sent by a worker to the queue once its process is gone.
#[derive(Debug)]
pub struct Exited {
    pub job_id: JobId,
    pub exit: ProcessExit,
}
