use joblib::Status;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Job state as reported to callers of a [`JobRunnerAdapter`](crate::JobRunnerAdapter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Done,
    Error,
    Pending,
    Started,
    Cancelled,
    None,
}

impl State {
    pub fn from_status(status: Status) -> Self {
        match status {
            Status::Completed => State::Done,
            Status::Failed => State::Error,
            Status::Pending => State::Pending,
            Status::Running => State::Started,
            Status::Cancelled => State::Cancelled,
            Status::NotFound => State::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Done => "done",
            State::Error => "error",
            State::Pending => "pending",
            State::Started => "started",
            State::Cancelled => "cancelled",
            State::None => "none",
        }
    }

    /// Whether polling the job again can still yield something different.
    pub fn is_final(&self) -> bool {
        !matches!(self, State::Pending | State::Started)
    }
}

impl From<Status> for State {
    fn from(status: Status) -> Self {
        State::from_status(status)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
