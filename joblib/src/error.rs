use crate::types::Cores;
use std::path::PathBuf;
use std::result;
use std::time::Duration;
use thiserror;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("a job queue needs at least one core")]
    NoCores,
    #[error("polling interval must be non-zero, got {0:?}")]
    InvalidInterval(Duration),
    #[error("job requests {requested} cores but the queue only has {budget}")]
    InvalidCores { requested: Cores, budget: Cores },
    #[error("run directory {0} does not exist")]
    InvalidRunDir(PathBuf),
    #[error("unknown priority method `{0}`")]
    UnknownPriorityMethod(String),
    #[error("job queue exited")]
    Closed,
}

pub type Result<T> = result::Result<T, Error>;
