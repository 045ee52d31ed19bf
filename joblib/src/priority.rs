use crate::error::Error;
use crate::types::{Cores, JobId};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Policy picking which pending job starts next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriorityMethod {
    /// Oldest job first. A job that does not fit holds back everything queued after it.
    #[default]
    Fifo,
    /// Largest job that fits into the free cores first.
    MaxCores,
}

impl PriorityMethod {
    /// Pick the next job to launch from `pending`, which is ordered by job id.
    pub fn next(&self, pending: &[(JobId, Cores)], free: Cores) -> Option<JobId> {
        match self {
            PriorityMethod::Fifo => pending
                .first()
                .filter(|(_, cores)| *cores <= free)
                .map(|(id, _)| *id),
            PriorityMethod::MaxCores => pending
                .iter()
                .filter(|(_, cores)| *cores <= free)
                .max_by_key(|(id, cores)| (*cores, Reverse(*id)))
                .map(|(id, _)| *id),
        }
    }
}

impl FromStr for PriorityMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(PriorityMethod::Fifo),
            "maxcores" => Ok(PriorityMethod::MaxCores),
            _ => Err(Error::UnknownPriorityMethod(s.to_string())),
        }
    }
}

impl fmt::Display for PriorityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityMethod::Fifo => f.write_str("fifo"),
            PriorityMethod::MaxCores => f.write_str("maxcores"),
        }
    }
}
