use crate::events::Status;
use crate::types::{Cmd, Cores, JobId};
use std::path::PathBuf;

/// Snapshot of a job as the queue currently sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub cmd: Cmd,
    pub cores: Cores,
    pub run_dir: PathBuf,
    pub stdout: PathBuf,
    pub stderr: PathBuf,
    pub status: Status,
    /// Set once the process exited with a code. Stays empty for jobs killed by a signal.
    pub return_code: Option<i32>,
}

impl Job {
    pub(crate) fn new(
        id: JobId,
        cmd: Cmd,
        cores: Cores,
        run_dir: PathBuf,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
    ) -> Self {
        let stdout = stdout.unwrap_or_else(|| run_dir.join(format!("job-{}.out", id)));
        let stderr = stderr.unwrap_or_else(|| run_dir.join(format!("job-{}.err", id)));
        Self {
            id,
            cmd,
            cores,
            run_dir,
            stdout,
            stderr,
            status: Status::Pending,
            return_code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_run_dir() {
        let job = Job::new(7, "true".into(), 1, PathBuf::from("/data/run"), None, None);
        assert_eq!(job.stdout, PathBuf::from("/data/run/job-7.out"));
        assert_eq!(job.stderr, PathBuf::from("/data/run/job-7.err"));
        assert_eq!(job.status, Status::Pending);
        assert_eq!(job.return_code, None);
    }

    #[test]
    fn explicit_output_is_kept() {
        let job = Job::new(
            1,
            "true".into(),
            1,
            PathBuf::from("/data/run"),
            Some(PathBuf::from("/logs/dsmc.log")),
            None,
        );
        assert_eq!(job.stdout, PathBuf::from("/logs/dsmc.log"));
        assert_eq!(job.stderr, PathBuf::from("/data/run/job-1.err"));
    }
}
