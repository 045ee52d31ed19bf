use crate::state::State;
use async_trait::async_trait;
use joblib::types::{Cores, JobId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Operations every job runner integration provides.
///
/// Failures surface as sentinel values rather than errors: a job that could not be launched has no id,
/// stopping an unknown job yields `None` and a job the runner cannot account for is in [`State::None`].
#[async_trait]
pub trait JobRunnerAdapter: Send + Sync {
    /// Start `cmd` in `run_dir` using `cores` cores, optionally rerouting its output.
    async fn start(
        &self,
        cmd: &str,
        cores: Cores,
        run_dir: &Path,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
    ) -> Option<JobId>;

    /// Stop a job, returning its id or `None` if it is not known.
    async fn stop(&self, job_id: JobId) -> Option<JobId>;

    async fn stop_all(&self);

    async fn status(&self, job_id: JobId) -> State;

    async fn status_all(&self) -> HashMap<JobId, State>;
}
