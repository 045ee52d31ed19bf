use jobrunner::{Cores, JobId, JobRunnerAdapter, LocalQueueAdapter, RunnerConfig, State};
use std::error;
use std::path::PathBuf;
use std::time::Duration;
use tokio::{select, signal, sync::mpsc, time};
use tracing::{info, warn};

const POLL_PERIOD: Duration = Duration::from_secs(1);

pub struct RunnerCli {
    inner: Box<dyn JobRunnerAdapter>,
}

impl RunnerCli {
    pub fn new(config: &RunnerConfig) -> Result<Self, Box<dyn error::Error>> {
        let adapter = LocalQueueAdapter::from_config(config)?;
        info!(
            cores = adapter.cores(),
            whitelisted = adapter.whitelisted_warnings().len(),
            "local job queue started"
        );
        Ok(Self {
            inner: Box::new(adapter),
        })
    }

    /// Start `command` and poll it until it reaches a final state.
    pub async fn run(
        &self,
        command: &[String],
        cores: Cores,
        dir: PathBuf,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
    ) -> Result<State, Box<dyn error::Error>> {
        let cmd = command.join(" ");
        let job_id = self
            .inner
            .start(&cmd, cores, &dir, stdout, stderr)
            .await
            .ok_or_else(|| format!("failed to start `{}`", cmd))?;
        println!("Started job id: {}", job_id);
        Ok(self.wait(job_id, ctrl_c_events()).await)
    }

    async fn wait(&self, job_id: JobId, mut interrupts: mpsc::Receiver<()>) -> State {
        let mut interrupted = false;
        loop {
            let state = self.inner.status(job_id).await;
            if state.is_final() {
                return state;
            }

            select! {
                _ = time::sleep(POLL_PERIOD) => {}
                Some(()) = interrupts.recv() => {
                    if interrupted {
                        warn!(job_id, %state, "interrupted again, no longer waiting for the job");
                        return state;
                    }
                    interrupted = true;
                    info!("interrupted, stopping all jobs");
                    self.inner.stop_all().await;
                }
            }
        }
    }
}

/// Forward every ctrl-c to the returned channel.
fn ctrl_c_events() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        loop {
            if let Err(e) = signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {}", e);
                return;
            }
            if tx.send(()).await.is_err() {
                return;
            }
        }
    });
    rx
}
