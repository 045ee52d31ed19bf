use crate::events::{Exited, ProcessExit};
use crate::types::JobId;

use futures::future::FutureExt;
use std::os::unix::process::ExitStatusExt;
use tokio::{
    process::Child,
    select,
    sync::{mpsc, oneshot},
};
use tracing::{debug, warn};

pub struct Actor {
    job_id: JobId,
    exit_tx: mpsc::UnboundedSender<Exited>,
}

impl Actor {
    pub fn spawn(
        job_id: JobId,
        child: Child,
        kill_rx: oneshot::Receiver<()>,
        exit_tx: mpsc::UnboundedSender<Exited>,
    ) {
        let actor = Self { job_id, exit_tx };
        tokio::spawn(async move { actor.run(child, kill_rx).await });
    }

    async fn run(self, mut child: Child, kill_rx: oneshot::Receiver<()>) {
        // a dropped sender counts as a kill request too
        let mut kill_rx = kill_rx.fuse();
        let exit = loop {
            select! {
                _ = &mut kill_rx => {
                    debug!(job_id = self.job_id, "killing job process");
                    if let Err(e) = child.start_kill() {
                        warn!(job_id = self.job_id, "failed to kill job process: {}", e);
                    }
                }
                exit_status = child.wait() => {
                    break match exit_status {
                        Ok(status) => match (status.code(), status.signal()) {
                            (Some(code), _) => ProcessExit::Exited { code },
                            (None, Some(signal)) => ProcessExit::Killed { signal },
                            (None, None) => ProcessExit::Lost,
                        },
                        Err(e) => {
                            warn!(job_id = self.job_id, "waiting on job process failed: {}", e);
                            ProcessExit::Lost
                        }
                    };
                }
            }
        };

        debug!(job_id = self.job_id, ?exit, "job process ended");
        // the queue may already be gone
        let _ = self.exit_tx.send(Exited {
            job_id: self.job_id,
            exit,
        });
    }
}
