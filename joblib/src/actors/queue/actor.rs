use super::messages::QueueMessage;
use crate::actors::worker::WorkerHandle;
use crate::config::QueueConfig;
use crate::error::{self, Error};
use crate::events::{Exited, ProcessExit, Status};
use crate::job::Job;
use crate::types::{Cmd, Cores, JobId};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tokio::{
    select,
    sync::{mpsc, oneshot},
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

struct Entry {
    job: Job,
    stop_requested: bool,
}

pub struct JobQueue {
    inbox: mpsc::Receiver<QueueMessage>,
    exits: mpsc::UnboundedReceiver<Exited>,
    exit_tx: mpsc::UnboundedSender<Exited>,
    config: QueueConfig,
    next_id: JobId,
    // ordered by id so fifo falls out of iteration order
    jobs: BTreeMap<JobId, Entry>,
    workers: HashMap<JobId, WorkerHandle>,
}

impl JobQueue {
    pub fn spawn(inbox: mpsc::Receiver<QueueMessage>, config: QueueConfig) {
        let (exit_tx, exits) = mpsc::unbounded_channel();
        let actor = Self {
            inbox,
            exits,
            exit_tx,
            config,
            next_id: 1,
            jobs: BTreeMap::new(),
            workers: HashMap::new(),
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use self::QueueMessage::*;
        let mut ticker = time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                maybe_msg = self.inbox.recv() => {
                    let msg = match maybe_msg {
                        Some(msg) => msg,
                        // every handle is gone
                        None => break,
                    };
                    match msg {
                        Add {
                            cmd,
                            cores,
                            run_dir,
                            stdout,
                            stderr,
                            response,
                        } => {
                            self.add(cmd, cores, run_dir, stdout, stderr, response);
                        }
                        Stop { job_id, response } => {
                            let _ = response.send(self.stop(job_id));
                        }
                        StopAll { response } => {
                            self.stop_all();
                            let _ = response.send(());
                        }
                        GetJob { job_id, response } => {
                            let _ = response.send(self.jobs.get(&job_id).map(|e| e.job.clone()));
                        }
                        GetStatus { job_id, response } => {
                            let status = self
                                .jobs
                                .get(&job_id)
                                .map(|e| e.job.status)
                                .unwrap_or(Status::NotFound);
                            let _ = response.send(status);
                        }
                        GetStatusAll { response } => {
                            let all = self
                                .jobs
                                .iter()
                                .map(|(id, e)| (*id, e.job.status))
                                .collect();
                            let _ = response.send(all);
                        }
                    }
                }
                Some(exited) = self.exits.recv() => {
                    self.finish(exited);
                }
                _ = ticker.tick() => {}
            }
            self.schedule();
        }

        if !self.workers.is_empty() {
            info!(running = self.workers.len(), "job queue shutting down, killing running jobs");
        }
        // dropping the worker handles kills their processes
        self.workers.clear();
    }

    fn add(
        &mut self,
        cmd: Cmd,
        cores: Cores,
        run_dir: PathBuf,
        stdout: Option<PathBuf>,
        stderr: Option<PathBuf>,
        response: oneshot::Sender<error::Result<JobId>>,
    ) {
        if cores == 0 || cores > self.config.cores {
            let _ = response.send(Err(Error::InvalidCores {
                requested: cores,
                budget: self.config.cores,
            }));
            return;
        }
        if !run_dir.is_dir() {
            let _ = response.send(Err(Error::InvalidRunDir(run_dir)));
            return;
        }

        let job_id = self.next_id;
        self.next_id += 1;
        debug!(job_id, %cmd, cores, "job queued");
        let job = Job::new(job_id, cmd, cores, run_dir, stdout, stderr);
        self.jobs.insert(
            job_id,
            Entry {
                job,
                stop_requested: false,
            },
        );
        let _ = response.send(Ok(job_id));
    }

    fn stop(&mut self, job_id: JobId) -> Option<JobId> {
        let entry = self.jobs.get_mut(&job_id)?;
        match entry.job.status {
            Status::Pending => {
                entry.job.status = Status::Cancelled;
                info!(job_id, "pending job cancelled");
            }
            Status::Running => {
                entry.stop_requested = true;
                if let Some(worker) = self.workers.get_mut(&job_id) {
                    worker.stop();
                }
                info!(job_id, "stop requested for running job");
            }
            _ => debug!(job_id, status = %entry.job.status, "job already finished"),
        }
        Some(job_id)
    }

    fn stop_all(&mut self) {
        let ids: Vec<JobId> = self
            .jobs
            .iter()
            .filter(|(_, e)| !e.job.status.is_terminal())
            .map(|(id, _)| *id)
            .collect();
        for job_id in ids {
            self.stop(job_id);
        }
    }

    fn finish(&mut self, exited: Exited) {
        self.workers.remove(&exited.job_id);
        let entry = match self.jobs.get_mut(&exited.job_id) {
            Some(entry) => entry,
            None => return,
        };

        let status = match exited.exit {
            ProcessExit::Exited { code } => {
                entry.job.return_code = Some(code);
                if entry.stop_requested {
                    Status::Cancelled
                } else if code == 0 {
                    Status::Completed
                } else {
                    Status::Failed
                }
            }
            ProcessExit::Killed { .. } if entry.stop_requested => Status::Cancelled,
            ProcessExit::Killed { .. } | ProcessExit::Lost => Status::Failed,
        };
        entry.job.status = status;
        info!(job_id = exited.job_id, %status, exit = ?exited.exit, "job finished");
    }

    fn free_cores(&self) -> Cores {
        let used: Cores = self
            .jobs
            .values()
            .filter(|e| e.job.status == Status::Running)
            .map(|e| e.job.cores)
            .sum();
        self.config.cores.saturating_sub(used)
    }

    /// Launch pending jobs for as long as the priority method finds one that fits.
    fn schedule(&mut self) {
        loop {
            let pending: Vec<(JobId, Cores)> = self
                .jobs
                .iter()
                .filter(|(_, e)| e.job.status == Status::Pending)
                .map(|(id, e)| (*id, e.job.cores))
                .collect();
            let job_id = match self.config.priority.next(&pending, self.free_cores()) {
                Some(job_id) => job_id,
                None => return,
            };
            self.launch(job_id);
        }
    }

    fn launch(&mut self, job_id: JobId) {
        let entry = match self.jobs.get_mut(&job_id) {
            Some(entry) => entry,
            None => return,
        };
        match WorkerHandle::spawn(&entry.job, self.config.use_shell, self.exit_tx.clone()) {
            Ok(worker) => {
                entry.job.status = Status::Running;
                self.workers.insert(job_id, worker);
                info!(job_id, cmd = %entry.job.cmd, "job started");
            }
            Err(e) => {
                entry.job.status = Status::Failed;
                warn!(job_id, cmd = %entry.job.cmd, "failed to launch job: {}", e);
            }
        }
    }
}
