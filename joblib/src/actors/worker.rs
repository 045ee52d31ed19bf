mod actor;

use crate::events::Exited;
use crate::job::Job;
use actor::Actor;
use std::fs::File;
use std::{io, process::Stdio};
use tokio::{
    process,
    sync::{mpsc, oneshot},
};

/// Handle to the task supervising one running job.
///
/// Dropping the handle kills the process if it is still running.
pub struct WorkerHandle {
    kill_tx: Option<oneshot::Sender<()>>,
}

impl WorkerHandle {
    /// Launch `job` and report its exit on `exit_tx`.
    pub fn spawn(
        job: &Job,
        use_shell: bool,
        exit_tx: mpsc::UnboundedSender<Exited>,
    ) -> io::Result<Self> {
        let stdout = File::create(&job.stdout)?;
        let stderr = File::create(&job.stderr)?;
        let child = command(&job.cmd, use_shell)?
            .current_dir(&job.run_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(true)
            .spawn()?;
        let (kill_tx, kill_rx) = oneshot::channel();
        Actor::spawn(job.id, child, kill_rx, exit_tx);
        Ok(Self {
            kill_tx: Some(kill_tx),
        })
    }

    pub fn stop(&mut self) {
        if let Some(kill_tx) = self.kill_tx.take() {
            let _ = kill_tx.send(());
        }
    }
}

fn command(cmd: &str, use_shell: bool) -> io::Result<process::Command> {
    if use_shell {
        let mut command = process::Command::new("sh");
        command.arg("-c").arg(cmd);
        return Ok(command);
    }

    let mut parts = cmd.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;
    let mut command = process::Command::new(program);
    command.args(parts);
    Ok(command)
}
