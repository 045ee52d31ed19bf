//! Exit status rules for IBM Spectrum Protect `dsmc` jobs.
//!
//! `dsmc` exits with 8 when it finished but logged warnings. Some warnings are harmless for an
//! archive upload, so a failed `dsmc` job whose log only carries whitelisted warnings counts as done.

use crate::state::State;
use joblib::Job;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Return code `dsmc` uses for "completed with warnings".
pub const WARNING_RETURN_CODE: i32 = 8;

static WARNING_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"ANS[0-9]+W").unwrap());

/// Whether `cmd` is a `dsmc` invocation. Checksum jobs mention `dsmc` paths too and are left alone.
pub fn is_dsmc_job(cmd: &str) -> bool {
    cmd.contains("dsmc") && !cmd.contains("md5sum")
}

/// Every warning code in `log`, in order of appearance.
pub fn warnings(log: &str) -> Vec<&str> {
    log.lines()
        .flat_map(|line| WARNING_CODE.find_iter(line).map(|m| m.as_str()))
        .collect()
}

/// Scan the log at `path` line by line. `Done` if every warning in it is whitelisted, `Error` otherwise.
pub async fn scan_log(path: &Path, whitelist: &HashSet<String>) -> io::Result<State> {
    let mut reader = BufReader::new(File::open(path).await?);
    let mut line = Vec::new();
    let mut found = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        for warning in warnings(&text) {
            if !whitelist.contains(warning) {
                debug!(%warning, "non-whitelisted dsmc warning, keeping error state");
                return Ok(State::Error);
            }
            found.push(warning.to_string());
        }
    }

    debug!(?found, "only whitelisted dsmc warnings, reporting done");
    Ok(State::Done)
}

/// Re-derive the state of a failed `dsmc` job from its return code and stdout log.
pub async fn reinterpret(job: &Job, whitelist: &HashSet<String>) -> State {
    debug!(job_id = job.id, "dsmc process returned an error");

    if job.return_code != Some(WARNING_RETURN_CODE) {
        info!(
            job_id = job.id,
            return_code = ?job.return_code,
            "uncaught dsmc error code"
        );
        return State::Error;
    }

    debug!(job_id = job.id, "dsmc process actually returned a warning");
    match scan_log(&job.stdout, whitelist).await {
        Ok(state) => state,
        Err(e) => {
            warn!(
                job_id = job.id,
                path = %job.stdout.display(),
                "cannot read dsmc log, keeping error state: {}",
                e
            );
            State::Error
        }
    }
}
