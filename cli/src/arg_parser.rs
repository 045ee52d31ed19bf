use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run jobs through the local job queue
#[derive(Debug, Parser)]
pub struct ArgParser {
    /// Path to the runner's yaml config
    #[clap(short = 'c', long = "config", env = "JOBRUNNER_CONFIG", parse(from_os_str))]
    pub config: PathBuf,
    /// The sub-command to use
    #[clap(subcommand)]
    pub sub_command: SubCommand,
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum SubCommand {
    /// start a job and wait until it is finished
    Run {
        #[clap(long, default_value_t = 1)]
        /// cores the job needs
        cores: usize,

        #[clap(long, default_value = ".", parse(from_os_str))]
        /// working directory for the command
        dir: PathBuf,

        #[clap(long, parse(from_os_str))]
        /// reroute the job's stdout to this file
        stdout: Option<PathBuf>,

        #[clap(long, parse(from_os_str))]
        /// reroute the job's stderr to this file
        stderr: Option<PathBuf>,

        #[clap(required = true, multiple_values = true, last = true)]
        /// the command line, run through `sh -c`
        command: Vec<String>,
    },
}
