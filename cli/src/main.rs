mod arg_parser;
mod runner_cli;

use arg_parser::{ArgParser, SubCommand};
use jobrunner::{RunnerConfig, State};
use runner_cli::RunnerCli;

use clap::Parser;
use std::{error, process};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ArgParser::parse();
    let config = RunnerConfig::load(&args.config)?;
    let cli = RunnerCli::new(&config)?;

    let state = match args.sub_command {
        SubCommand::Run {
            cores,
            dir,
            stdout,
            stderr,
            command,
        } => cli.run(&command, cores, dir, stdout, stderr).await?,
    };

    println!("Job finished: {}", state);
    if state != State::Done {
        process::exit(1);
    }
    Ok(())
}
