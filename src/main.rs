//! concurrently CLI entry point
//!
//! Usage:
//!   concurrently <COMMAND>... [--names <NAME>...]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use concurrently::config::{load_config, CONFIG_ENV};
use concurrently::logging::init_logging;
use concurrently::runner::{build_invocations, ctrl_c, CommandPool, PoolExit, StdoutSink};
use concurrently::{Cli, RunnerError, ShellCommand};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            if let Some(hint) = e.downcast_ref::<RunnerError>().and_then(RunnerError::suggestion) {
                eprintln!("{}: {}", "hint".yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let override_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let loaded = load_config(override_path.as_deref())?;
    init_logging(&loaded.config.logging)?;
    loaded.log_sources();

    let config = loaded.config;

    let shell = ShellCommand::from_config(&config.shell).context("Failed to resolve shell")?;
    let pool = CommandPool::new(shell, config.pool.effective_workers(), Arc::new(StdoutSink));
    let invocations = build_invocations(cli.commands, cli.names);

    // Command exit statuses never change the process exit code
    match pool.run(invocations, ctrl_c()).await {
        PoolExit::Completed { finished } => {
            tracing::debug!(finished, "all commands finished");
        }
        PoolExit::Interrupted { abandoned } => {
            tracing::debug!(abandoned, "returning after interrupt");
        }
    }

    Ok(())
}
