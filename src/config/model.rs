//! Configuration model for concurrently
//!
//! Defines the structure for XDG-compliant layered configuration.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::RunnerError;

/// Upper bound on the default worker count
const MAX_DEFAULT_WORKERS: usize = 32;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Shell used to interpret each command string
    #[serde(default)]
    pub shell: ShellConfig,

    /// Worker pool settings
    #[serde(default)]
    pub pool: PoolConfig,

    /// Diagnostic logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shell invocation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShellConfig {
    /// Shell program; `~` and `$VAR` are expanded
    #[serde(default = "default_shell_program")]
    pub program: String,

    /// Flag that makes the shell read the command from its next argument
    #[serde(default = "default_shell_flag")]
    pub flag: String,
}

fn default_shell_program() -> String {
    "sh".to_string()
}

fn default_shell_flag() -> String {
    "-c".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
            flag: default_shell_flag(),
        }
    }
}

impl ShellConfig {
    /// Expand and locate the shell program on disk
    pub fn resolve_program(&self) -> Result<PathBuf, RunnerError> {
        let expanded = shellexpand::full(&self.program).map_err(|e| {
            RunnerError::Config(format!("cannot expand shell '{}': {}", self.program, e))
        })?;

        which::which(&*expanded).map_err(|e| RunnerError::ShellNotFound {
            program: expanded.into_owned(),
            error: e.to_string(),
        })
    }
}

/// Worker pool settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PoolConfig {
    /// Maximum number of commands running at once (unset = runtime default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl PoolConfig {
    /// Configured worker count, or `min(32, cpus + 4)` when unset
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            let cpus = std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1);
            (cpus + 4).min(MAX_DEFAULT_WORKERS)
        })
    }
}

/// Format of diagnostic log lines on stderr
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Diagnostic logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Reject settings the runner cannot honor
    pub fn validate(&self) -> Result<(), RunnerError> {
        if self.shell.program.trim().is_empty() {
            return Err(RunnerError::Config("shell.program must not be empty".to_string()));
        }
        if self.pool.workers == Some(0) {
            return Err(RunnerError::Config("pool.workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
