//! Error types for concurrently
//!
//! Only failures of the runner itself live here. A command exiting with a
//! non-zero status is not an error and never produces one of these.

use thiserror::Error;

/// Main error type for runner operations
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The configured shell could not be located
    #[error("Shell not found: {program}")]
    ShellNotFound { program: String, error: String },

    /// Failed to spawn the shell for a command
    #[error("Failed to spawn command: {command}")]
    SpawnFailed { command: String, error: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A pool task panicked or was aborted
    #[error("Pool task did not complete: {0}")]
    Join(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    /// Short machine-readable tag, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerError::ShellNotFound { .. } => "shell_not_found",
            RunnerError::SpawnFailed { .. } => "spawn_failed",
            RunnerError::Config(_) => "config_error",
            RunnerError::Join(_) => "join_error",
            RunnerError::Io(_) => "io_error",
        }
    }

    /// Suggest a fix for the runner's own failures
    pub fn suggestion(&self) -> Option<String> {
        match self {
            RunnerError::ShellNotFound { program, .. } => Some(format!(
                "Install '{}' or set [shell].program in your concurrently configuration",
                program
            )),
            RunnerError::SpawnFailed { error, .. } => {
                Some(format!("Check if the shell can be executed: {}", error))
            }
            RunnerError::Config(_) => {
                Some("Check your concurrently configuration file".to_string())
            }
            RunnerError::Join(_) | RunnerError::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_not_found_error() {
        let err = RunnerError::ShellNotFound {
            program: "zsh-missing".to_string(),
            error: "cannot find binary path".to_string(),
        };
        assert_eq!(err.to_string(), "Shell not found: zsh-missing");
        assert_eq!(err.kind(), "shell_not_found");
        assert!(err.suggestion().unwrap().contains("[shell].program"));
    }

    #[test]
    fn test_spawn_failed_error() {
        let err = RunnerError::SpawnFailed {
            command: "echo hi".to_string(),
            error: "Permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to spawn command: echo hi");
        assert!(err.suggestion().unwrap().contains("Permission denied"));
    }

    #[test]
    fn test_config_error() {
        let err = RunnerError::Config("pool.workers must be at least 1".to_string());
        assert!(err.to_string().starts_with("Configuration error"));
        assert_eq!(err.kind(), "config_error");
    }

    #[test]
    fn test_join_error_has_no_suggestion() {
        let err = RunnerError::Join("task 7 panicked".to_string());
        assert!(err.to_string().contains("task 7 panicked"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: RunnerError = io.into();
        assert_eq!(err.kind(), "io_error");
        assert!(err.to_string().contains("pipe closed"));
    }
}
