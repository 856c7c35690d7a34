//! Shell execution with captured stdout
//!
//! Each command string is handed to the configured shell as a single
//! argument (`sh -c "<command>"`), so pipes, globs and redirection keep
//! working. Standard output is captured for prefixing; standard error is
//! inherited and reaches the terminal untouched.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::config::ShellConfig;
use crate::error::RunnerError;

/// A resolved shell able to run command strings
#[derive(Debug, Clone)]
pub struct ShellCommand {
    program: PathBuf,
    flag: String,
}

impl ShellCommand {
    pub fn new(program: impl Into<PathBuf>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// Resolve the configured shell program on disk
    pub fn from_config(config: &ShellConfig) -> Result<Self, RunnerError> {
        let program = config.resolve_program()?;
        tracing::debug!(shell = %program.display(), flag = %config.flag, "resolved shell");
        Ok(Self::new(program, config.flag.clone()))
    }

    /// Run `command` to completion and capture its standard output
    ///
    /// The child is not killed if this future is dropped, so a runner that
    /// gives up waiting leaves the process running.
    ///
    /// # Errors
    /// * `RunnerError::SpawnFailed` - If the shell couldn't be spawned
    /// * `RunnerError::Io` - If waiting on the child failed
    pub async fn capture_stdout(&self, command: &str) -> Result<ExecResult, RunnerError> {
        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.flag).arg(command);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit());
        cmd.kill_on_drop(false);

        let child = cmd.spawn().map_err(|e| RunnerError::SpawnFailed {
            command: command.to_string(),
            error: e.to_string(),
        })?;

        let output = child.wait_with_output().await?;

        Ok(ExecResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            duration: start.elapsed(),
        })
    }
}

/// Result of running one command string
#[derive(Debug)]
pub struct ExecResult {
    /// Exit code if available (None when killed by a signal)
    pub exit_code: Option<i32>,
    /// Captured standard output, lossily decoded
    pub stdout: String,
    pub duration: Duration,
}

/// Characters that end a line in captured output
///
/// Besides `\n` and `\r` this covers the vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators, so `\r`-driven progress output gets one prefix per update.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` on every line break, treating `\r\n` as one break
///
/// A trailing break does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Prefix every line of `text` with `[name] `
///
/// Lines are re-joined with `\n` and the result carries no trailing
/// newline. Empty input yields an empty string.
pub fn prefix_lines(name: &str, text: &str) -> String {
    split_lines(text)
        .into_iter()
        .map(|line| format!("[{}] {}", name, line))
        .collect::<Vec<_>>()
        .join("\n")
}
