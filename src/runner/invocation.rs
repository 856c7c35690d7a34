//! Invocations: one (command, name) pair per unit of work
//!
//! Names are matched to commands by position. Commands past the end of the
//! name list are named after themselves; surplus names are ignored.

use crate::executor::{prefix_lines, ShellCommand};

use super::traits::{OutputSink, Outcome, RunnerResult};

/// A command string paired with its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Literal shell command line
    pub command: String,
    /// Label used in the `[name] ` prefix
    pub name: String,
}

impl Invocation {
    pub fn new(command: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            name: name.into(),
        }
    }

    /// Run the command, prefix its stdout, and hand the block to `sink`
    ///
    /// The exit status is returned in the `Outcome` but otherwise ignored:
    /// a failing command's output is written exactly like a passing one.
    pub async fn execute(
        &self,
        shell: &ShellCommand,
        sink: &dyn OutputSink,
    ) -> RunnerResult<Outcome> {
        tracing::debug!(name = %self.name, command = %self.command, "starting command");

        let result = shell.capture_stdout(&self.command).await?;
        let block = prefix_lines(&self.name, &result.stdout);

        if !block.is_empty() {
            sink.write_block(&block)?;
        }

        tracing::debug!(
            name = %self.name,
            duration_ms = result.duration.as_millis() as u64,
            "command finished"
        );

        Ok(Outcome {
            name: self.name.clone(),
            exit_code: result.exit_code,
            block,
        })
    }
}

/// Effective names for `commands`, padding missing names with the commands themselves
pub fn resolve_names(commands: &[String], names: &[String]) -> Vec<String> {
    let mut resolved: Vec<String> = names.iter().take(commands.len()).cloned().collect();
    if resolved.len() < commands.len() {
        resolved.extend_from_slice(&commands[resolved.len()..]);
    }
    resolved
}

/// Pair commands with their effective names
pub fn build_invocations(commands: Vec<String>, names: Vec<String>) -> Vec<Invocation> {
    let names = resolve_names(&commands, &names);
    commands
        .into_iter()
        .zip(names)
        .map(|(command, name)| Invocation { command, name })
        .collect()
}
