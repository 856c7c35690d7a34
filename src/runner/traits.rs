//! Common traits and types for the command pool
//!
//! Defines where prefixed output blocks go once a command has finished.

use std::io::{self, Write};

use crate::error::RunnerError;

/// Result type for runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Destination for finished output blocks
///
/// Implementations are shared by every pool task and are called
/// concurrently. The pool itself adds no locking around calls, so blocks
/// from different commands land in whatever order the writes happen.
pub trait OutputSink: Send + Sync {
    /// Write one command's prefixed block as a single write
    fn write_block(&self, block: &str) -> io::Result<()>;
}

/// Writes blocks straight to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_block(&self, block: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(block.as_bytes())?;
        // Blocks carry no trailing newline, so line buffering alone would hold them back
        stdout.flush()
    }
}

/// Per-invocation result, discarded by the pool once written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Display name used for the prefix
    pub name: String,
    /// Exit code if available; never inspected by the pool
    pub exit_code: Option<i32>,
    /// The prefixed output block as written
    pub block: String,
}
