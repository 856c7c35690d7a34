//! concurrently - run shell commands side by side
//!
//! Each command runs through the system shell on a bounded worker pool.
//! Its standard output is captured and written back with every line
//! prefixed by the command's display name:
//!
//! ```text
//! $ concurrently "printf 'a\nb\n'" "echo bye" --names X
//! [X] a
//! [X] b[echo bye] bye
//! ```
//!
//! ## Behavior
//!
//! - Names pair with commands by position; unnamed commands use their own text
//! - Standard error is not captured and reaches the terminal directly
//! - Exit statuses are ignored; a failing command looks like a passing one
//! - No ordering between commands, and no separator between their blocks
//! - Ctrl-C stops queued commands and returns without waiting for running ones
//!
//! ## Configuration
//!
//! Layered TOML files plus `CONCURRENTLY_*` environment variables; see
//! [`config::load_config`].

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod runner;

pub use cli::Cli;
pub use config::Config;
pub use error::RunnerError;
pub use executor::{prefix_lines, ExecResult, ShellCommand};
pub use runner::{
    build_invocations, resolve_names, CommandPool, Invocation, OutputSink, Outcome, PoolExit,
    StdoutSink,
};
