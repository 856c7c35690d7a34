//! CLI module for concurrently
//!
//! A single flat command: positional shell commands plus optional `--names`.

pub mod commands;

pub use commands::Cli;
