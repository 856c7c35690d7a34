//! Command execution module
//!
//! Runs a single command string through the system shell, capturing
//! standard output and rewriting it with a name prefix.

pub mod runner;

pub use runner::*;
