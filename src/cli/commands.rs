//! CLI argument definitions using clap

use clap::Parser;

/// Run shell commands concurrently.
///
/// Each command runs through the system shell. Its standard output is
/// captured and printed with every line prefixed by `[name] `; standard
/// error passes straight through. Exit statuses of the commands are not
/// reported.
///
/// `--names` takes every value that follows it, so put the commands first.
#[derive(Parser, Debug)]
#[command(name = "concurrently")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shell commands to run (each one a single argument, e.g. "npm run dev")
    #[arg(required = true, num_args = 1..)]
    pub commands: Vec<String>,

    /// Display names matched to commands by position; unnamed commands use their own text
    #[arg(long, num_args = 0..)]
    pub names: Vec<String>,
}
