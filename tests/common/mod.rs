//! Common test utilities for concurrently integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A `concurrently` command isolated from the user's own configuration
///
/// HOME and XDG_CONFIG_HOME point into a fresh temp dir and the working
/// directory is that dir, so no stray `.concurrently.toml` is picked up.
pub fn concurrently_cmd() -> (TempDir, Command) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = Command::cargo_bin("concurrently").expect("binary should be built");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("RUST_LOG")
        .env_remove("CONCURRENTLY_CONFIG");
    (dir, cmd)
}

/// Write a config file into `dir` and return its path
pub fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("concurrently-test.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Split stdout into the `[name] line` records it contains
///
/// Blocks from different commands are not newline-separated, so a record
/// starts at every `[` that follows either the start of output, a newline,
/// or the end of the previous block.
pub fn records(stdout: &str, names: &[&str]) -> Vec<String> {
    let mut text = stdout.to_string();
    for name in names {
        let marker = format!("[{}] ", name);
        text = text.replace(&marker, &format!("\n{}", marker));
    }
    text.lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

/// Sample config limiting the pool to one worker
pub const SINGLE_WORKER_CONFIG: &str = r#"
[pool]
workers = 1
"#;
