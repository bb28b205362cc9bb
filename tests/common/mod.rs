//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::io::Write;
use std::path::PathBuf;

use getopti::{Command, LayoutConfig};
use tempfile::TempDir;

/// Owned argument list from string literals.
pub fn raw_args(args: Vec<&str>) -> Vec<String> {
    args.into_iter().map(String::from).collect()
}

/// A command with a fixed 80-column layout, independent of the terminal.
pub fn command() -> Command {
    Command::with_layout(LayoutConfig::with_columns(80))
}

/// Write `content` to a temporary `spec.toml`.
pub fn temp_spec(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("spec.toml");
    let mut file = std::fs::File::create(&path).expect("Failed to create spec file");
    file.write_all(content.as_bytes())
        .expect("Failed to write spec file");
    (temp_dir, path)
}
