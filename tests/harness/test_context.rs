//! Shared testing harness for `simplelocalize` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const API_KEY: &str = "test-api-key";

/// Testing harness providing an isolated working directory for CLI exercises.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

impl TestContext {
    /// Create a new isolated environment.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the CLI's working directory.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled binary within the work directory.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("simplelocalize").expect("Failed to locate binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.root.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Build a command pointed at `server_url` with the test API key.
    pub(crate) fn cli_against(&self, server_url: &str) -> Command {
        let mut cmd = self.cli();
        cmd.args(["--apiKey", API_KEY, "--baseUrl", server_url]);
        cmd
    }

    /// Write `simplelocalize.yml` into the work directory.
    pub(crate) fn write_config(&self, content: &str) {
        self.write_file("simplelocalize.yml", content);
    }

    /// Write a file relative to the work directory, creating parents.
    pub(crate) fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    /// Read a file relative to the work directory.
    pub(crate) fn read_file(&self, relative: &str) -> String {
        let path = self.work_dir.join(relative);
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
    }
}
