//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary site directory
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const KILN_ENV_VARS: [&str; 6] = [
    "KILN_ROOT_PATH",
    "KILN_OUTPUT_PATH",
    "KILN_INPUT_PATHS",
    "KILN_CLEAN_OUTPUT",
    "KILN_LOG_MODE",
    "KILN_OUTPUT_FORMAT",
];

/// Test environment with an isolated site directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the site root
    pub site: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty site.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let site = temp_dir.path().join("site");
        fs::create_dir_all(&site).expect("Failed to create site dir");
        Self { temp_dir, site }
    }

    /// Write a file beneath the site root, creating parent directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.site.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write site file");
        self
    }

    /// A path beneath the site root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.site.join(relative)
    }

    /// The site root.
    pub fn root(&self) -> &Path {
        &self.site
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("kiln").expect("Failed to find kiln binary");
        for var in KILN_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder running from the site root.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.current_dir(&self.site);
        cmd
    }

    /// Run a command that must succeed and return its stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run kiln");

        assert!(
            output.status.success(),
            "kiln {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
