//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// A temporary repository root with its own `debforge.toml`.
pub struct TestProject {
    /// Temporary directory for the repository root
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a project with `catalog` as its `debforge.toml`
    pub fn with_catalog(catalog: &str) -> Self {
        let project = Self::new();
        project.create_file("debforge.toml", catalog);
        project
    }

    /// Canonical path to the project root, as debforge reports it
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp directory")
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run debforge against this project with `args`
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_debforge"))
            .current_dir(self.dir.path())
            .arg("--root")
            .arg(self.dir.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("DEBFORGE_CATALOG")
            .output()
            .expect("Failed to execute debforge")
    }

    /// Create a git repository under `upstream/<name>` with one commit on
    /// `branch`, returning its `file://` URL
    pub fn create_upstream(&self, name: &str, branch: &str) -> String {
        let dir = self.dir.path().join("upstream").join(name);
        std::fs::create_dir_all(dir.join("debian")).expect("Failed to create upstream");
        std::fs::write(dir.join("debian/changelog"), format!("{name} (1.0) unstable\n"))
            .expect("Failed to write changelog");

        git(&dir, &["init", "-q"]);
        git(&dir, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")]);
        git(&dir, &["add", "."]);
        git(&dir, &["commit", "-q", "-m", "Initial packaging"]);

        format!("file://{}", dir.canonicalize().expect("upstream path").display())
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `git` is available for tests that clone real repositories
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Run git in `dir`, panicking on failure
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(["-c", "user.name=Debforge Tests", "-c", "user.email=tests@example.org"])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// One-line log of the current branch in `dir`
pub fn git_log(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["log", "--oneline"])
        .current_dir(dir)
        .output()
        .expect("Failed to run git log");
    assert!(output.status.success(), "git log failed in {}", dir.display());
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Standard output as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Standard error as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// A catalog with three standard packages and one special package
pub const SAMPLE_CATALOG: &str = r#"
namespace = "https://git.example.org/nos"
default_branch = "nos-master"
standard = ["libnl3", "lldpd", "frr"]

[[special]]
name = "linux-kernel"
url = "https://git.example.org/kernel/linux.git"
tag = "v6.1.0-nos"
build = "make -f debian/rules.gen binary-arch"
"#;
