//! Test utilities
//!
//! Proptest generators and a [`CommandExecutor`] that records commands
//! instead of running them.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::infra::process::{CommandExecutor, RunnerError};

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid package name (lowercase alphanumeric with hyphens)
    pub fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,30}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }
}

/// A command seen by [`RecordingExecutor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    /// Shell command string
    pub command: String,
    /// Working directory, if one was requested
    pub cwd: Option<PathBuf>,
}

/// Executor that records commands and returns canned exit codes
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    commands: Mutex<Vec<RecordedCommand>>,
    exit_code: i32,
    failures: Vec<(String, i32)>,
    create_clone_dirs: bool,
}

impl RecordingExecutor {
    /// Every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command exits with `code`
    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    /// Commands containing `pattern` exit with `code`
    #[must_use]
    pub fn fail_matching(mut self, pattern: &str, code: i32) -> Self {
        self.failures.push((pattern.to_string(), code));
        self
    }

    /// Successful `git clone` commands create their destination directory
    #[must_use]
    pub fn cloning(mut self) -> Self {
        self.create_clone_dirs = true;
        self
    }

    /// Commands recorded so far, in order
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.commands.lock().unwrap().clone()
    }

    fn code_for(&self, command: &str) -> i32 {
        self.failures
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map_or(self.exit_code, |(_, code)| *code)
    }
}

impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &str, cwd: Option<&Path>) -> Result<i32, RunnerError> {
        self.commands.lock().unwrap().push(RecordedCommand {
            command: command.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        });

        let code = self.code_for(command);
        if code == 0 && self.create_clone_dirs && command.starts_with("git clone") {
            if let Some(dest) = command.split_whitespace().last() {
                std::fs::create_dir_all(dest.trim_matches('\'')).unwrap();
            }
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_recording_executor_codes() {
        let executor = RecordingExecutor::new().fail_matching("dpkg", 2);
        assert_eq!(executor.execute("git clone x y", None).await.unwrap(), 0);
        assert_eq!(executor.execute("dpkg-buildpackage", None).await.unwrap(), 2);
        assert_eq!(executor.commands().len(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
