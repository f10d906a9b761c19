//! Run configuration
//!
//! Everything a build run needs to know, resolved once at startup and
//! passed by reference into the orchestrator, synchronizer and builder.

use std::path::{Path, PathBuf};

use crate::config::defaults::PACKAGES_DIR;

/// What a run does to each selected package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Reset existing working copies (clone missing ones), then build
    #[default]
    Default,
    /// Delete and re-clone every working copy, then build
    Clean,
    /// Leave working copies untouched, then build
    Keep,
    /// Reset or clone working copies, but build nothing
    FetchOnly,
}

impl RunMode {
    /// How the synchronizer treats existing working copies in this mode
    pub fn sync_mode(self) -> SyncMode {
        match self {
            Self::Default | Self::FetchOnly => SyncMode::Reset,
            Self::Clean => SyncMode::Clean,
            Self::Keep => SyncMode::Keep,
        }
    }

    /// Whether the build step runs after synchronization
    pub fn builds(self) -> bool {
        !matches!(self, Self::FetchOnly)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Clean => write!(f, "clean"),
            Self::Keep => write!(f, "keep"),
            Self::FetchOnly => write!(f, "fetch-only"),
        }
    }
}

/// Working copy policy applied by the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Touch nothing
    Keep,
    /// Delete the working copy and clone it again
    Clean,
    /// Discard local changes in an existing working copy
    Reset,
}

/// Immutable configuration for one invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Repository root; package working copies live under `<root>/packages`
    pub root: PathBuf,
    /// Revision of the repository root, for traceability
    pub revision: String,
    /// Run mode
    pub mode: RunMode,
    /// Pass a parallelism flag to the default packaging command
    pub parallel: bool,
    /// Parallelism degree used when `parallel` is set
    pub jobs: usize,
}

impl RunConfig {
    /// Create a configuration with default mode and no parallelism
    pub fn new(root: impl Into<PathBuf>, revision: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            revision: revision.into(),
            mode: RunMode::Default,
            parallel: false,
            jobs: num_cpus::get(),
        }
    }

    /// Set the run mode
    #[must_use]
    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable parallel compilation with `jobs` workers (0 = all processors)
    #[must_use]
    pub fn with_parallel(mut self, jobs: usize) -> Self {
        self.parallel = true;
        self.jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        self
    }
}

/// `<root>/packages`
pub fn packages_dir(root: &Path) -> PathBuf {
    root.join(PACKAGES_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_sync_mode() {
        assert_eq!(RunMode::Default.sync_mode(), SyncMode::Reset);
        assert_eq!(RunMode::FetchOnly.sync_mode(), SyncMode::Reset);
        assert_eq!(RunMode::Clean.sync_mode(), SyncMode::Clean);
        assert_eq!(RunMode::Keep.sync_mode(), SyncMode::Keep);
    }

    #[test]
    fn test_run_mode_builds() {
        assert!(RunMode::Default.builds());
        assert!(RunMode::Clean.builds());
        assert!(RunMode::Keep.builds());
        assert!(!RunMode::FetchOnly.builds());
    }

    #[test]
    fn test_run_config_parallel() {
        let config = RunConfig::new("/src/nos", "abc123");
        assert!(!config.parallel);
        assert_eq!(config.mode, RunMode::Default);

        let config = config.with_parallel(6);
        assert!(config.parallel);
        assert_eq!(config.jobs, 6);

        let config = RunConfig::new("/src/nos", "abc123").with_parallel(0);
        assert_eq!(config.jobs, num_cpus::get());
    }

    #[test]
    fn test_packages_dir() {
        assert_eq!(
            packages_dir(Path::new("/src/nos")),
            PathBuf::from("/src/nos/packages")
        );
    }
}
