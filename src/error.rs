//! Error types for debforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::process::RunnerError;

/// Catalog loading and validation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Catalog file is not valid TOML or has the wrong shape
    #[error("Failed to parse catalog '{path}': {error}")]
    ParseError { path: PathBuf, error: String },

    /// The same package name appears twice
    #[error("Package '{name}' is defined more than once in the catalog")]
    DuplicateName { name: String },

    /// Package name cannot be used as a directory name
    #[error("Invalid package name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

/// Package selection errors
///
/// These are usage errors: they are raised before any package is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Requested package is not in the catalog
    #[error("Unknown package '{name}'. Use --list-packages to see available packages")]
    UnknownPackage { name: String },

    /// Blacklisted package is not in the catalog
    #[error("Cannot blacklist unknown package '{name}'")]
    UnknownBlacklisted { name: String },

    /// Requested package appears more than once in --build
    #[error("Package '{name}' is requested more than once")]
    DuplicatePackage { name: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Working copy synchronization errors
#[derive(Error, Debug)]
pub enum SyncError {
    /// Filesystem operation on the working copy failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Version control command could not be run
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Errors that abort a build run
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Version control command exited non-zero
    #[error("Failed to synchronize package '{package}' (exit code {code})")]
    SyncFailed { package: String, code: i32 },

    /// Working copy could not be prepared
    #[error("Failed to synchronize package '{package}': {source}")]
    Sync {
        package: String,
        #[source]
        source: SyncError,
    },

    /// Build command exited non-zero
    #[error("Failed to build package '{package}' (exit code {code})")]
    BuildFailed { package: String, code: i32 },

    /// Build command could not be run
    #[error("Failed to build package '{package}': {source}")]
    Build {
        package: String,
        #[source]
        source: RunnerError,
    },
}

impl OrchestratorError {
    /// Name of the package the run aborted on
    pub fn package(&self) -> &str {
        match self {
            Self::SyncFailed { package, .. }
            | Self::Sync { package, .. }
            | Self::BuildFailed { package, .. }
            | Self::Build { package, .. } => package,
        }
    }
}
