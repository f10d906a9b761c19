//! Repository synchronization
//!
//! Brings a package working copy into the state a build expects. Modes are
//! checked in priority order:
//!
//! 1. [`SyncMode::Keep`] does nothing and reports success
//! 2. [`SyncMode::Clean`] deletes an existing working copy, then clones
//! 3. [`SyncMode::Reset`] discards local changes in an existing working
//!    copy and resets it to the package commit; no clone follows. A
//!    directory that is not a git checkout is removed and cloned instead
//! 4. A missing working copy is cloned (tag, else shallow branch, else the
//!    default branch)

use crate::core::config::SyncMode;
use crate::core::package::PackageDescriptor;
use crate::error::SyncError;
use crate::infra::filesystem;
use crate::infra::git::{clone_command, is_checkout, reset_command};
use crate::infra::process::CommandExecutor;

/// Synchronizes working copies using a command executor
#[derive(Debug)]
pub struct Synchronizer<'a, E> {
    executor: &'a E,
    mode: SyncMode,
}

impl<'a, E: CommandExecutor> Synchronizer<'a, E> {
    /// Create a synchronizer for one run
    pub fn new(executor: &'a E, mode: SyncMode) -> Self {
        Self { executor, mode }
    }

    /// Synchronize `package` and return the exit code of the last git command
    ///
    /// Keep mode returns 0 without running anything.
    pub async fn sync(&self, package: &PackageDescriptor) -> Result<i32, SyncError> {
        let path = package.path();

        match self.mode {
            SyncMode::Keep => {
                tracing::info!("Keeping working copy at {} as is", path.display());
                return Ok(0);
            }
            SyncMode::Clean if path.exists() => {
                tracing::info!("Removing working copy at {}", path.display());
                filesystem::remove_dir_all(path)?;
            }
            SyncMode::Reset if is_checkout(path) => {
                tracing::info!("Resetting {} to {}", package.name(), package.commit());
                let code = self
                    .executor
                    .execute(&reset_command(package.commit()), Some(path))
                    .await?;
                return Ok(code);
            }
            SyncMode::Reset if path.exists() => {
                tracing::warn!(
                    "{} is not a git working copy, removing it before cloning",
                    path.display()
                );
                filesystem::remove_dir_all(path)?;
            }
            SyncMode::Clean | SyncMode::Reset => {}
        }

        if let Some(parent) = path.parent() {
            filesystem::create_dir_all(parent)?;
        }

        let git_ref = package.clone_ref();
        match &git_ref {
            Some(r) => tracing::info!("Cloning {} ({r})", package.url()),
            None => tracing::info!("Cloning {}", package.url()),
        }
        let code = self
            .executor
            .execute(&clone_command(package.url(), path, git_ref.as_ref()), None)
            .await?;
        Ok(code)
    }
}
