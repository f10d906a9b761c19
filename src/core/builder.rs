//! Package building
//!
//! Runs a package's build command inside its working copy. A custom build
//! command replaces the default packaging command entirely.

use crate::config::defaults::DEFAULT_BUILD_COMMAND;
use crate::core::config::RunConfig;
use crate::core::package::PackageDescriptor;
use crate::infra::process::{CommandExecutor, RunnerError};

/// Builds synchronized packages using a command executor
#[derive(Debug)]
pub struct PackageBuilder<'a, E> {
    executor: &'a E,
    config: &'a RunConfig,
}

impl<'a, E: CommandExecutor> PackageBuilder<'a, E> {
    /// Create a builder for one run
    pub fn new(executor: &'a E, config: &'a RunConfig) -> Self {
        Self { executor, config }
    }

    /// Command that builds `package`
    pub fn command_for(&self, package: &PackageDescriptor) -> String {
        match package.custom_build_command() {
            Some(custom) => custom.to_string(),
            None => default_build_command(self.config),
        }
    }

    /// Build `package` and return the build command's exit code
    pub async fn build(&self, package: &PackageDescriptor) -> Result<i32, RunnerError> {
        let command = self.command_for(package);
        tracing::info!("Building {}", package.name());
        self.executor.execute(&command, Some(package.path())).await
    }
}

/// Default packaging command, with `-j<n>` when parallel builds are enabled
pub fn default_build_command(config: &RunConfig) -> String {
    if config.parallel {
        format!("{DEFAULT_BUILD_COMMAND} -j{}", config.jobs)
    } else {
        DEFAULT_BUILD_COMMAND.to_string()
    }
}
