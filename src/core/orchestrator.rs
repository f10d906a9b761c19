//! Build orchestration
//!
//! Processes the selected packages strictly one after another, in
//! selection order: synchronize, then build unless the run is fetch-only.
//! The first failure aborts the whole run; later packages are never
//! touched and earlier results stay on disk.

use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::core::builder::PackageBuilder;
use crate::core::config::RunConfig;
use crate::core::package::PackageDescriptor;
use crate::core::sync::Synchronizer;
use crate::error::OrchestratorError;
use crate::infra::process::CommandExecutor;

/// What happened to one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// Package name
    pub name: String,
    /// Whether the build step ran
    pub built: bool,
    /// Time spent synchronizing and building
    pub elapsed: Duration,
}

/// Summary of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Processed packages, in order
    pub packages: Vec<PackageOutcome>,
}

impl BuildReport {
    /// Number of packages that went through the build step
    pub fn built_count(&self) -> usize {
        self.packages.iter().filter(|p| p.built).count()
    }

    /// Total time across all packages
    pub fn total_elapsed(&self) -> Duration {
        self.packages.iter().map(|p| p.elapsed).sum()
    }
}

/// Drives synchronization and building for a run
#[derive(Debug)]
pub struct Orchestrator<'a, E> {
    executor: &'a E,
    config: &'a RunConfig,
}

impl<'a, E: CommandExecutor> Orchestrator<'a, E> {
    /// Create an orchestrator for one run
    pub fn new(executor: &'a E, config: &'a RunConfig) -> Self {
        Self { executor, config }
    }

    /// Process `packages` in order, stopping at the first failure
    pub async fn run(
        &self,
        packages: &[PackageDescriptor],
    ) -> Result<BuildReport, OrchestratorError> {
        tracing::info!(
            "Processing {} package(s) in {} mode",
            packages.len(),
            self.config.mode
        );

        let synchronizer = Synchronizer::new(self.executor, self.config.mode.sync_mode());
        let builder = PackageBuilder::new(self.executor, self.config);
        let mut report = BuildReport::default();

        for package in packages {
            let span = tracing::info_span!("package", name = package.name());
            let outcome = self
                .process(package, &synchronizer, &builder)
                .instrument(span)
                .await?;
            report.packages.push(outcome);
        }

        tracing::info!(
            "Processed {} package(s), built {}",
            report.packages.len(),
            report.built_count()
        );
        Ok(report)
    }

    async fn process(
        &self,
        package: &PackageDescriptor,
        synchronizer: &Synchronizer<'a, E>,
        builder: &PackageBuilder<'a, E>,
    ) -> Result<PackageOutcome, OrchestratorError> {
        let name = package.name();
        let start = Instant::now();

        let code = synchronizer.sync(package).await.map_err(|source| {
            tracing::error!("Failed to synchronize {name}: {source}");
            OrchestratorError::Sync {
                package: name.to_string(),
                source,
            }
        })?;
        if code != 0 {
            tracing::error!("Failed to synchronize {name} (exit code {code})");
            return Err(OrchestratorError::SyncFailed {
                package: name.to_string(),
                code,
            });
        }

        let built = self.config.mode.builds();
        if built {
            let code = builder.build(package).await.map_err(|source| {
                tracing::error!("Failed to build {name}: {source}");
                OrchestratorError::Build {
                    package: name.to_string(),
                    source,
                }
            })?;
            if code != 0 {
                tracing::error!("Failed to build {name} (exit code {code})");
                return Err(OrchestratorError::BuildFailed {
                    package: name.to_string(),
                    code,
                });
            }
        }

        let elapsed = start.elapsed();
        tracing::info!("Finished {name} in {:.1}s", elapsed.as_secs_f64());
        Ok(PackageOutcome {
            name: name.to_string(),
            built,
            elapsed,
        })
    }
}
