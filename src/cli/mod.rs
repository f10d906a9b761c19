//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::defaults::{DEFAULT_BUILD_COMMAND, REQUIRED_TOOLS};
use crate::core::catalog::Catalog;
use crate::core::config::{RunConfig, RunMode, SyncMode};
use crate::core::orchestrator::Orchestrator;
use crate::core::package::PackageDescriptor;
use crate::core::selection::{self, SelectionRequest};
use crate::infra::git::{self, UNKNOWN_REVISION};
use crate::infra::process::ShellRunner;

/// Debforge - fetch and package network OS sources
///
/// Clones or resets every selected package repository under
/// `<root>/packages/` and builds it into Debian packages, one package at a
/// time. The first failure stops the run.
#[derive(Parser, Debug)]
#[command(name = "debforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-vv for debug, including build output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Delete and re-clone every working copy before building
    #[arg(long, conflicts_with_all = ["keep", "fetch_only"])]
    pub clean: bool,

    /// Build working copies as they are, without touching git
    #[arg(long, conflicts_with = "fetch_only")]
    pub keep: bool,

    /// Clone or reset working copies without building
    #[arg(long)]
    pub fetch_only: bool,

    /// Print every known package and exit
    #[arg(long)]
    pub list_packages: bool,

    /// Print the package list as JSON
    #[arg(long, requires = "list_packages")]
    pub json: bool,

    /// Build only these packages, in this order
    #[arg(long, num_args = 1.., value_name = "PACKAGE")]
    pub build: Vec<String>,

    /// Leave these packages out of the full package set
    #[arg(long, num_args = 1.., value_name = "PACKAGE")]
    pub blacklist: Vec<String>,

    /// Compile with all processors inside each default package build
    #[arg(long)]
    pub parallel: bool,

    /// Number of parallel jobs for --parallel (default: processor count)
    #[arg(short, long, requires = "parallel")]
    pub jobs: Option<usize>,

    /// Repository root (default: the git work tree containing the current directory)
    #[arg(long, env = "DEBFORGE_ROOT")]
    pub root: Option<PathBuf>,

    /// Package catalog file (default: <root>/debforge.toml, else built-in)
    #[arg(long, env = "DEBFORGE_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl Cli {
    /// Execute the requested run
    pub async fn run(self) -> Result<()> {
        let root = self.resolve_root()?;
        let revision =
            git::head_revision(&root).unwrap_or_else(|| UNKNOWN_REVISION.to_string());
        tracing::info!("Repository root: {}, revision: {revision}", root.display());
        tracing::debug!(
            "debforge {} ({})",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_SHA").unwrap_or("unknown build")
        );

        let catalog = Catalog::locate(self.catalog.as_deref(), &root)
            .context("Failed to load package catalog")?;

        if self.list_packages {
            let names = selection::list(&catalog, &self.blacklist)?;
            output::print_package_list(&catalog, &names, self.json)?;
            return Ok(());
        }

        let request = SelectionRequest {
            build: self.build.clone(),
            blacklist: self.blacklist.clone(),
        };
        let packages = selection::resolve(&catalog, &request)?;

        let config = self.run_config(root, revision);
        warn_missing_tools(&config, &packages);

        let runner = ShellRunner::new();
        let report = Orchestrator::new(&runner, &config).run(&packages).await?;
        output::print_summary(&report);
        Ok(())
    }

    /// Run mode selected by the mutually exclusive mode flags
    pub fn run_mode(&self) -> RunMode {
        if self.clean {
            RunMode::Clean
        } else if self.keep {
            RunMode::Keep
        } else if self.fetch_only {
            RunMode::FetchOnly
        } else {
            RunMode::Default
        }
    }

    fn run_config(&self, root: PathBuf, revision: String) -> RunConfig {
        let config = RunConfig::new(root, revision).with_mode(self.run_mode());
        if self.parallel {
            config.with_parallel(self.jobs.unwrap_or(0))
        } else {
            config
        }
    }

    fn resolve_root(&self) -> Result<PathBuf> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                git::discover_root(&cwd).unwrap_or(cwd)
            }
        };

        if !root.is_dir() {
            bail!("Repository root '{}' is not a directory", root.display());
        }
        root.canonicalize()
            .with_context(|| format!("Failed to resolve repository root '{}'", root.display()))
    }
}

/// Warn about tools the run will need but cannot find on PATH
fn warn_missing_tools(config: &RunConfig, packages: &[PackageDescriptor]) {
    let mut tools: Vec<&str> = Vec::new();
    if config.mode.sync_mode() != SyncMode::Keep {
        tools.extend(REQUIRED_TOOLS);
    }
    if config.mode.builds() && packages.iter().any(|p| p.custom_build_command().is_none()) {
        tools.extend(DEFAULT_BUILD_COMMAND.split_whitespace().next());
    }

    for tool in tools {
        if which::which(tool).is_err() {
            tracing::warn!("'{tool}' not found in PATH");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("debforge").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_mode() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.run_mode(), RunMode::Default);
        assert!(cli.build.is_empty());
    }

    #[test]
    fn test_mode_flags() {
        assert_eq!(parse(&["--clean"]).unwrap().run_mode(), RunMode::Clean);
        assert_eq!(parse(&["--keep"]).unwrap().run_mode(), RunMode::Keep);
        assert_eq!(parse(&["--fetch-only"]).unwrap().run_mode(), RunMode::FetchOnly);
    }

    #[test]
    fn test_mode_flags_conflict() {
        assert!(parse(&["--clean", "--keep"]).is_err());
        assert!(parse(&["--clean", "--fetch-only"]).is_err());
        assert!(parse(&["--keep", "--fetch-only"]).is_err());
    }

    #[test]
    fn test_build_list_keeps_order() {
        let cli = parse(&["--build", "linux-kernel", "kernel-modules", "--parallel"]).unwrap();
        assert_eq!(cli.build, ["linux-kernel", "kernel-modules"]);
        assert!(cli.parallel);
    }

    #[test]
    fn test_verbose_count() {
        assert_eq!(parse(&["-vvv"]).unwrap().verbose, 3);
    }

    #[test]
    fn test_jobs_requires_parallel() {
        assert!(parse(&["--jobs", "4"]).is_err());
        let cli = parse(&["--parallel", "--jobs", "4"]).unwrap();
        let config = cli.run_config(PathBuf::from("/src/nos"), "abc".to_string());
        assert!(config.parallel);
        assert_eq!(config.jobs, 4);
    }

    #[test]
    fn test_json_requires_list() {
        assert!(parse(&["--json"]).is_err());
        assert!(parse(&["--list-packages", "--json"]).is_ok());
    }
}
