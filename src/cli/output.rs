//! Output formatting
//!
//! Logging setup, package listings, run summaries and error display.
//! Logs go to standard error; listings, summaries and usage errors go to
//! standard output.

use std::path::PathBuf;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::core::catalog::Catalog;
use crate::core::orchestrator::BuildReport;
use crate::core::package::PackageKind;
use crate::error::SelectionError;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Log filter for a `-v` count: 0 and 1 are info, 2 and above debug
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 | 1 => "info",
        _ => "debug",
    }
}

/// Install the global tracing subscriber; `RUST_LOG` wins over `-v`
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,debforge={}", log_level(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// One entry of `--list-packages --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    /// Package name
    pub name: String,
    /// Catalog collection
    pub kind: PackageKind,
    /// Source URL
    pub url: String,
    /// Local working copy
    pub path: PathBuf,
}

/// Summaries for `names`, skipping anything the catalog does not know
pub fn summarize(catalog: &Catalog, names: &[String]) -> Vec<PackageSummary> {
    names
        .iter()
        .filter_map(|name| catalog.lookup(name))
        .map(|pkg| PackageSummary {
            name: pkg.name().to_string(),
            kind: pkg.kind(),
            url: pkg.url().to_string(),
            path: pkg.path().to_path_buf(),
        })
        .collect()
}

/// Print package names, one per line, or as a JSON array
pub fn print_package_list(
    catalog: &Catalog,
    names: &[String],
    json: bool,
) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&summarize(catalog, names))?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

/// Print the end-of-run summary
pub fn print_summary(report: &BuildReport) {
    println!(
        "{} Processed {} package(s), built {} in {:.1}s",
        status::SUCCESS,
        report.packages.len(),
        report.built_count(),
        report.total_elapsed().as_secs_f64()
    );
}

/// Report a fatal error
///
/// Usage errors go to standard output, everything else to standard error.
pub fn display_error(err: &anyhow::Error) {
    if err.downcast_ref::<SelectionError>().is_some() {
        println!("{} {err}", status::ERROR);
    } else {
        eprintln!("{} {err:#}", status::ERROR);
    }
}
