//! Debforge CLI - fetch and package network OS sources
//!
//! Entry point for the debforge command-line application.

use anyhow::Result;
use clap::Parser;

use debforge::cli::output::{display_error, init_logging};
use debforge::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Any usage or build failure exits with status 1
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
