//! Debforge - fetch and package network OS sources as Debian packages
//!
//! For every selected package debforge brings a local git working copy
//! into the right state, then runs the package's build command inside it.
//! Packages are processed one at a time, in order, and the first failure
//! stops the run.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Package model, selection and the build loop
//! - [`infra`] - Infrastructure layer (filesystem, processes, git)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
