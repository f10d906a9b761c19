//! Core business logic module
//!
//! # Submodules
//!
//! - [`config`] - Run configuration (mode, root, parallelism)
//! - [`package`] - Package descriptors
//! - [`catalog`] - Package catalog loading
//! - [`selection`] - Resolving which packages a run processes
//! - [`sync`] - Working copy synchronization
//! - [`builder`] - Package building
//! - [`orchestrator`] - Sequential sync and build loop

pub mod builder;
pub mod catalog;
pub mod config;
pub mod orchestrator;
pub mod package;
pub mod selection;
pub mod sync;
