//! Infrastructure layer
//!
//! Handles all I/O with the outside world: the filesystem, external
//! processes and git repositories.

pub mod filesystem;
pub mod git;
pub mod process;
