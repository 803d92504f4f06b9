//! oomtest
//!
//! Coverage walker for the OOM API: every key on every port is read, every
//! function is read, and every writable key is written back with its current
//! value. Passing means no accessor failed.

pub mod cli;
pub mod walker;

pub use walker::{diagnostic_line, CoverageWalker, WalkSummary};
