//! Working-tree materialization
//!
//! Reconciles the filesystem snapshot with a target commit during
//! checkout, reset, and merge.

pub mod migration;
