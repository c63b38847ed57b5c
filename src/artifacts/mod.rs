//! Version-control data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `objects`: stored object types (blob, commit) and their identifiers
//! - `checkout`: working-tree materialization with the untracked-file guard
//! - `merge`: split-point search and per-file three-way classification

pub mod checkout;
pub mod merge;
pub mod objects;
