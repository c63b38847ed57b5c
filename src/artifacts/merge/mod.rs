//! Merge algorithms
//!
//! - `split_point`: breadth-first common-ancestor search over the commit
//!   DAG
//! - `classification`: per-file three-way comparison and conflict content
//!   synthesis

pub mod classification;
pub mod split_point;
