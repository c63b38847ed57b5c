//! Durable repository state, one area per concern
//!
//! - `database`: append-only object store for blobs and commit records
//! - `refs`: branch pointers and the HEAD indirection
//! - `staging`: pending add/remove sets plus scratch copies
//! - `repository`: high-level context tying the areas together
//! - `workspace`: working-tree file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
