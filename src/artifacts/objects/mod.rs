//! Stored object types
//!
//! All durable state is content-addressed by SHA-1. Two object kinds exist:
//!
//! - **Blob**: file content, addressed by `sha1(filename, content)`
//! - **Commit**: snapshot record with message, timestamp, file-to-blob
//!   mapping, and 0-2 parent links

use crate::artifacts::objects::object_id::ObjectId;
use sha1::{Digest, Sha1};

pub mod blob;
pub mod commit;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Hash a sequence of string parts into an object id.
///
/// Parts are fed to the hasher in order with no separator, matching
/// the addressing scheme used for both blobs and commits.
pub fn hash_parts(parts: &[&str]) -> anyhow::Result<ObjectId> {
    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}
