//! Blob object
//!
//! Blobs store file content. A blob is addressed by hashing the filename
//! together with the content, so identical (filename, content) pairs
//! collapse to a single stored entry.

use crate::artifacts::objects::hash_parts;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Blob object representing the content of a tracked file
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    /// Name of the file this content was staged under
    name: String,
    /// File content
    content: String,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Compute the blob's id as `sha1(filename, content)`
    pub fn object_id(&self) -> anyhow::Result<ObjectId> {
        hash_parts(&[&self.name, &self.content])
    }
}

#[cfg(test)]
mod tests {
    use super::Blob;

    #[test]
    fn test_identical_name_and_content_hash_identically() {
        let a = Blob::new("a.txt".to_string(), "hello\n".to_string());
        let b = Blob::new("a.txt".to_string(), "hello\n".to_string());

        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn test_same_content_under_different_name_hashes_differently() {
        let a = Blob::new("a.txt".to_string(), "hello\n".to_string());
        let b = Blob::new("b.txt".to_string(), "hello\n".to_string());

        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }
}
