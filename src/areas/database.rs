//! Object store
//!
//! Content-addressed, append-only storage for blobs and serialized commit
//! records. Objects are written once and never updated or deleted:
//!
//! - `blobs/<blob-id>`: raw file content
//! - `commits/<commit-id>`: serialized commit record
//!
//! Writes go through a temp-file-and-rename step so a partially written
//! object is never visible under its final name.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Database {
    /// Path to the repository state directory (typically `.nit`)
    path: Box<Path>,
}

impl Database {
    pub fn blobs_path(&self) -> PathBuf {
        self.path.join("blobs")
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join("commits")
    }

    /// Store a blob, returning its id.
    ///
    /// Idempotent: storing the same (filename, content) pair twice
    /// performs no duplicate write.
    pub fn store_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let blob_id = blob.object_id()?;
        let blob_path = self.blobs_path().join(blob_id.as_ref());

        if !blob_path.exists() {
            self.write_object(&blob_path, blob.content())?;
        }

        Ok(blob_id)
    }

    pub fn read_blob(&self, blob_id: &ObjectId) -> anyhow::Result<String> {
        let blob_path = self.blobs_path().join(blob_id.as_ref());

        std::fs::read_to_string(&blob_path)
            .with_context(|| format!("Unable to read blob {}", blob_id))
    }

    /// Store a commit record under its id, unless it already exists
    pub fn store_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let commit_path = self.commits_path().join(commit.id().as_ref());

        if !commit_path.exists() {
            self.write_object(&commit_path, &commit.serialize())?;
        }

        Ok(())
    }

    pub fn commit_exists(&self, commit_id: &ObjectId) -> bool {
        self.commits_path().join(commit_id.as_ref()).exists()
    }

    pub fn load_commit(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        let commit_path = self.commits_path().join(commit_id.as_ref());

        if !commit_path.exists() {
            anyhow::bail!("No commit with that id exists.");
        }

        let content = std::fs::read_to_string(&commit_path)
            .with_context(|| format!("Unable to read commit record {}", commit_id))?;

        Commit::deserialize(commit_id.clone(), &content)
    }

    /// Enumerate every stored commit id, unordered
    pub fn all_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut ids = Vec::new();

        for entry in std::fs::read_dir(self.commits_path())? {
            let entry = entry?;
            if entry.path().is_file() {
                ids.push(ObjectId::try_parse(
                    entry.file_name().to_string_lossy().to_string(),
                )?);
            }
        }

        Ok(ids)
    }

    /// Find all commits whose id starts with the given prefix.
    ///
    /// Used to resolve abbreviated commit ids to their full form. If
    /// multiple matches are found, all are returned (indicating an
    /// ambiguous prefix).
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        for entry in std::fs::read_dir(self.commits_path())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(prefix) {
                matches.push(ObjectId::try_parse(file_name.to_string())?);
            }
        }

        Ok(matches)
    }

    /// Resolve a full id or an unambiguous prefix to a stored commit id
    pub fn resolve_commit_id(&self, raw: &str) -> anyhow::Result<ObjectId> {
        if raw.len() == OBJECT_ID_LENGTH {
            let commit_id = ObjectId::try_parse(raw.to_string())?;
            if !self.commit_exists(&commit_id) {
                anyhow::bail!("No commit with that id exists.");
            }
            return Ok(commit_id);
        }

        let mut matches = self.find_commits_by_prefix(raw)?;
        match matches.len() {
            0 => anyhow::bail!("No commit with that id exists."),
            1 => Ok(matches.remove(0)),
            _ => anyhow::bail!("Ambiguous commit id prefix."),
        }
    }

    fn write_object(&self, object_path: &Path, content: &str) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?;
        let file_name = object_path
            .file_name()
            .with_context(|| format!("Invalid object path {}", object_path.display()))?
            .to_string_lossy();
        let temp_object_path = object_dir.join(format!("tmp-obj-{}", file_name));

        std::fs::write(&temp_object_path, content).with_context(|| {
            format!(
                "Unable to write object file {}",
                temp_object_path.display()
            )
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }
}
