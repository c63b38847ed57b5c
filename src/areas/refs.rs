//! References (branches and HEAD)
//!
//! Branches are human-readable names pointing to commits; HEAD names the
//! currently active branch. There is no detached state: HEAD always holds
//! a branch name, never a commit id.
//!
//! ## File Format
//!
//! - `branches/<name>`: text file holding the 40-character commit id the
//!   branch points to
//! - `HEAD`: text file holding the active branch name
//!
//! Pointer updates take an exclusive advisory lock on the file being
//! written, so a concurrent invocation cannot observe a torn write.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Name of the HEAD file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Reference manager
///
/// Handles reading and writing branch pointers and the HEAD indirection.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository state directory (typically `.nit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join("branches")
    }

    /// Read the name of the active branch from HEAD
    pub fn read_head(&self) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(self.head_path())
            .context("Unable to read the HEAD reference")?;

        Ok(content.trim().to_string())
    }

    /// Point HEAD at the given branch name
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), branch_name)
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.branches_path().join(branch_name).exists()
    }

    /// Read the commit id a branch points to
    ///
    /// # Returns
    ///
    /// Some(ObjectId) if the branch exists, None otherwise
    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branches_path().join(branch_name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("Unable to read branch file {}", branch_path.display()))?;

        Ok(Some(ObjectId::try_parse(content.trim().to_string())?))
    }

    /// Advance a branch pointer to a new commit id, creating the branch
    /// file if needed
    pub fn update_branch(&self, branch_name: &str, commit_id: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.branches_path().join(branch_name), commit_id.as_ref())
    }

    /// Create a branch pointing at the given commit
    pub fn create_branch(&self, branch_name: &str, commit_id: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            anyhow::bail!("A branch with that name already exists.");
        }

        self.update_branch(branch_name, commit_id)
    }

    /// Delete a branch pointer.
    ///
    /// The active-branch check belongs to the caller; this only verifies
    /// existence.
    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.branches_path().join(branch_name);

        if !branch_path.exists() {
            anyhow::bail!("A branch with that name does not exist.");
        }

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("Unable to delete branch file {}", branch_path.display()))
    }

    /// List all branch names in lexicographic order
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let mut branches = Vec::new();

        for entry in std::fs::read_dir(self.branches_path())? {
            let entry = entry?;
            if entry.path().is_file() {
                branches.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        branches.sort();
        Ok(branches)
    }

    /// Overwrite a pointer file under an exclusive advisory lock
    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
