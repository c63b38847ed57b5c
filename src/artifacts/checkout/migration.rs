//! Full working-tree migration between two commits
//!
//! The migration first runs the untracked-file guard over every file the
//! target tracks, then overwrites tracked files from the target's blobs,
//! deletes files only the current HEAD tracks, and finally clears the
//! staging area. All checks happen before any mutation, so a rejected
//! migration leaves both the working tree and the repository untouched.

use crate::areas::repository::Repository;
use crate::areas::staging::Staging;
use crate::artifacts::objects::commit::Commit;
use derive_new::new;

/// Message raised when uncommitted local work would be overwritten
pub const UNTRACKED_FILE_GUARD: &str =
    "There is an untracked file in the way; delete it, or add and commit it first.";

#[derive(new)]
pub struct Migration<'a> {
    repository: &'a Repository,
    head: &'a Commit,
    target: &'a Commit,
}

impl Migration<'_> {
    /// Materialize the target commit in the working tree
    pub fn apply_changes(&self, staging: &mut Staging) -> anyhow::Result<()> {
        ensure_no_overwrites(
            self.repository,
            self.head,
            staging,
            self.target.tracked_files(),
        )?;

        for (name, blob_id) in self.target.file_to_blob() {
            let content = self.repository.database().read_blob(blob_id)?;
            self.repository.workspace().write_file(name, &content)?;
        }

        for name in self.head.tracked_files() {
            if !self.target.tracks(name) {
                self.repository.workspace().delete_file(name)?;
            }
        }

        staging.clear()
    }
}

/// Fail if any of the named files exists in the working tree, differs
/// from what the HEAD commit records, and is not staged for addition.
///
/// This protects uncommitted local work from being silently clobbered by
/// checkout, reset, or merge.
pub fn ensure_no_overwrites<'a>(
    repository: &Repository,
    head: &Commit,
    staging: &Staging,
    names: impl Iterator<Item = &'a String>,
) -> anyhow::Result<()> {
    for name in names {
        if let Some(content) = repository.workspace().try_read_file(name)? {
            if !repository.file_matches_commit(head, name, &content)?
                && !staging.is_staged_for_addition(name)
            {
                anyhow::bail!(UNTRACKED_FILE_GUARD);
            }
        }
    }

    Ok(())
}
