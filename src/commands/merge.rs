use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::ensure_no_overwrites;
use crate::artifacts::merge::classification::{classify, conflict_content, MergeAction};
use crate::artifacts::merge::split_point::find_split_point;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Three-way merge of the given branch into the active branch.
    ///
    /// All precondition checks run before any file is touched. The two
    /// degenerate split points short-circuit: an ancestor other branch is
    /// a no-op error, a head at the split point fast-forwards through a
    /// plain branch checkout. Otherwise every filename any of the three
    /// commits tracks is classified and applied, and the resulting
    /// staging state is committed with both tips as parents.
    pub fn merge(&mut self, other_branch: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(other_branch) {
            anyhow::bail!("A branch with that name does not exist.");
        }

        let head_branch = self.refs().read_head()?;
        if other_branch == head_branch {
            anyhow::bail!("Cannot merge a branch with itself.");
        }

        let mut staging = self.staging();
        staging.rehydrate()?;
        if !staging.is_empty() {
            anyhow::bail!("You have uncommitted changes.");
        }

        let head = self.head_commit()?;
        let other_id = self
            .refs()
            .read_branch(other_branch)?
            .with_context(|| format!("branch {} does not point to a commit", other_branch))?;
        let other = self.database().load_commit(&other_id)?;

        // the untracked guard covers everything either tip tracks, so a
        // rejected merge leaves the working tree untouched
        let mut tip_files: BTreeSet<String> = head.tracked_files().cloned().collect();
        tip_files.extend(other.tracked_files().cloned());
        ensure_no_overwrites(self, &head, &staging, tip_files.iter())?;

        let split_id = find_split_point(self.database(), head.id(), other.id())?;
        if split_id == *other.id() {
            anyhow::bail!("Given branch is an ancestor of the current branch.");
        }
        if split_id == *head.id() {
            drop(staging);
            self.checkout_branch(other_branch)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }
        let split = self.database().load_commit(&split_id)?;

        let mut all_files = tip_files;
        all_files.extend(split.tracked_files().cloned());

        let mut in_conflict = false;
        for name in &all_files {
            match classify(split.blob_id(name), head.blob_id(name), other.blob_id(name)) {
                MergeAction::Keep => {}
                MergeAction::TakeOther => {
                    let blob_id = other
                        .blob_id(name)
                        .context("merge classified a file the given branch does not track")?;
                    let content = self.database().read_blob(blob_id)?;
                    self.workspace().write_file(name, &content)?;
                    staging.stage_addition(name, &content)?;
                }
                MergeAction::RemoveFile => {
                    self.workspace().delete_file(name)?;
                    staging.stage_removal(name);
                }
                MergeAction::Conflict => {
                    in_conflict = true;

                    let head_content = match head.blob_id(name) {
                        Some(blob_id) => Some(self.database().read_blob(blob_id)?),
                        None => None,
                    };
                    let other_content = match other.blob_id(name) {
                        Some(blob_id) => Some(self.database().read_blob(blob_id)?),
                        None => None,
                    };

                    let merged =
                        conflict_content(head_content.as_deref(), other_content.as_deref());
                    self.workspace().write_file(name, &merged)?;
                    staging.stage_addition(name, &merged)?;
                }
            }
        }

        staging.write_updates()?;
        drop(staging);

        self.write_commit(
            &format!("Merged {} into {}.", other_branch, head_branch),
            Some(other.id().clone()),
        )?;

        if in_conflict {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }
}
