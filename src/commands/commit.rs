use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Record the staged changes as a new commit on the active branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            anyhow::bail!("Please enter a commit message.");
        }

        self.write_commit(message, None)?;

        Ok(())
    }

    /// Shared commit-writing path for `commit` and `merge`.
    ///
    /// Durability order matters: blobs and the commit record land in the
    /// object store before the branch pointer moves, and the staging area
    /// is cleared only after the pointer update. An interruption at any
    /// point leaves at worst orphaned objects, never a dangling pointer.
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        parent2: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        if staging.is_empty() {
            anyhow::bail!("No changes added to the commit.");
        }

        let head = self.head_commit()?;

        let mut additions = BTreeMap::new();
        for name in staging.staged_for_addition() {
            let content = staging.scratch_content(name)?;
            let blob_id = self
                .database()
                .store_blob(&Blob::new(name.clone(), content))?;
            additions.insert(name.clone(), blob_id);
        }

        let commit = Commit::build(
            message,
            &head,
            parent2,
            additions,
            staging.staged_for_removal(),
            Commit::timestamp_now(),
        )?;
        self.database().store_commit(&commit)?;

        let branch_name = self.refs().read_head()?;
        self.refs().update_branch(&branch_name, commit.id())?;
        staging.clear()?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch_name,
            commit.id().to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit.id().clone())
    }
}
