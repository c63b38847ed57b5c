use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

impl Repository {
    /// Print the first-parent history from HEAD back to the root commit.
    ///
    /// Merge commits show both parents on a `Merge:` line but only the
    /// first parent is followed.
    pub fn log(&mut self) -> anyhow::Result<()> {
        let mut cursor = Some(self.head_commit()?);

        while let Some(commit) = cursor {
            self.print_commit(&commit)?;

            cursor = match commit.parent() {
                Some(parent_id) => Some(self.database().load_commit(parent_id)?),
                None => None,
            };
        }

        Ok(())
    }

    /// Print every commit in the object store, in no particular order
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        for commit_id in self.database().all_commit_ids()? {
            let commit = self.database().load_commit(&commit_id)?;
            self.print_commit(&commit)?;
        }

        Ok(())
    }

    fn print_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit.id())?;
        if let (Some(parent), Some(parent2)) = (commit.parent(), commit.parent2()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                parent2.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
