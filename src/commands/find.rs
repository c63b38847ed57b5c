use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message contains the given text.
    ///
    /// An empty result is reported on stdout, not as a failure.
    pub fn find(&mut self, needle: &str) -> anyhow::Result<()> {
        let mut found = false;

        for commit_id in self.database().all_commit_ids()? {
            let commit = self.database().load_commit(&commit_id)?;

            if commit.message().contains(needle) {
                writeln!(self.writer(), "{}", commit.id())?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }
}
