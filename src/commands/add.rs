use crate::areas::repository::Repository;

impl Repository {
    /// Stage a working-tree file for the next commit.
    ///
    /// If the file's current content matches what the HEAD commit
    /// records for it, nothing is staged and any pending removal is
    /// cleared; this is the path that lets `add` undo a prior `rm`.
    pub fn add(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(name) {
            anyhow::bail!("File does not exist.");
        }

        let content = self.workspace().read_file(name)?;
        let head = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;

        if self.file_matches_commit(&head, name, &content)? {
            // back to tracked-and-unchanged: drop any pending staging
            staging.unstage_addition(name)?;
            staging.clear_removal(name);
        } else {
            staging.stage_addition(name, &content)?;
        }

        staging.write_updates()
    }
}
