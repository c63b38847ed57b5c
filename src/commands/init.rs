use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;
use std::io::Write;

pub const DEFAULT_BRANCH: &str = "master";

impl Repository {
    /// Create the repository layout, the root commit, and the default
    /// branch
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(
                "A nit version-control system already exists in the current directory."
            );
        }

        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create the blobs directory")?;
        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create the commits directory")?;
        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create the branches directory")?;

        let staging_path = self.staging().path().to_path_buf();
        fs::create_dir_all(&staging_path).context("Failed to create the staging directory")?;
        self.staging()
            .write_updates()
            .context("Failed to create the staging tracker files")?;

        let root = Commit::root()?;
        self.database().store_commit(&root)?;
        self.refs().update_branch(DEFAULT_BRANCH, root.id())?;
        self.refs().set_head(DEFAULT_BRANCH)?;

        writeln!(
            self.writer(),
            "Initialized an empty nit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
