use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use anyhow::Context;

impl Repository {
    /// Switch to another branch, materializing its tip in the working tree
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            anyhow::bail!("No such branch exists.");
        }
        if branch_name == self.refs().read_head()? {
            anyhow::bail!("No need to checkout the current branch.");
        }

        let target_id = self
            .refs()
            .read_branch(branch_name)?
            .with_context(|| format!("branch {} does not point to a commit", branch_name))?;
        let target = self.database().load_commit(&target_id)?;
        let head = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;
        Migration::new(self, &head, &target).apply_changes(&mut staging)?;
        drop(staging);

        self.refs().set_head(branch_name)
    }

    /// Restore a single file from a commit into the working tree.
    ///
    /// Without a commit id the file comes from HEAD. The file is neither
    /// staged nor unstaged; only the working-tree copy changes.
    pub fn checkout_file(
        &mut self,
        raw_commit_id: Option<&str>,
        name: &str,
    ) -> anyhow::Result<()> {
        let commit = match raw_commit_id {
            Some(raw) => {
                let commit_id = self.database().resolve_commit_id(raw)?;
                self.database().load_commit(&commit_id)?
            }
            None => self.head_commit()?,
        };

        let Some(blob_id) = commit.blob_id(name) else {
            anyhow::bail!("File does not exist in that commit.");
        };

        let content = self.database().read_blob(blob_id)?;
        self.workspace().write_file(name, &content)
    }
}
