use crate::areas::repository::Repository;

impl Repository {
    /// Create a branch pointing at the current HEAD commit.
    ///
    /// The new branch is not checked out.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        self.refs().create_branch(name, head.id())
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(name) {
            anyhow::bail!("A branch with that name does not exist.");
        }
        if name == self.refs().read_head()? {
            anyhow::bail!("Cannot remove the current branch.");
        }

        self.refs().delete_branch(name)
    }
}
