use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the active branch to an arbitrary commit and materialize it.
    ///
    /// Same working-tree migration as a branch checkout, but the active
    /// branch pointer moves instead of HEAD.
    pub fn reset(&mut self, raw_commit_id: &str) -> anyhow::Result<()> {
        let target_id = self.database().resolve_commit_id(raw_commit_id)?;
        let target = self.database().load_commit(&target_id)?;
        let head = self.head_commit()?;

        let mut staging = self.staging();
        staging.rehydrate()?;
        Migration::new(self, &head, &target).apply_changes(&mut staging)?;
        drop(staging);

        let branch_name = self.refs().read_head()?;
        self.refs().update_branch(&branch_name, &target_id)
    }
}
