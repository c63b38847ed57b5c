use crate::areas::repository::Repository;

impl Repository {
    /// Unstage a pending addition, or stage a tracked file for removal.
    ///
    /// Both paths delete the working-tree copy. A file neither staged
    /// nor tracked is rejected.
    pub fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        if staging.is_staged_for_addition(name) {
            staging.unstage_addition(name)?;
            self.workspace().delete_file(name)?;
        } else if self.head_commit()?.tracks(name) {
            staging.stage_removal(name);
            self.workspace().delete_file(name)?;
        } else {
            anyhow::bail!("No reason to remove the file.");
        }

        staging.write_updates()
    }
}
