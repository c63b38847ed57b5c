use crate::areas::repository::Repository;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Print the full repository state in five sections.
    ///
    /// Every section header is always printed, followed by its entries in
    /// lexicographic order and a blank line. The modifications section
    /// compares the working tree against the staging area for staged
    /// files and against the HEAD commit for tracked-but-unstaged ones.
    pub fn status(&mut self) -> anyhow::Result<()> {
        let mut staging = self.staging();
        staging.rehydrate()?;

        let head = self.head_commit()?;
        let head_branch = self.refs().read_head()?;
        let branches = self.refs().list_branches()?;
        let workspace_files = self.workspace().list_files()?;

        let mut tracked_or_present: BTreeSet<String> =
            head.tracked_files().cloned().collect();
        tracked_or_present.extend(workspace_files.iter().cloned());

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in &branches {
            if *branch == head_branch {
                writeln!(writer, "*{}", branch)?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for name in staging.staged_for_addition() {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for name in staging.staged_for_removal() {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for name in &tracked_or_present {
            let on_disk = self.workspace().try_read_file(name)?;

            if staging.is_staged_for_addition(name) {
                match &on_disk {
                    None => writeln!(writer, "{} (deleted)", name)?,
                    Some(content) if *content != staging.scratch_content(name)? => {
                        writeln!(writer, "{} (modified)", name)?
                    }
                    _ => {}
                }
            } else if head.tracks(name) && !staging.is_staged_for_removal(name) {
                match &on_disk {
                    None => writeln!(writer, "{} (deleted)", name)?,
                    Some(content) if !self.file_matches_commit(&head, name, content)? => {
                        writeln!(writer, "{} (modified)", name)?
                    }
                    _ => {}
                }
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for name in &workspace_files {
            if !head.tracks(name)
                && !staging.is_staged_for_addition(name)
                && !staging.is_staged_for_removal(name)
            {
                writeln!(writer, "{}", name)?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }
}
