//! Staging area
//!
//! Tracks the files staged for the next commit as two sets: filenames
//! staged for addition and filenames staged for removal. A filename lives
//! in at most one set at a time. Each filename staged for addition also
//! has a scratch copy holding the exact bytes to commit.
//!
//! ## Layout
//!
//! - `staging/ADD`: newline-separated filenames staged for addition
//! - `staging/DEL`: newline-separated filenames staged for removal
//! - `staging/<filename>`: scratch copy of the staged content
//!
//! The whole area is cleared as a unit after every successful commit and
//! after full working-tree materialization (checkout/reset/merge).

use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeSet;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// File holding the staged-for-addition set
const ADD_TRACKER: &str = "ADD";
/// File holding the staged-for-removal set
const DEL_TRACKER: &str = "DEL";

#[derive(Debug)]
pub struct Staging {
    /// Path to the staging directory (typically `.nit/staging`)
    path: Box<Path>,
    for_addition: BTreeSet<String>,
    for_removal: BTreeSet<String>,
}

impl Staging {
    pub fn new(path: Box<Path>) -> Self {
        Staging {
            path,
            for_addition: BTreeSet::new(),
            for_removal: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load both tracker sets from disk, replacing in-memory state
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.for_addition = self.read_tracker(ADD_TRACKER)?;
        self.for_removal = self.read_tracker(DEL_TRACKER)?;

        Ok(())
    }

    /// Persist both tracker sets to disk
    pub fn write_updates(&self) -> anyhow::Result<()> {
        self.write_tracker(ADD_TRACKER, &self.for_addition)?;
        self.write_tracker(DEL_TRACKER, &self.for_removal)?;

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.for_addition.is_empty() && self.for_removal.is_empty()
    }

    pub fn staged_for_addition(&self) -> &BTreeSet<String> {
        &self.for_addition
    }

    pub fn staged_for_removal(&self) -> &BTreeSet<String> {
        &self.for_removal
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.for_addition.contains(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.for_removal.contains(name)
    }

    /// Stage a file for addition, copying its content into scratch storage.
    ///
    /// Overwrites any previous scratch copy and clears a pending removal,
    /// keeping the one-set-at-a-time invariant.
    pub fn stage_addition(&mut self, name: &str, content: &str) -> anyhow::Result<()> {
        std::fs::write(self.scratch_path(name), content)
            .with_context(|| format!("Unable to write scratch copy for {}", name))?;

        self.for_addition.insert(name.to_string());
        self.for_removal.remove(name);

        Ok(())
    }

    /// Drop a pending addition and its scratch copy
    pub fn unstage_addition(&mut self, name: &str) -> anyhow::Result<()> {
        self.for_addition.remove(name);

        let scratch = self.scratch_path(name);
        if scratch.exists() {
            std::fs::remove_file(&scratch)
                .with_context(|| format!("Unable to delete scratch copy for {}", name))?;
        }

        Ok(())
    }

    /// Stage a file for removal
    pub fn stage_removal(&mut self, name: &str) {
        self.for_removal.insert(name.to_string());
        self.for_addition.remove(name);
    }

    /// Drop a pending removal (the `add`-undoes-`rm` path)
    pub fn clear_removal(&mut self, name: &str) {
        self.for_removal.remove(name);
    }

    /// Read back the exact bytes staged for a filename
    pub fn scratch_content(&self, name: &str) -> anyhow::Result<String> {
        std::fs::read_to_string(self.scratch_path(name))
            .with_context(|| format!("Unable to read scratch copy for {}", name))
    }

    fn scratch_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Empty the whole area: every scratch copy, both trackers, both sets
    pub fn clear(&mut self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(self.path())? {
            let entry = entry?;
            if entry.path().is_file() {
                std::fs::remove_file(entry.path()).with_context(|| {
                    format!("Unable to clear staged file {:?}", entry.path())
                })?;
            }
        }

        self.for_addition.clear();
        self.for_removal.clear();
        self.write_updates()
    }

    fn read_tracker(&self, tracker: &str) -> anyhow::Result<BTreeSet<String>> {
        let tracker_path = self.path.join(tracker);

        if !tracker_path.exists() {
            return Ok(BTreeSet::new());
        }

        let content = std::fs::read_to_string(&tracker_path)
            .with_context(|| format!("Unable to read tracker file {}", tracker))?;

        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Overwrite a tracker file under an exclusive advisory lock
    fn write_tracker(&self, tracker: &str, names: &BTreeSet<String>) -> anyhow::Result<()> {
        let tracker_path = self.path.join(tracker);

        let mut tracker_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tracker_path)
            .with_context(|| format!("failed to open tracker file at {:?}", tracker_path))?;
        let mut lock = file_guard::lock(&mut tracker_file, Lock::Exclusive, 0, 1)?;

        let content = names.iter().cloned().collect::<Vec<_>>().join("\n");
        lock.deref_mut().write_all(content.as_bytes())?;

        Ok(())
    }
}
