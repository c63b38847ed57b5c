//! Working-tree file system operations
//!
//! The working tree is the flat set of plain files at the repository
//! root; the state directory is never listed or touched.

use crate::areas::repository::STATE_DIR;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path.join(name).is_file()
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<String> {
        std::fs::read_to_string(self.path.join(name))
            .with_context(|| format!("Unable to read working-tree file {}", name))
    }

    /// Read a file's content, or None if it does not exist
    pub fn try_read_file(&self, name: &str) -> anyhow::Result<Option<String>> {
        if !self.exists(name) {
            return Ok(None);
        }

        self.read_file(name).map(Some)
    }

    pub fn write_file(&self, name: &str, content: &str) -> anyhow::Result<()> {
        std::fs::write(self.path.join(name), content)
            .with_context(|| format!("Unable to write working-tree file {}", name))
    }

    /// Delete a file, tolerating its absence
    pub fn delete_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(name);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to delete working-tree file {}", name))?;
        }

        Ok(())
    }

    /// List all plain files at the repository root, in sorted order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(self.path.as_ref())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| self.relative_file_name(entry.path()))
            .collect::<Vec<_>>();

        files.sort();
        Ok(files)
    }

    fn relative_file_name(&self, path: &Path) -> Option<String> {
        let relative: PathBuf = path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf();
        let name = relative.to_string_lossy().to_string();

        if name == STATE_DIR {
            None
        } else {
            Some(name)
        }
    }
}
