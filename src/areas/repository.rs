use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::Staging;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository state directory
pub const STATE_DIR: &str = ".nit";

/// Explicit repository context.
///
/// All components take this handle instead of relying on process-wide
/// state, so multiple repositories can coexist in one process (tests
/// rely on this). Durable state is read fresh from disk per command;
/// nothing here caches across invocations.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    staging: RefCell<Staging>,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let state_path = path.join(STATE_DIR);

        let database = Database::new(state_path.clone().into_boxed_path());
        let refs = Refs::new(state_path.clone().into_boxed_path());
        let staging = Staging::new(state_path.join("staging").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
            staging: RefCell::new(staging),
            workspace,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state_path(&self) -> PathBuf {
        self.path.join(STATE_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.state_path().exists()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn staging(&'_ self) -> RefMut<'_, Staging> {
        self.staging.borrow_mut()
    }

    /// Load the commit the active branch points to
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let branch_name = self.refs.read_head()?;
        let commit_id = self
            .refs
            .read_branch(&branch_name)?
            .with_context(|| format!("branch {} does not point to a commit", branch_name))?;

        self.database.load_commit(&commit_id)
    }

    /// Whether the given content matches the blob a commit records for
    /// that filename
    pub fn file_matches_commit(
        &self,
        commit: &Commit,
        name: &str,
        content: &str,
    ) -> anyhow::Result<bool> {
        match commit.blob_id(name) {
            None => Ok(false),
            Some(recorded) => {
                let blob_id = Blob::new(name.to_string(), content.to_string()).object_id()?;
                Ok(*recorded == blob_id)
            }
        }
    }
}
