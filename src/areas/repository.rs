use crate::areas::branches::Branches;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub const GIT_DIR: &str = ".git";

/// Explicit handle over one repository root
///
/// Every operation receives a `Repository` (and push a second one for the
/// remote); nothing in the core assumes a process-wide current repository.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    branches: Branches,
}

impl Repository {
    /// Open a handle on a repository root, creating the directory if it
    /// does not exist yet. Nothing under `.git` is touched until `init`.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = Path::new(path).canonicalize()?;

        let git_path = path.join(GIT_DIR);
        let index = Index::new(git_path.join("index.json").into_boxed_path());
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let branches = Branches::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            branches,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    /// Whether `init` has already run against this root
    pub fn is_initialized(&self) -> bool {
        self.git_path().exists()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn branches(&self) -> &Branches {
        &self.branches
    }
}
