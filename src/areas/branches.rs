//! Branch store and HEAD
//!
//! Branches are named, append-only, oldest-first lists of commit digests,
//! persisted together in `branches.json`. HEAD is a one-line symbolic
//! reference (`ref: refs/heads/<branch>`) naming the active branch.
//!
//! HEAD is resolved lazily: nothing validates that the named branch exists
//! until a read needs it. A HEAD that names a branch missing from the
//! store is a structural inconsistency (`InconsistentHead`), distinct from
//! the ordinary "branch does not exist" condition hit when switching.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Branch name → ordered commit digests, oldest first
pub type BranchHistories = BTreeMap<BranchName, Vec<ObjectId>>;

/// Regex pattern for parsing the HEAD symbolic reference
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// File storing every branch's commit history
pub const BRANCH_FILE: &str = "branches.json";

/// File storing the active-branch pointer
pub const HEAD_FILE: &str = "HEAD";

/// Branch store manager
///
/// Owns `branches.json` and `HEAD` under a repository's `.git` directory.
#[derive(Debug)]
pub struct Branches {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Branches {
    pub fn new(path: Box<Path>) -> Self {
        Branches { path }
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCH_FILE)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    /// Write the initial HEAD and branch store: `main` with no commits
    pub fn bootstrap(&self) -> anyhow::Result<()> {
        self.set_head(&BranchName::main())?;

        let mut branches = BranchHistories::new();
        branches.insert(BranchName::main(), Vec::new());
        self.save(&branches)
    }

    /// Load every branch's history
    ///
    /// Unparseable JSON is a `MalformedStore` error; a missing file is an
    /// I/O error since `init` always creates the store.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the branch file during reading.
    pub fn load(&self) -> anyhow::Result<BranchHistories> {
        let branches_path = self.branches_path();
        let mut branches_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&branches_path)
            .context(format!(
                "Unable to read branch file {}",
                branches_path.display()
            ))?;
        let lock = file_guard::lock(&mut branches_file, file_guard::Lock::Shared, 0, 1)?;

        let branches =
            serde_json::from_reader(&**lock).map_err(|e| RepoError::MalformedStore {
                file: branches_path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok(branches)
    }

    /// Persist every branch's history
    ///
    /// Writes to a temp file and renames it into place, holding an
    /// exclusive lock on the temp file while writing.
    pub fn save(&self, branches: &BranchHistories) -> anyhow::Result<()> {
        let temp_branches_path = self
            .path
            .join(format!("tmp-branches-{}", rand::random::<u32>()));

        let mut branches_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_branches_path)
            .context(format!(
                "Unable to open branch file {}",
                temp_branches_path.display()
            ))?;
        let mut lock = file_guard::lock(&mut branches_file, file_guard::Lock::Exclusive, 0, 1)?;

        let content = serde_json::to_vec(branches).context("Unable to serialize branches")?;
        lock.deref_mut().write_all(&content).context(format!(
            "Unable to write branch file {}",
            temp_branches_path.display()
        ))?;
        drop(lock);

        std::fs::rename(&temp_branches_path, self.branches_path()).context(format!(
            "Unable to rename branch file to {}",
            self.branches_path().display()
        ))?;

        Ok(())
    }

    /// Read the active branch name out of HEAD
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .context(format!("Unable to read {}", head_path.display()))?;

        let malformed = |reason: String| RepoError::MalformedStore {
            file: head_path.display().to_string(),
            reason,
        };

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(content.trim())
            .ok_or_else(|| malformed("not a symbolic reference".to_string()))?;

        BranchName::try_parse(symref_match[1].to_string())
            .map_err(|e| malformed(e.to_string()).into())
    }

    /// Repoint HEAD at a branch, without checking that it exists
    fn set_head(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let head_path = self.head_path();
        std::fs::write(&head_path, format!("ref: refs/heads/{branch_name}\n"))
            .context(format!("Unable to write {}", head_path.display()))?;

        Ok(())
    }

    /// Append a commit digest to the active branch's history
    ///
    /// # Returns
    ///
    /// The branch the digest landed on. HEAD naming a branch absent from
    /// the store is surfaced as `InconsistentHead`, never papered over by
    /// creating the branch.
    pub fn append_commit(&self, object_id: ObjectId) -> anyhow::Result<BranchName> {
        let current_branch = self.current_branch()?;
        let mut branches = self.load()?;

        let history = branches
            .get_mut(&current_branch)
            .ok_or_else(|| RepoError::InconsistentHead(current_branch.to_string()))?;
        history.push(object_id);

        self.save(&branches)?;

        Ok(current_branch)
    }

    /// Create a branch as a copy of the active branch's history
    ///
    /// The new branch gets its own list: later commits to either branch
    /// leave the other untouched. An existing name is rejected with
    /// `BranchExists` unless `overwrite` is set.
    pub fn create_branch(&self, branch_name: &BranchName, overwrite: bool) -> anyhow::Result<()> {
        let current_branch = self.current_branch()?;
        let mut branches = self.load()?;

        if !overwrite && branches.contains_key(branch_name) {
            return Err(RepoError::BranchExists(branch_name.to_string()).into());
        }

        let history = branches
            .get(&current_branch)
            .ok_or_else(|| RepoError::InconsistentHead(current_branch.to_string()))?
            .clone();
        branches.insert(branch_name.clone(), history);

        self.save(&branches)
    }

    /// Repoint HEAD at an existing branch
    ///
    /// An unknown name is `UnknownBranch` and HEAD stays where it was.
    pub fn switch_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        let branches = self.load()?;

        if !branches.contains_key(branch_name) {
            return Err(RepoError::UnknownBranch(branch_name.to_string()).into());
        }

        self.set_head(branch_name)
    }

    /// Reconcile this store's histories into a remote store
    ///
    /// For every local branch: digests missing from the same-named remote
    /// branch are appended in local relative order, existing remote
    /// entries keep their positions, and branches absent remotely are
    /// copied verbatim. Re-running with no new local commits leaves the
    /// remote store byte-for-byte unchanged.
    ///
    /// # Returns
    ///
    /// The digests newly appended on the remote side, so the caller can
    /// propagate the objects they reference.
    pub fn reconcile_into(&self, remote: &Branches) -> anyhow::Result<Vec<ObjectId>> {
        let local_branches = self.load()?;
        let mut remote_branches = remote.load()?;
        let mut appended = Vec::new();

        for (branch_name, history) in local_branches {
            match remote_branches.get_mut(&branch_name) {
                Some(remote_history) => {
                    for object_id in history {
                        if !remote_history.contains(&object_id) {
                            remote_history.push(object_id.clone());
                            appended.push(object_id);
                        }
                    }
                }
                None => {
                    appended.extend(history.iter().cloned());
                    remote_branches.insert(branch_name, history);
                }
            }
        }

        remote.save(&remote_branches)?;

        Ok(appended)
    }
}
