//! Staging index
//!
//! The index tracks which files go into the next commit, as a flat
//! path → digest mapping persisted to `index.json`. It represents "what
//! would be committed right now".
//!
//! The index is deliberately NOT cleared after a commit: later commits
//! carry every previously staged path forward unless it is overwritten,
//! so a commit is always a full snapshot, never a delta.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use fake::rand;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Staging index: staged files mapped to the digests of their content
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index.json`)
    path: Box<Path>,
    /// Staged files mapped by path
    entries: BTreeMap<String, ObjectId>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the index has ever been persisted
    pub fn is_persisted(&self) -> bool {
        self.path.exists()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// A missing index file means an empty index; unparseable JSON is a
    /// `MalformedStore` error rather than a silent reset.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.entries = serde_json::from_reader(&**lock).map_err(|e| RepoError::MalformedStore {
            file: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Stage a file, overwriting any previous digest for the same path
    pub fn upsert(&mut self, file_path: String, object_id: ObjectId) {
        self.entries.insert(file_path, object_id);
        self.changed = true;
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    /// Persist the whole index as JSON
    ///
    /// Writes to a temp file in the same directory and renames it into
    /// place, holding an exclusive lock on the temp file while writing.
    /// A no-op when nothing changed since loading.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let index_dir = self
            .path
            .parent()
            .context(format!("Invalid index path {}", self.path.display()))?;
        let temp_index_path = index_dir.join(format!("tmp-index-{}", rand::random::<u32>()));

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_index_path)
            .context(format!(
                "Unable to open index file {}",
                temp_index_path.display()
            ))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let content =
            serde_json::to_vec(&self.entries).context("Unable to serialize the index")?;
        lock.deref_mut().write_all(&content).context(format!(
            "Unable to write index file {}",
            temp_index_path.display()
        ))?;
        drop(lock);

        std::fs::rename(&temp_index_path, self.path()).context(format!(
            "Unable to rename index file to {}",
            self.path.display()
        ))?;
        self.changed = false;

        Ok(())
    }
}
