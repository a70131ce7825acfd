use crate::areas::repository::Repository;
use crate::errors::RepoError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        // already-initialized is reported, not fatal, and changes nothing
        if self.is_initialized() {
            let condition = RepoError::AlreadyInitialized(self.path().display().to_string());
            writeln!(self.writer(), "{condition}")?;
            return Ok(());
        }

        self.bootstrap()?;

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.path().display()
        )?;

        Ok(())
    }

    /// Create the on-disk repository structure, silently
    ///
    /// Shared by `init` and by `push` when it lazily creates the remote.
    pub(crate) fn bootstrap(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        self.branches()
            .bootstrap()
            .context("Failed to create initial HEAD and branch store")?;

        Ok(())
    }
}
