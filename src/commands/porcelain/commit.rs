use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::RepoError;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut index = self.index();

        // no persisted index yet means nothing staged; reported, not fatal
        if !index.is_persisted() {
            drop(index);
            writeln!(self.writer(), "{}", RepoError::NothingToCommit)?;
            return Ok(());
        }

        index.rehydrate()?;
        if index.is_empty() {
            drop(index);
            writeln!(self.writer(), "{}", RepoError::NothingToCommit)?;
            return Ok(());
        }

        // the commit snapshots the whole index; the index itself is kept
        // as-is, so the next commit carries these paths forward too
        let timestamp = chrono::Utc::now().timestamp();
        let commit = Commit::new(
            message.trim().to_string(),
            timestamp,
            index.entries().clone(),
        );
        drop(index);

        let commit_id = self.database().store(&commit)?;
        let branch = self.branches().append_commit(commit_id.clone())?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            branch,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
