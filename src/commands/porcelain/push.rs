use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

impl Repository {
    /// Publish this repository's branch histories into a remote one
    ///
    /// The remote is bootstrapped on first push. Every digest newly
    /// appended to a remote branch gets its commit record copied over,
    /// along with the blobs the record's `files` map references. Digests
    /// whose objects are absent locally still sync as bare history
    /// entries.
    pub fn push(&mut self, remote: &Repository) -> anyhow::Result<()> {
        if !remote.is_initialized() {
            remote.bootstrap()?;
        }

        let appended = self.branches().reconcile_into(remote.branches())?;

        for commit_id in &appended {
            if !self.database().copy_object_into(commit_id, remote.database())? {
                continue;
            }

            let payload = remote.database().load(commit_id)?;
            let commit = Commit::from_payload(&payload)?;
            for blob_id in commit.files().values() {
                self.database().copy_object_into(blob_id, remote.database())?;
            }
        }

        writeln!(
            self.writer(),
            "Pushed changes to {}",
            remote.path().display()
        )?;

        Ok(())
    }
}
