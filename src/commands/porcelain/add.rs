use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn add(&mut self, file_path: &str) -> anyhow::Result<()> {
        let data = self.workspace().read_file(Path::new(file_path))?;

        // the blob is written before the index references it
        let blob = Blob::new(data);
        let blob_id = self.database().store(&blob)?;

        let mut index = self.index();
        index.rehydrate()?;
        index.upsert(file_path.to_string(), blob_id.clone());
        index.write_updates()?;
        drop(index);

        writeln!(
            self.writer(),
            "Added {} to index with hash {}",
            file_path,
            blob_id
        )?;

        Ok(())
    }
}
