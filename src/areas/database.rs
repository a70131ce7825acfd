use crate::artifacts::objects::object::{Object, OBJECT_HEADER_TAG};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store
///
/// Objects live at `objects/<first-2-hex>/<remaining-hex>`, zlib-compressed.
/// Writes go through a temp file and an atomic rename, and an object that
/// already exists is never rewritten, so storing the same payload twice is
/// a no-op.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object, returning its digest
    ///
    /// Idempotent: identical payloads hash to the same path and the
    /// second store leaves the object set unchanged.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            let object_content = Self::compress(object.serialize()?)?;
            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    /// Load an object's payload, with the header validated and stripped
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;
        let object_content = Self::decompress(object_content.into())?;

        Self::strip_header(object_content, &object_path)
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Copy one object's compressed bytes into another store verbatim
    ///
    /// Returns false when the object is absent from this store. Used by
    /// push to propagate objects referenced by newly published commits.
    pub fn copy_object_into(
        &self,
        object_id: &ObjectId,
        target: &Database,
    ) -> anyhow::Result<bool> {
        let source_path = self.path.join(object_id.to_path());
        if !source_path.exists() {
            return Ok(false);
        }

        let target_path = target.path.join(object_id.to_path());
        if !target_path.exists() {
            let object_content = std::fs::read(&source_path).context(format!(
                "Unable to read object file {}",
                source_path.display()
            ))?;
            target.write_object(target_path, object_content.into())?;
        }

        Ok(true)
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;

        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn strip_header(content: Bytes, object_path: &Path) -> anyhow::Result<Bytes> {
        let malformed = |reason: &str| RepoError::MalformedStore {
            file: object_path.display().to_string(),
            reason: reason.to_string(),
        };

        let separator = content
            .iter()
            .position(|byte| *byte == b'\0')
            .ok_or_else(|| malformed("missing header separator"))?;

        let header = std::str::from_utf8(&content[..separator])
            .map_err(|_| malformed("header is not valid UTF-8"))?;
        let size = header
            .strip_prefix(&format!("{OBJECT_HEADER_TAG} "))
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| malformed("unparseable object header"))?;

        let payload = content.slice(separator + 1..);
        if payload.len() != size {
            return Err(malformed("header size does not match payload").into());
        }

        Ok(payload)
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use proptest::prelude::*;

    fn temp_database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        (dir, database)
    }

    fn object_set(database: &Database) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        let Ok(dirs) = std::fs::read_dir(database.objects_path()) else {
            return paths;
        };
        for dir in dirs.flatten() {
            for entry in std::fs::read_dir(dir.path()).unwrap().flatten() {
                paths.push(entry.path());
            }
        }
        paths.sort();
        paths
    }

    #[test]
    fn known_content_hashes_to_the_git_blob_digest() {
        let (_dir, database) = temp_database();
        let oid = database.store(&Blob::new(Bytes::from_static(b"hello"))).unwrap();

        // printf 'hello' | git hash-object --stdin
        assert_eq!(oid.as_ref(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
    }

    #[test]
    fn load_rejects_a_corrupt_header() {
        let (_dir, database) = temp_database();
        let oid = database.store(&Blob::new(Bytes::from_static(b"hello"))).unwrap();

        let object_path = database.objects_path().join(oid.to_path());
        let garbage = Database::compress(Bytes::from_static(b"not a header")).unwrap();
        std::fs::write(&object_path, &garbage).unwrap();

        let error = database.load(&oid).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<RepoError>(),
            Some(RepoError::MalformedStore { .. })
        ));
    }

    #[test]
    fn copies_objects_between_stores() {
        let (_dir, local) = temp_database();
        let (_remote_dir, remote) = temp_database();

        let oid = local.store(&Blob::new(Bytes::from_static(b"hello"))).unwrap();
        assert!(local.copy_object_into(&oid, &remote).unwrap());

        assert!(remote.contains(&oid));
        assert_eq!(remote.load(&oid).unwrap(), Bytes::from_static(b"hello"));

        let absent = ObjectId::try_parse("0".repeat(40)).unwrap();
        assert!(!local.copy_object_into(&absent, &remote).unwrap());
    }

    proptest! {
        #[test]
        fn stored_payloads_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let (_dir, database) = temp_database();
            let oid = database.store(&Blob::new(Bytes::from(payload.clone()))).unwrap();

            prop_assert_eq!(database.load(&oid).unwrap(), Bytes::from(payload));
        }

        #[test]
        fn storing_twice_is_idempotent(payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let (_dir, database) = temp_database();
            let blob = Blob::new(Bytes::from(payload));

            let first = database.store(&blob).unwrap();
            let objects_after_first = object_set(&database);
            let second = database.store(&blob).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(object_set(&database), objects_after_first);
        }
    }
}
