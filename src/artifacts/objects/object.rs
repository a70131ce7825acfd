use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::PathBuf;

/// Header tag shared by every stored object
pub const OBJECT_HEADER_TAG: &str = "blob";

pub trait Object {
    /// The raw payload, before the header is attached
    fn payload(&self) -> Result<Bytes>;

    /// Serialize as `blob <size>\0<payload>`, the form that gets hashed
    /// and compressed on disk
    fn serialize(&self) -> Result<Bytes> {
        let payload = self.payload()?;

        let mut object_bytes = Vec::new();
        let header = format!("{} {}\0", OBJECT_HEADER_TAG, payload.len());
        object_bytes.write_all(header.as_bytes())?;
        object_bytes.write_all(&payload)?;

        Ok(Bytes::from(object_bytes))
    }

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}
