//! Blob object
//!
//! Blobs store staged file content: raw bytes, no name, no metadata.
//! Identical content always hashes to the same blob, however many paths
//! reference it.

use crate::artifacts::objects::object::Object;
use bytes::Bytes;
use derive_new::new;

/// File content as staged by `add`
#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Object for Blob {
    fn payload(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_length_prefixed_header() {
        let blob = Blob::new(Bytes::from_static(b"hello"));
        assert_eq!(blob.serialize().unwrap(), Bytes::from_static(b"blob 5\0hello"));
    }

    #[test]
    fn identical_content_hashes_identically() {
        let a = Blob::new(Bytes::from_static(b"hello"));
        let b = Blob::new(Bytes::from_static(b"hello"));
        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
    }
}
