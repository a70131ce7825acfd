//! Commit record
//!
//! A commit is a full snapshot of the staging index at commit time,
//! not a delta against the previous commit.
//!
//! ## Format
//!
//! Stored as an object whose payload is canonical JSON:
//!
//! ```text
//! {"message": <string>, "timestamp": <unix-seconds>, "files": {<path>: <digest>, ...}}
//! ```
//!
//! Field order is fixed by declaration order and `files` keys are sorted
//! by the map itself, so the same logical commit always serializes to the
//! same bytes and therefore the same digest.

use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of the index with a message and a wall-clock timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Commit {
    message: String,
    timestamp: i64,
    files: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    /// First line of the message, for human-facing output
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or_default().to_string()
    }

    /// Parse a commit record back out of a stored object payload
    pub fn from_payload(payload: &[u8]) -> anyhow::Result<Self> {
        serde_json::from_slice(payload).context("Unable to parse commit record")
    }
}

impl Object for Commit {
    fn payload(&self) -> anyhow::Result<Bytes> {
        let record = serde_json::to_vec(self).context("Unable to serialize commit record")?;
        Ok(Bytes::from(record))
    }
}
