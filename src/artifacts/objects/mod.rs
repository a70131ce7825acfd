//! Content-addressed objects
//!
//! Every object is stored under the SHA-1 of its serialized form:
//! `blob <size>\0<payload>`. Two kinds of payload exist:
//!
//! - **Blob**: raw file content staged by `add`
//! - **Commit**: a canonical JSON record `{message, timestamp, files}`
//!
//! Both go through the same header and the same hash, so identical
//! payloads always collapse to a single stored object.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
