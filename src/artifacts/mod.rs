//! Core data structures
//!
//! - `branch`: Validated branch names
//! - `objects`: Content-addressed object types (blob, commit record)

pub mod branch;
pub mod objects;
