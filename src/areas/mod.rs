//! Persistent repository components
//!
//! - `branches`: Branch store and HEAD pointer
//! - `database`: Content-addressed object store
//! - `index`: Staging area for the next commit
//! - `repository`: High-level repository handle and coordination
//! - `workspace`: Working directory file access

pub mod branches;
pub mod database;
pub mod index;
pub mod repository;
pub mod workspace;
