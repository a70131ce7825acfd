//! Command implementations
//!
//! One file per user-facing operation (`init`, `add`, `commit`, `push`,
//! `branch`), each extending `Repository` with the operation and writing
//! its human-facing output through the repository writer. Recoverable
//! conditions (nothing to commit, unknown branch, existing branch) are
//! reported and swallowed here; structural failures propagate.

pub mod porcelain;
