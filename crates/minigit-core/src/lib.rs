//! minigit-core: in-memory version control engine.
//!
//! Tracks named text files across a tree of immutable commits, with movable
//! branch pointers, a staging area, and linear undo/redo of every
//! history-changing action. Nothing here touches the filesystem: a
//! [`Repository`] lives exactly as long as its owner keeps it.

pub mod branch;
pub mod clock;
pub mod commit;
pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod hash;
pub mod history;
pub mod repo;
pub mod snapshot;

pub use error::{RepoError, RepoResult};
pub use hash::fingerprint;
pub use repo::Repository;
pub use snapshot::Snapshot;
