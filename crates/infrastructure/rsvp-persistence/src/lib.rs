//! Best-effort persistence for the registration flow's display snapshot.

pub mod api;
pub mod error;
pub mod file_store;

pub use api::{Snapshot, SnapshotStore};
pub use error::StorageError;
pub use file_store::FileSnapshotStore;
