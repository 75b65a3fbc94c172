#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryProgressStore, ProgressRecord, ProgressStore, StorageError};
pub use sqlite::{SqliteInitError, SqliteProgressStore};
