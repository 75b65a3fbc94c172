use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use tutor_core::model::{NavigationState, TutorialKey};

/// Errors surfaced by progress storage adapters.
///
/// Callers treat every variant the same way: log it and continue with
/// in-memory state. Durability is best-effort by design.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of one tutorial's progress.
///
/// This mirrors the domain `NavigationState` as plain strings so stores can
/// serialize it without leaking storage concerns into the domain layer.
/// One record exists per tutorial key; saving replaces the previous record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub tutorial: TutorialKey,
    pub current_section: String,
    pub visited: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(
        tutorial: TutorialKey,
        state: &NavigationState,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tutorial,
            current_section: state.current().as_str().to_owned(),
            visited: state
                .visited()
                .iter()
                .map(|s| s.as_str().to_owned())
                .collect(),
            saved_at,
        }
    }
}

/// Durable key-value persistence of tutorial progress.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Fetch the saved record for a tutorial, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn load(&self, tutorial: &TutorialKey) -> Result<Option<ProgressRecord>, StorageError>;

    /// Persist a record, replacing any previous one for the same tutorial.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    records: Arc<Mutex<HashMap<TutorialKey, ProgressRecord>>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load(&self, tutorial: &TutorialKey) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(tutorial).cloned())
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(record.tutorial.clone(), record.clone());
        Ok(())
    }
}
