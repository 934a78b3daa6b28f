use async_trait::async_trait;
use exam_core::model::{ExamIdentity, ExamResult, SessionProgress};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable store for in-flight session progress, keyed by the identity triple.
///
/// Writes unconditionally overwrite the prior record for the same identity;
/// exactly one session instance exists per identity at a time, so no
/// optimistic concurrency control is needed. Staleness is a policy of the
/// service layer, not the substrate — repositories return whatever is stored.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Persist or replace the progress record for an identity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(
        &self,
        identity: &ExamIdentity,
        progress: &SessionProgress,
    ) -> Result<(), StorageError>;

    /// Fetch the stored progress for an identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; absence is `Ok(None)`.
    async fn load_progress(
        &self,
        identity: &ExamIdentity,
    ) -> Result<Option<SessionProgress>, StorageError>;

    /// Remove the stored progress for an identity. Removing an absent record
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn clear_progress(&self, identity: &ExamIdentity) -> Result<(), StorageError>;
}

/// Ephemeral, single-consumer handoff of a submitted result from the exam
/// flow to the results flow.
#[async_trait]
pub trait ResultHandoffRepository: Send + Sync {
    /// Store the submitted result, replacing any prior one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn put_result(&self, result: &ExamResult) -> Result<(), StorageError>;

    /// Take the stored result, removing it so it is consumed exactly once.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; absence is `Ok(None)`.
    async fn take_result(&self) -> Result<Option<ExamResult>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<String, SessionProgress>>>,
    result: Arc<Mutex<Option<ExamResult>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn save_progress(
        &self,
        identity: &ExamIdentity,
        progress: &SessionProgress,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(identity.progress_key(), progress.clone());
        Ok(())
    }

    async fn load_progress(
        &self,
        identity: &ExamIdentity,
    ) -> Result<Option<SessionProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&identity.progress_key()).cloned())
    }

    async fn clear_progress(&self, identity: &ExamIdentity) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&identity.progress_key());
        Ok(())
    }
}

#[async_trait]
impl ResultHandoffRepository for InMemoryRepository {
    async fn put_result(&self, result: &ExamResult) -> Result<(), StorageError> {
        let mut guard = self
            .result
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(result.clone());
        Ok(())
    }

    async fn take_result(&self) -> Result<Option<ExamResult>, StorageError> {
        let mut guard = self
            .result
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.take())
    }
}

/// Aggregates the progress and handoff repositories behind trait objects for
/// easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub results: Arc<dyn ResultHandoffRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultHandoffRepository> = Arc::new(repo);
        Self { progress, results }
    }
}
