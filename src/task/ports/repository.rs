//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The store is the final authority on title uniqueness: [`save`] must
/// reject a duplicate title even when the caller's own existence pre-check
/// passed moments earlier.
///
/// [`save`]: TaskRepository::save
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns `true` iff a persisted task has exactly this title.
    async fn exists_by_title(&self, title: &str) -> TaskRepositoryResult<bool>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all persisted tasks in store-native order.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists the task and returns the stored state.
    ///
    /// Inserts when the task has no identifier yet, assigning one; updates
    /// the existing row otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTitle`] when persisting would
    /// violate title uniqueness and [`TaskRepositoryError::NotFound`] when
    /// updating a task that no longer exists.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Removes the task with the given identifier.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persisting would give two tasks the same title.
    #[error("duplicate task title: {0}")]
    DuplicateTitle(String),

    /// The task targeted by an update does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
