//! In-memory repository for task service tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers come from a monotonically increasing counter, so
/// store-native order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Returns `true` when a task other than `own_id` already holds the title.
fn title_taken(state: &InMemoryTaskState, title: &str, own_id: Option<TaskId>) -> bool {
    state
        .tasks
        .values()
        .any(|existing| existing.title() == title && existing.id() != own_id)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn exists_by_title(&self, title: &str) -> TaskRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.values().any(|task| task.title() == title))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id.value()).cloned())
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if title_taken(&state, task.title(), task.id()) {
            return Err(TaskRepositoryError::DuplicateTitle(task.title().to_owned()));
        }

        let id = match task.id() {
            Some(existing_id) => {
                if !state.tasks.contains_key(&existing_id.value()) {
                    return Err(TaskRepositoryError::NotFound(existing_id));
                }
                existing_id
            }
            None => {
                state.next_id += 1;
                TaskId::from_i64(state.next_id)
            }
        };

        let persisted = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
        });
        state.tasks.insert(id.value(), persisted.clone());
        Ok(persisted)
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.tasks.remove(&id.value());
        Ok(())
    }
}
