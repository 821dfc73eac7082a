//! Task entity and persisted-state reconstruction.

use super::{StagedUpdate, TaskId};
use serde::Serialize;

/// The unit of work managed by this service.
///
/// A task starts life without an identifier; the store assigns one on first
/// save and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: Option<TaskId>,
    title: String,
    description: String,
    completed: bool,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted completion flag.
    pub completed: bool,
}

impl Task {
    /// Creates an unpersisted task; `completed` starts out `false`.
    #[must_use]
    pub const fn new(title: String, description: String) -> Self {
        Self {
            id: None,
            title,
            description,
            completed: false,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: Some(data.id),
            title: data.title,
            description: data.description,
            completed: data.completed,
        }
    }

    /// Returns the store-assigned identifier, absent until first save.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Applies a fully validated set of staged changes in one step.
    ///
    /// Fields the update does not carry are left untouched.
    pub fn apply(&mut self, update: StagedUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
    }
}
