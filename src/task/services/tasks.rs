//! Service layer for the task CRUD workflow.
//!
//! The only layer with nontrivial conditional logic: field validation with
//! accumulated violations, duplicate-title checks, and staged partial-update
//! application. Persistence is delegated entirely to the repository port.

use crate::task::{
    domain::{CompletedPatch, StagedUpdate, Task, TaskId, TaskPatch, Violations},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Violation message for a missing or blank title at creation.
const TITLE_REQUIRED: &str = "Title is required";

/// Violation message for a missing or blank description at creation.
const DESCRIPTION_REQUIRED: &str = "Description is required";

/// Violation message for an empty title in a patch.
const TITLE_EMPTY: &str = "Title cannot be empty";

/// Violation message for an empty description in a patch.
const DESCRIPTION_EMPTY: &str = "Description cannot be empty";

/// Violation message for a non-boolean completion value in a patch.
const COMPLETED_NOT_BOOLEAN: &str = "Completed must be a boolean value.";

/// Request payload for creating a task.
///
/// Both fields are optional at this level so that absent and blank input
/// produce the same validation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: Option<String>,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with both fields present.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    /// Creates a request from fields as received off the wire.
    #[must_use]
    pub const fn from_parts(title: Option<String>, description: Option<String>) -> Self {
        Self { title, description }
    }
}

/// Which operation failed to locate its task; selects the not-found wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTaskAction {
    /// A plain lookup failed.
    Found,
    /// An update failed to locate its target.
    Updated,
    /// A delete failed to locate its target.
    Deleted,
}

impl fmt::Display for MissingTaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "found",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// One or more fields failed validation.
    #[error("{0}")]
    Validation(Violations),

    /// Another task already holds the requested title.
    #[error("Task Title already exists.")]
    DuplicateTitle,

    /// The referenced task does not exist.
    #[error("Task with ID: {id} couldn't be {action}. Task doesn't exist.")]
    NotFound {
        /// Identifier the caller supplied.
        id: TaskId,
        /// Operation that failed to locate the task.
        action: MissingTaskAction,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task CRUD orchestration service.
#[derive(Clone)]
pub struct TaskService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a task from the given input.
    ///
    /// Both fields are validated independently and every violation is
    /// reported in one pass. The stored values are the raw inputs; trimming
    /// is applied only for the blank check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when a field is absent or
    /// blank, [`TaskServiceError::DuplicateTitle`] when the title is already
    /// taken, and [`TaskServiceError::Repository`] on persistence failure.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let mut violations = Violations::new();
        let (Some(title), Some(description)) = (
            require_field(request.title, "title", TITLE_REQUIRED, &mut violations),
            require_field(
                request.description,
                "description",
                DESCRIPTION_REQUIRED,
                &mut violations,
            ),
        ) else {
            return Err(TaskServiceError::Validation(violations));
        };

        if self.repository.exists_by_title(&title).await? {
            return Err(TaskServiceError::DuplicateTitle);
        }

        let task = Task::new(title, description);
        self.repository.save(&task).await.map_err(|err| match err {
            // The store stays authoritative for uniqueness; a pre-check race
            // surfaces as the same conflict.
            TaskRepositoryError::DuplicateTitle(_) => TaskServiceError::DuplicateTitle,
            other => TaskServiceError::Repository(other),
        })
    }

    /// Returns every persisted task in store-native order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn list(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks: TaskRepositoryResult<Vec<Task>> = self.repository.find_all().await;
        Ok(tasks?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given
    /// identifier.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound {
                id,
                action: MissingTaskAction::Found,
            })
    }

    /// Applies a partial update to an existing task.
    ///
    /// The lookup runs before any validation, so a missing task is reported
    /// as not-found even when the patch is also invalid. All field checks
    /// run before anything is applied: either every staged change is
    /// persisted or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist
    /// and [`TaskServiceError::Validation`] with every accumulated violation
    /// when any patched field is invalid.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskServiceResult<Task> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Err(TaskServiceError::NotFound {
                id,
                action: MissingTaskAction::Updated,
            });
        };

        let mut violations = Violations::new();
        let staged = self.stage_changes(&task, patch, &mut violations).await?;
        if !violations.is_empty() {
            return Err(TaskServiceError::Validation(violations));
        }

        task.apply(staged);
        self.repository.save(&task).await.map_err(|err| match err {
            TaskRepositoryError::DuplicateTitle(taken) => {
                TaskServiceError::Validation(Violations::single("title", title_taken_message(&taken)))
            }
            other => TaskServiceError::Repository(other),
        })
    }

    /// Deletes a task and returns the acknowledgment message.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given
    /// identifier.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<String> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(TaskServiceError::NotFound {
                id,
                action: MissingTaskAction::Deleted,
            });
        }
        self.repository.delete_by_id(id).await?;
        Ok(format!("Deleted Task with ID: {id}"))
    }

    /// Validates each patched field against the current task, recording
    /// violations and staging the values that passed.
    ///
    /// Nothing is applied here; the caller commits the staged set only when
    /// the violation set stays empty. Renaming a task to its own current
    /// title never consults the store.
    async fn stage_changes(
        &self,
        task: &Task,
        patch: TaskPatch,
        violations: &mut Violations,
    ) -> TaskServiceResult<StagedUpdate> {
        let mut staged = StagedUpdate::default();

        if let Some(title) = patch.title {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                violations.record("title", TITLE_EMPTY);
            } else if trimmed != task.title() && self.repository.exists_by_title(trimmed).await? {
                violations.record("title", title_taken_message(trimmed));
            } else {
                staged.title = Some(trimmed.to_owned());
            }
        }

        if let Some(description) = patch.description {
            let trimmed = description.trim();
            if trimmed.is_empty() {
                violations.record("description", DESCRIPTION_EMPTY);
            } else {
                staged.description = Some(trimmed.to_owned());
            }
        }

        match patch.completed {
            Some(CompletedPatch::Flag(flag)) => staged.completed = Some(flag),
            Some(CompletedPatch::NotABoolean) => {
                violations.record("completed", COMPLETED_NOT_BOOLEAN);
            }
            None => {}
        }

        Ok(staged)
    }
}

/// Returns the value when present and non-blank, recording the violation
/// otherwise.
fn require_field(
    value: Option<String>,
    field: &str,
    message: &str,
    violations: &mut Violations,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            violations.record(field, message);
            None
        }
    }
}

/// Formats the duplicate-title violation reported by update requests.
fn title_taken_message(title: &str) -> String {
    format!("Title with name: {title} already exists.")
}
