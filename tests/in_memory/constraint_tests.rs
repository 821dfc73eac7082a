//! Title-uniqueness constraint tests at the repository boundary.
//!
//! The service's `exists_by_title` pre-check is an early exit only; these
//! tests pin down the store as the final authority on uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{StagedUpdate, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::{CreateTaskRequest, TaskService, TaskServiceError},
};

#[fixture]
fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_rejects_duplicate_title_on_insert(repo: InMemoryTaskRepository) {
    repo.save(&Task::new("Taken".to_owned(), "First".to_owned()))
        .await
        .expect("first save should succeed");

    let result = repo
        .save(&Task::new("Taken".to_owned(), "Second".to_owned()))
        .await;

    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTitle(title)) if title == "Taken"),
        "insert with a taken title should be rejected"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_rejects_duplicate_title_on_update(repo: InMemoryTaskRepository) {
    repo.save(&Task::new("First".to_owned(), "First description".to_owned()))
        .await
        .expect("first save should succeed");
    let mut second = repo
        .save(&Task::new("Second".to_owned(), "Second description".to_owned()))
        .await
        .expect("second save should succeed");

    second.apply(StagedUpdate {
        title: Some("First".to_owned()),
        ..StagedUpdate::default()
    });
    let result = repo.save(&second).await;

    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTitle(_))),
        "renaming onto a taken title should be rejected"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_own_title_again_is_not_a_conflict(repo: InMemoryTaskRepository) {
    let mut task = repo
        .save(&Task::new("Stable".to_owned(), "Description".to_owned()))
        .await
        .expect("save should succeed");

    task.apply(StagedUpdate {
        completed: Some(true),
        ..StagedUpdate::default()
    });
    let saved = repo.save(&task).await.expect("re-save should succeed");
    assert!(saved.completed());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exists_by_title_is_an_exact_match(repo: InMemoryTaskRepository) {
    repo.save(&Task::new("Exact".to_owned(), "Description".to_owned()))
        .await
        .expect("save should succeed");

    assert!(repo.exists_by_title("Exact").await.expect("check should succeed"));
    assert!(!repo.exists_by_title("exact").await.expect("check should succeed"));
    assert!(!repo.exists_by_title(" Exact").await.expect("check should succeed"));
}

/// Repository wrapper that hides existing titles from the pre-check,
/// forcing the service onto the store-conflict path.
#[derive(Debug, Clone)]
struct BlindPreCheckRepository {
    inner: InMemoryTaskRepository,
}

#[async_trait]
impl TaskRepository for BlindPreCheckRepository {
    async fn exists_by_title(&self, _title: &str) -> TaskRepositoryResult<bool> {
        Ok(false)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_all().await
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        self.inner.save(task).await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete_by_id(id).await
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_conflict_on_create_surfaces_as_the_same_error(repo: InMemoryTaskRepository) {
    let service = TaskService::new(Arc::new(BlindPreCheckRepository { inner: repo }));

    service
        .create(CreateTaskRequest::new("Raced", "First description"))
        .await
        .expect("first creation should succeed");
    let result = service
        .create(CreateTaskRequest::new("Raced", "Second description"))
        .await;

    let Err(err) = result else {
        panic!("store-level conflict should surface");
    };
    assert!(matches!(err, TaskServiceError::DuplicateTitle));
    assert_eq!(err.to_string(), "Task Title already exists.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_conflict_on_update_surfaces_as_a_title_violation(repo: InMemoryTaskRepository) {
    let service = TaskService::new(Arc::new(BlindPreCheckRepository { inner: repo }));

    service
        .create(CreateTaskRequest::new("Held", "First description"))
        .await
        .expect("first creation should succeed");
    let second = service
        .create(CreateTaskRequest::new("Free", "Second description"))
        .await
        .expect("second creation should succeed");
    let id = second.id().expect("created task should carry an id");

    let patch: taskboard::task::domain::TaskPatch =
        serde_json::from_value(serde_json::json!({ "title": "Held" }))
            .expect("patch should deserialise");
    let result = service.update(id, patch).await;

    let Err(TaskServiceError::Validation(violations)) = result else {
        panic!("store-level conflict should surface as a validation failure");
    };
    assert_eq!(
        violations.message("title"),
        Some("Title with name: Held already exists.")
    );
}
