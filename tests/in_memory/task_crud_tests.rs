//! End-to-end CRUD flows over the in-memory repository.

use std::sync::Arc;

use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskPatch},
    services::{CreateTaskRequest, TaskService, TaskServiceError},
};

type TestService = TaskService<InMemoryTaskRepository>;

#[fixture]
fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_task_lifecycle(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create(CreateTaskRequest::new("Plan sprint", "Collect and order backlog items"))
        .await
        .expect("task creation should succeed");
    let id = created.id().ok_or_else(|| eyre::eyre!("created task should carry an id"))?;

    let fetched = service.get(id).await.expect("lookup should succeed");
    eyre::ensure!(fetched == created, "fetched task should match created task");

    let patch: TaskPatch = serde_json::from_value(serde_json::json!({
        "title": "Plan next sprint",
        "completed": true,
    }))
    .expect("patch should deserialise");
    let updated = service.update(id, patch).await.expect("update should succeed");
    eyre::ensure!(updated.title() == "Plan next sprint", "title should be updated");
    eyre::ensure!(updated.completed(), "completion flag should be updated");
    eyre::ensure!(
        updated.description() == "Collect and order backlog items",
        "description should be untouched"
    );

    let message = service.delete(id).await.expect("delete should succeed");
    eyre::ensure!(
        message == format!("Deleted Task with ID: {id}"),
        "delete should acknowledge with the task id"
    );

    let missing = service.get(id).await;
    eyre::ensure!(
        matches!(missing, Err(TaskServiceError::NotFound { .. })),
        "deleted task should no longer resolve"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_reflects_creations_and_deletions(service: TestService) {
    let first = service
        .create(CreateTaskRequest::new("First", "First description"))
        .await
        .expect("first creation should succeed");
    service
        .create(CreateTaskRequest::new("Second", "Second description"))
        .await
        .expect("second creation should succeed");

    let before = service.list().await.expect("list should succeed");
    assert_eq!(before.len(), 2);

    let first_id = first.id().expect("created task should carry an id");
    service
        .delete(first_id)
        .await
        .expect("delete should succeed");

    let after = service.list().await.expect("list should succeed");
    let titles: Vec<_> = after.iter().map(Task::title).collect();
    assert_eq!(titles, vec!["Second"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn freed_title_can_be_reused_after_delete(service: TestService) {
    let original = service
        .create(CreateTaskRequest::new("Recycled", "First owner"))
        .await
        .expect("creation should succeed");
    let id = original.id().expect("created task should carry an id");
    service.delete(id).await.expect("delete should succeed");

    let reused = service
        .create(CreateTaskRequest::new("Recycled", "Second owner"))
        .await
        .expect("freed title should be accepted again");
    assert_ne!(reused.id(), original.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rename_frees_the_previous_title(service: TestService) {
    let task = service
        .create(CreateTaskRequest::new("Old name", "Description"))
        .await
        .expect("creation should succeed");
    let id = task.id().expect("created task should carry an id");

    let patch: TaskPatch = serde_json::from_value(serde_json::json!({ "title": "New name" }))
        .expect("patch should deserialise");
    service.update(id, patch).await.expect("rename should succeed");

    service
        .create(CreateTaskRequest::new("Old name", "Another description"))
        .await
        .expect("previous title should be free after the rename");
}
