//! Task endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::sync::Arc;

use crate::task::{
    domain::{Task, TaskId, TaskPatch},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, TaskServiceError},
};

/// Builds the task routes over the given service.
pub fn router<R>(service: TaskService<R>) -> Router
where
    R: TaskRepository + 'static,
{
    Router::new()
        .route("/tasks", get(list_tasks::<R>).post(create_task::<R>))
        .route(
            "/tasks/:id",
            get(get_task::<R>)
                .put(update_task::<R>)
                .delete(delete_task::<R>),
        )
        .with_state(Arc::new(service))
}

/// Service error wrapper carrying the HTTP translation.
#[derive(Debug)]
struct ApiError(TaskServiceError);

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            TaskServiceError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            err @ TaskServiceError::DuplicateTitle => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            err @ TaskServiceError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            TaskServiceError::Repository(err) => {
                tracing::error!("repository failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Unexpected server error." })),
                )
                    .into_response()
            }
        }
    }
}

/// POST /tasks - create a task.
async fn create_task<R: TaskRepository + 'static>(
    State(service): State<Arc<TaskService<R>>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks - list all tasks.
async fn list_tasks<R: TaskRepository + 'static>(
    State(service): State<Arc<TaskService<R>>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(service.list().await?))
}

/// GET /tasks/:id - fetch one task.
async fn get_task<R: TaskRepository + 'static>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(service.get(TaskId::from_i64(id)).await?))
}

/// PUT /tasks/:id - partially update a task.
async fn update_task<R: TaskRepository + 'static>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(service.update(TaskId::from_i64(id), patch).await?))
}

/// DELETE /tasks/:id - delete a task.
async fn delete_task<R: TaskRepository + 'static>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let message = service.delete(TaskId::from_i64(id)).await?;
    Ok(Json(json!({ "success": message })))
}
