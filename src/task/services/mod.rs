//! Application services for task management.

mod tasks;

pub use tasks::{
    CreateTaskRequest, MissingTaskAction, TaskService, TaskServiceError, TaskServiceResult,
};
