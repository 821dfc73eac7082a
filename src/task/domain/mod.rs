//! Domain model for task management.
//!
//! Pure entity, identifier, patch, and violation types with no
//! infrastructure dependencies.

mod error;
mod ids;
mod patch;
mod task;

pub use error::Violations;
pub use ids::TaskId;
pub use patch::{CompletedPatch, StagedUpdate, TaskPatch};
pub use task::{PersistedTaskData, Task};
