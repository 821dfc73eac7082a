//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn exists_by_title(&self, title: &str) -> TaskRepositoryResult<bool> {
        let lookup_title = title.to_owned();
        self.run_blocking(move |connection| {
            diesel::select(exists(tasks::table.filter(tasks::title.eq(lookup_title))))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let title = task.title().to_owned();
        let description = task.description().to_owned();
        let completed = task.completed();
        let task_id = task.id();

        self.run_blocking(move |connection| {
            let row = match task_id {
                None => diesel::insert_into(tasks::table)
                    .values(&NewTaskRow {
                        title: title.clone(),
                        description,
                        completed,
                    })
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map_err(|err| map_save_error(err, &title, None))?,
                Some(id) => diesel::update(tasks::table.find(id.value()))
                    .set((
                        tasks::title.eq(title.clone()),
                        tasks::description.eq(description),
                        tasks::completed.eq(completed),
                    ))
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(connection)
                    .map_err(|err| map_save_error(err, &title, Some(id)))?,
            };
            Ok(row_to_task(row))
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

/// Maps Diesel save failures onto repository errors.
///
/// The `tasks` table carries a single unique constraint (on `title`), so
/// any unique violation is a duplicate title.
fn map_save_error(err: DieselError, title: &str, id: Option<TaskId>) -> TaskRepositoryError {
    match (err, id) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
            TaskRepositoryError::DuplicateTitle(title.to_owned())
        }
        (DieselError::NotFound, Some(task_id)) => TaskRepositoryError::NotFound(task_id),
        (other, _) => TaskRepositoryError::persistence(other),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        description,
        completed,
    } = row;
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_i64(id),
        title,
        description,
        completed,
    })
}
