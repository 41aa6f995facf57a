/// PostgreSQL task store
///
/// Every value reaches the database as a bound parameter. The list query is
/// the only statement with a variable shape; it is assembled with
/// `sqlx::QueryBuilder` so the optional filter is still bound, never
/// formatted into the SQL text.

use super::{StoreError, StoreResult, TaskStore};
use crate::db::pool;
use crate::db::schema::TITLE_NOT_EMPTY_CONSTRAINT;
use crate::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

/// Task store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translates the title check violation into a typed store error
fn map_db_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(TITLE_NOT_EMPTY_CONSTRAINT) {
            return StoreError::Constraint(TITLE_NOT_EMPTY_CONSTRAINT);
        }
    }
    StoreError::Database(err)
}

/// Builds the list statement for a filter
fn list_query(filter: TaskFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    builder.push(TASK_COLUMNS).push(" FROM tasks");

    if let Some(completed) = filter.completed() {
        builder.push(" WHERE completed = ").push_bind(completed);
    }

    builder.push(" ORDER BY created_at DESC, id DESC");
    builder
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, task: NewTask) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description) VALUES ($1, $2) RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.title)
        .bind(task.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(task_id = task.id, "Inserted task");
        Ok(task)
    }

    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks = list_query(filter)
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;

        debug!(?filter, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET title = $1,
                description = $2,
                completed = $3
            WHERE id = $4
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn health_check(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}
