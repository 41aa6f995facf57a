/// Schema bootstrap
///
/// Creates the `tasks` table when it does not exist yet. This is a single
/// idempotent statement run at startup, not a versioned migration runner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS tasks (
///     id SERIAL PRIMARY KEY,
///     title TEXT NOT NULL CONSTRAINT tasks_title_not_empty CHECK (title <> ''),
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use sqlx::postgres::PgPool;
use tracing::info;

/// Name of the check constraint that keeps titles non-empty
pub const TITLE_NOT_EMPTY_CONSTRAINT: &str = "tasks_title_not_empty";

const CREATE_TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL CONSTRAINT tasks_title_not_empty CHECK (title <> ''),
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at DESC)";

/// Ensures the `tasks` table and its ordering index exist
///
/// Safe to call on every start.
///
/// # Errors
///
/// Returns an error if the DDL statements fail
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_TASKS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_CREATED_AT_INDEX).execute(pool).await?;

    info!("Task schema is in place");
    Ok(())
}
