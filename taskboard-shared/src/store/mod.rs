//! Task storage
//!
//! `TaskStore` is the seam between the HTTP layer and persistence. The API
//! server receives an `Arc<dyn TaskStore>` at startup, so handlers never
//! touch a global pool and tests can swap in [`MemoryTaskStore`].
//!
//! # Backends
//!
//! - [`PgTaskStore`]: PostgreSQL via sqlx, parameterized statements only
//! - [`MemoryTaskStore`]: in-process backend with the same semantics
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::models::{NewTask, TaskFilter};
//! use taskboard_shared::store::{MemoryTaskStore, TaskStore};
//!
//! # async fn example() -> Result<(), taskboard_shared::store::StoreError> {
//! let store = MemoryTaskStore::new();
//!
//! let task = store.insert(NewTask {
//!     title: "Buy milk".to_string(),
//!     description: None,
//! }).await?;
//!
//! let open = store.list(TaskFilter::Incomplete).await?;
//! assert_eq!(open[0].id, task.id);
//! # Ok(())
//! # }
//! ```

mod memory;
mod postgres;

pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

use crate::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
use async_trait::async_trait;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure reported by sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row violated a table constraint
    #[error("Constraint violation: {0}")]
    Constraint(&'static str),

    /// Failure inside a non-SQL backend
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for tasks
///
/// Lookups that can miss return `Ok(None)`; `Err` is reserved for failures
/// of the store itself.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task and returns the stored row with its generated `id`
    /// and `created_at`
    async fn insert(&self, task: NewTask) -> StoreResult<Task>;

    /// Lists tasks matching `filter`, newest first
    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>>;

    /// Finds a task by ID
    async fn get(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Replaces title, description and completed in one step
    async fn update(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>>;

    /// Removes a task and returns the deleted row
    async fn delete(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> StoreResult<()>;
}
