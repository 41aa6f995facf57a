/// In-memory task store
///
/// Mirrors the PostgreSQL backend: ids come from a counter that never goes
/// backwards, listings are newest first, and empty titles are rejected the
/// way the `tasks_title_not_empty` constraint rejects them.

use super::{StoreError, StoreResult, TaskStore};
use crate::db::schema::TITLE_NOT_EMPTY_CONSTRAINT;
use crate::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

/// Task store that keeps rows in process memory
///
/// Cloning shares the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryTaskStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.tasks.len()).unwrap_or(0)
    }

    /// Whether the store holds no tasks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("task store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: NewTask) -> StoreResult<Task> {
        if task.title.is_empty() {
            return Err(StoreError::Constraint(TITLE_NOT_EMPTY_CONSTRAINT));
        }

        let mut inner = self.lock()?;
        inner.next_id += 1;

        let task = Task {
            id: inner.next_id,
            title: task.title,
            description: task.description,
            completed: false,
            created_at: Utc::now(),
        };
        inner.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn list(&self, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let inner = self.lock()?;

        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.lock()?.tasks.get(&id).cloned())
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut inner = self.lock()?;

        let Some(task) = inner.tasks.get_mut(&id) else {
            return Ok(None);
        };
        if changes.title.is_empty() {
            return Err(StoreError::Constraint(TITLE_NOT_EMPTY_CONSTRAINT));
        }

        task.title = changes.title;
        task.description = changes.description;
        task.completed = changes.completed;

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.lock()?.tasks.remove(&id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }
}
