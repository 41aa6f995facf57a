/// Task model
///
/// A task is the only entity Taskboard tracks. The store assigns `id` and
/// `created_at`; `title`, `description` and `completed` are replaced as a
/// whole on update.
///
/// # JSON shape
///
/// ```json
/// {
///   "id": 1,
///   "title": "Buy milk",
///   "description": null,
///   "completed": false,
///   "created_at": "2025-01-03T12:00:00Z"
/// }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task identifier as stored in the `SERIAL` primary key
pub type TaskId = i32;

/// A persisted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned identifier, never reused
    pub id: TaskId,

    /// Short summary, never empty
    pub title: String,

    /// Optional free-form details
    pub description: Option<String>,

    /// Whether the task is done
    pub completed: bool,

    /// When the task was inserted
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a task
///
/// Callers validate `title` before handing this to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

/// Full replacement of a task's mutable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Completion filter applied when listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    /// No restriction
    #[default]
    All,

    /// Only tasks with `completed = true`
    Completed,

    /// Only tasks with `completed = false`
    Incomplete,
}

impl TaskFilter {
    /// Maps the `completed` query parameter to a filter
    ///
    /// Only the literal strings `"true"` and `"false"` narrow the listing;
    /// anything else, including an absent parameter, lists every task.
    pub fn from_query(completed: Option<&str>) -> Self {
        match completed {
            Some("true") => TaskFilter::Completed,
            Some("false") => TaskFilter::Incomplete,
            _ => TaskFilter::All,
        }
    }

    /// The `completed` value rows must have, or `None` for no restriction
    pub fn completed(&self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Completed => Some(true),
            TaskFilter::Incomplete => Some(false),
        }
    }

    /// Checks whether a task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        self.completed()
            .map_or(true, |completed| task.completed == completed)
    }
}
