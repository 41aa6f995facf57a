/// Data models for Taskboard
///
/// # Models
///
/// - `task`: The task record, the inputs the store accepts, and list filters

pub mod task;

pub use task::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
