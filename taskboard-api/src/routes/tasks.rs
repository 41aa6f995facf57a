/// Task endpoints
///
/// CRUD over the `tasks` resource. Handlers are stateless: each request reads
/// the store handle from `AppState`, performs one store call and maps the
/// outcome to a status code.
///
/// # Endpoints
///
/// - `POST /tasks` - Create task
/// - `GET /tasks?completed=true|false` - List tasks, newest first
/// - `GET /tasks/:id` - Get task
/// - `PUT /tasks/:id` - Replace title, description and completed
/// - `DELETE /tasks/:id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{TaskIdPath, ValidatedJson},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
use tracing::{debug, info};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(
        required(message = "Task title is required"),
        length(min = 1, message = "Task title is required")
    )]
    pub title: Option<String>,

    /// Optional details; `null` and an omitted field are equivalent
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title.unwrap_or_default(),
            description: self.description,
        }
    }
}

/// Update task request
///
/// Every mutable field is replaced; send the current values to keep them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(
        required(message = "Task title is required"),
        length(min = 1, message = "Task title is required")
    )]
    pub title: Option<String>,

    /// New description; `null` or omitted clears it
    #[serde(default)]
    pub description: Option<String>,

    /// New completion state, must be a JSON boolean
    #[validate(required(message = "completed must be true or false"))]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    fn into_changes(self) -> TaskChanges {
        TaskChanges {
            title: self.title.unwrap_or_default(),
            description: self.description,
            completed: self.completed.unwrap_or_default(),
        }
    }
}

/// Picks the `completed` filter out of raw query pairs
///
/// Only a single `completed=true|false` pair restricts the list. A repeated
/// key, like any other unrecognized value, lists every task.
fn filter_from_pairs(pairs: &[(String, String)]) -> TaskFilter {
    let mut values = pairs
        .iter()
        .filter(|(key, _)| key == "completed")
        .map(|(_, value)| value.as_str());

    match (values.next(), values.next()) {
        (Some(value), None) => TaskFilter::from_query(Some(value)),
        _ => TaskFilter::All,
    }
}

/// Delete task response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    /// Confirmation message
    pub message: String,

    /// The task as it was before deletion
    pub task: Task,
}

fn not_found(id: TaskId) -> ApiError {
    ApiError::NotFound(format!("Task {} not found", id))
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "title": "Buy milk", "description": "2%" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored task.
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty title, malformed body
/// - `500 Internal Server Error`: Store failure
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.store.insert(req.into_new_task()).await?;

    info!(task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// GET /tasks?completed=true
/// GET /tasks?completed=false
/// ```
///
/// # Response
///
/// `200 OK` with an array ordered by `created_at`, newest first. The array
/// is empty when nothing matches.
///
/// # Errors
///
/// - `500 Internal Server Error`: Store failure
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = filter_from_pairs(&pairs);
    let tasks = state.store.list(filter).await?;

    debug!(?filter, count = tasks.len(), "Tasks listed");
    Ok(Json(tasks))
}

/// Get task
///
/// # Endpoint
///
/// ```text
/// GET /tasks/:id
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not an integer
/// - `404 Not Found`: No task with this id
/// - `500 Internal Server Error`: Store failure
pub async fn get_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Json<Task>> {
    let task = state.store.get(id).await?.ok_or_else(|| not_found(id))?;

    Ok(Json(task))
}

/// Update task
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// Content-Type: application/json
///
/// { "title": "Buy milk", "description": "2%", "completed": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid id, empty title, non-boolean `completed`
/// - `404 Not Found`: No task with this id
/// - `500 Internal Server Error`: Store failure
pub async fn update_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state
        .store
        .update(id, req.into_changes())
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(task_id = task.id, completed = task.completed, "Task updated");
    Ok(Json(task))
}

/// Delete task
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/:id
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Task deleted successfully",
///   "task": { "id": 1, "title": "Buy milk", ... }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not an integer
/// - `404 Not Found`: No task with this id
/// - `500 Internal Server Error`: Store failure
pub async fn delete_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let task = state.store.delete(id).await?.ok_or_else(|| not_found(id))?;

    info!(task_id = task.id, "Task deleted");
    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
        task,
    }))
}
