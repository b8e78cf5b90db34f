//! Task CRUD endpoints.
//!
//! Each handler validates its params/query/body first and only then takes the
//! store lock, so a rejected request never touches the store.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use taskhub_core::validation::{
    parse_task_body, validate_list_query, validate_priority_level, validate_task_id,
};
use taskhub_core::{Priority, Task, TaskError};

use crate::state::AppState;

use super::error::{ApiError, ErrorBody};

// ── Request types ───────────────────────────────────────────────────

/// Query parameters for GET /tasks.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksParams {
    /// `true` or `false`; omit for all tasks.
    pub completed: Option<String>,
}

/// Body accepted by POST /tasks and PUT /tasks/{id}.
///
/// Documentation only: bodies are validated from raw JSON so that mistyped
/// fields are reported rather than coerced.
#[allow(dead_code)]
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Option<Priority>,
    /// `dd/mm/yyyy`. Checked but ignored: creation time is assigned by the server.
    pub created_at: Option<String>,
}

fn path_param(raw: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    raw.map(|Path(value)| value)
        .map_err(|e| ApiError::validation(e.body_text()))
}

fn task_id(raw: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    Ok(validate_task_id(&path_param(raw)?)?)
}

// ── Create ──────────────────────────────────────────────────────────

/// Create a task. The server assigns `id` and `createdAt`.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "Tasks",
    request_body(content = TaskBody, content_type = "application/json"),
    responses(
        (status = 201, description = "Task created", content_type = "text/plain", body = String),
        (status = 400, description = "Invalid task body", body = ErrorBody)
    )
)]
pub(crate) async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, String), ApiError> {
    let draft = parse_task_body(&body)?;

    let task = state.store.write().await.create(draft)?;
    info!(id = task.id, priority = %task.priority, "Task created");

    Ok((
        StatusCode::CREATED,
        format!("Task created successfully with Id: {}.", task.id),
    ))
}

// ── List / Get ──────────────────────────────────────────────────────

/// List tasks ordered by creation time, optionally filtered by completion.
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    params(ListTasksParams),
    responses(
        (status = 200, description = "Tasks sorted by createdAt", body = Vec<Task>),
        (status = 400, description = "Invalid completed filter", body = ErrorBody)
    )
)]
pub(crate) async fn list_tasks(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListTasksParams>, QueryRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let completed = validate_list_query(params.completed.as_deref())?;

    let store = state.store.read().await;
    let tasks = match completed {
        Some(flag) => store.filter_by_completed(flag),
        None => store.list(),
    };
    debug!(count = tasks.len(), ?completed, "Listed tasks");
    Ok(Json(tasks))
}

/// List tasks at one priority level.
#[utoipa::path(
    get,
    path = "/tasks/priority/{level}",
    tag = "Tasks",
    params(
        ("level" = Priority, Path, description = "low, medium or high")
    ),
    responses(
        (status = 200, description = "Tasks at this priority (possibly empty)", body = Vec<Task>),
        (status = 400, description = "Unknown priority level", body = ErrorBody)
    )
)]
pub(crate) async fn list_tasks_by_priority(
    State(state): State<Arc<AppState>>,
    level: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let level = validate_priority_level(&path_param(level)?)?;
    let tasks = state.store.read().await.filter_by_priority(level);
    debug!(count = tasks.len(), %level, "Listed tasks by priority");
    Ok(Json(tasks))
}

/// Get a single task.
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = u64, Path, description = "Task id, greater than 0")
    ),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(id)?;
    let store = state.store.read().await;
    let task = store.find_by_id(id).cloned().ok_or(TaskError::not_found(id))?;
    Ok(Json(task))
}

// ── Update / Delete ─────────────────────────────────────────────────

/// Replace a task. Fields not resent fall back to their defaults; `id` and
/// `createdAt` are kept.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = u64, Path, description = "Task id, greater than 0")
    ),
    request_body(content = TaskBody, content_type = "application/json"),
    responses(
        (status = 200, description = "Task updated", content_type = "text/plain", body = String),
        (status = 400, description = "Malformed id or invalid task body", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<String, ApiError> {
    let id = task_id(id)?;
    let draft = parse_task_body(&body)?;

    state
        .store
        .write()
        .await
        .replace(id, draft)
        .ok_or(TaskError::not_found(id))?;
    info!(id, "Task updated");

    Ok(format!("Task updated having id {id}"))
}

/// Delete a task permanently.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = u64, Path, description = "Task id, greater than 0")
    ),
    responses(
        (status = 200, description = "Task deleted", content_type = "text/plain", body = String),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_task(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<String, ApiError> {
    let id = task_id(id)?;

    if !state.store.write().await.remove(id) {
        return Err(TaskError::not_found(id).into());
    }
    info!(id, "Task deleted");

    Ok(format!("Task deleted having id {id}"))
}
