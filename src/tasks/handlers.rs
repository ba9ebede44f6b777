/**
 * Task Handlers
 *
 * REST handlers for the task surface. On every successful mutation the
 * resulting record (with its collaborator set) is handed to the event
 * dispatcher; a store error aborts before dispatch, so a failed mutation
 * never produces partial fan-out.
 *
 * # Routes
 *
 * - `POST /api/tasks` - create (dispatches `taskAdded`)
 * - `GET /api/tasks/{user_id}` - tasks owned by or shared with a user
 * - `GET /api/task/{id}` - one task
 * - `PUT /api/tasks/{id}` - partial update (dispatches `taskUpdated`)
 * - `PUT /api/tasks/{id}/collaborators` - set-union collaborator add
 *   (dispatches `taskUpdated`)
 * - `DELETE /api/tasks/{id}` - delete (no dispatch; clients observe
 *   deletions on next fetch)
 * - `GET /api/tasks/collaborated/{user_id}` - collaborating-only view
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::realtime::dispatch::TaskEvent;
use crate::server::state::AppState;
use crate::tasks::model::{
    AddCollaboratorsRequest, CreateTaskRequest, NewTask, Task, TaskChanges,
};

/// Create task (POST /api/tasks).
///
/// `userId` and `title` are validated before the store is consulted:
/// a request missing either, or carrying a malformed user id, fails with
/// 400 and triggers neither a store call nor any dispatch.
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let (user_id, title) = match (&request.user_id, &request.title) {
        (Some(user_id), Some(title)) if !title.trim().is_empty() => (user_id, title.clone()),
        _ => {
            return Err(ApiError::validation("User ID and Task name are required"));
        }
    };

    let owner_id = Uuid::parse_str(user_id)
        .map_err(|_| ApiError::validation("Invalid user ID format"))?;

    let task = state
        .tasks
        .create(NewTask {
            owner_id,
            title,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority.unwrap_or_default(),
            status: request.status.unwrap_or_default(),
            collaborators: request.collaborators.unwrap_or_default(),
        })
        .await?;

    tracing::info!("Task {} created by {}", task.id, owner_id);
    state.dispatcher.dispatch(TaskEvent::Created(task.clone()));

    Ok((StatusCode::CREATED, Json(task)))
}

/// All tasks a user owns or collaborates on (GET /api/tasks/{user_id}).
pub async fn get_tasks_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks.find_for_user(user_id).await?;
    Ok(Json(tasks))
}

/// One task by id (GET /api/task/{id}).
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    Ok(Json(task))
}

/// Partial update (PUT /api/tasks/{id}).
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<TaskChanges>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .update(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    tracing::info!("Task {} updated", task.id);
    state.dispatcher.dispatch(TaskEvent::Updated(task.clone()));

    Ok(Json(task))
}

/// Set-union collaborator add (PUT /api/tasks/{id}/collaborators).
///
/// A collaborator-add is an update restricted to the collaborator set, so
/// it shares the `taskUpdated` fan-out with `update_task`.
pub async fn add_collaborators(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddCollaboratorsRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .add_collaborators(id, request.collaborators)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    tracing::info!(
        "Task {} now has {} collaborators",
        task.id,
        task.collaborators.len()
    );
    state.dispatcher.dispatch(TaskEvent::Updated(task.clone()));

    Ok(Json(task))
}

/// Delete task (DELETE /api/tasks/{id}).
///
/// Deletion is not propagated through the dispatcher: connected clients
/// observe it on their next fetch.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.tasks.delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Task not found"));
    }

    tracing::info!("Task {} deleted", id);
    Ok(Json(serde_json::json!({ "message": "Task deleted" })))
}

/// Tasks where the user is a collaborator (GET /api/tasks/collaborated/{user_id}).
pub async fn get_collaborated_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.tasks.find_collaborating(user_id).await?;
    Ok(Json(tasks))
}
