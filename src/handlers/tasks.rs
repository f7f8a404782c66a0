use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreateTaskRequest, Task, UpdateTaskStatusRequest},
    policy::{self, Capability},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// create_task
///
/// [Admin Route] Creates an assignment for a reporter; new tasks start
/// `pending`.
#[utoipa::path(
    post,
    path = "/admin/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Created", body = Task),
        (status = 400, description = "Missing title")
    )
)]
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title and assigned_to are required."));
    }

    let task = state
        .repo
        .create_task(payload)
        .await
        .ok_or_else(|| ApiError::internal("Failed to create task"))?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// list_tasks
///
/// [Admin Route] Every task across all reporters.
#[utoipa::path(
    get,
    path = "/admin/tasks",
    responses((status = 200, description = "All tasks", body = [Task]))
)]
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    policy::require(&auth, Capability::Admin)?;
    Ok(Json(state.repo.list_tasks().await))
}

/// admin_update_task_status
///
/// [Admin Route] Sets a task's status directly; admins bypass the
/// assignee ownership check.
#[utoipa::path(
    put,
    path = "/admin/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Updated", body = Task),
        (status = 404, description = "Task not found")
    )
)]
pub async fn admin_update_task_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    let task = state
        .repo
        .set_task_status(id, payload.status)
        .await
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(Json(task))
}

/// delete_task
///
/// [Admin Route] Removes a task.
#[utoipa::path(
    delete,
    path = "/admin/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    policy::require(&auth, Capability::Admin)?;

    if state.repo.delete_task(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Task not found"))
    }
}

/// get_reporter_tasks
///
/// [Reporter Route] Lists only the tasks assigned to the caller.
#[utoipa::path(
    get,
    path = "/reporter/tasks",
    responses((status = 200, description = "My tasks", body = [Task]))
)]
pub async fn get_reporter_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    policy::require(&auth, Capability::ReporterOrAdmin)?;
    Ok(Json(state.repo.list_tasks_for(auth.id).await))
}

/// update_task_by_reporter
///
/// [Reporter Route] Advances the status of a task assigned to the caller.
/// A reporter who is not the assignee is refused and the task is left
/// unchanged; admins may act on any task.
#[utoipa::path(
    put,
    path = "/reporter/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Updated", body = Task),
        (status = 403, description = "Not the assignee"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task_by_reporter(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    policy::require(&auth, Capability::ReporterOrAdmin)?;

    let task = state
        .repo
        .get_task(id)
        .await
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    policy::require_task_assignee(&auth, &task)?;

    let task = state
        .repo
        .set_task_status(id, payload.status)
        .await
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(Json(task))
}
