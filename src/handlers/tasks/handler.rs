//! Task and progress handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::{ProgressService, TaskService},
    state::AppState,
};

use super::{
    request::{CreateTaskRequest, UpdateProgressRequest, UpdateTaskRequest},
    response::{ProgressUpdateResponse, TaskResponse, TasksListResponse},
};

/// List the tasks of a competition
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(competition_id): Path<Uuid>,
) -> AppResult<Json<TasksListResponse>> {
    let tasks = TaskService::list_tasks(state.db(), &competition_id).await?;
    Ok(Json(TasksListResponse { tasks }))
}

/// Add a task to a competition
pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(competition_id): Path<Uuid>,
    Json(payload): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    payload.validate()?;

    let task = TaskService::create_task(
        state.db(),
        &competition_id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Edit a task
pub async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((competition_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    payload.validate()?;

    let task = TaskService::update_task(
        state.db(),
        &competition_id,
        &task_id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(task))
}

/// Remove a task
pub async fn delete_task(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((competition_id, task_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    TaskService::delete_task(
        state.db(),
        &competition_id,
        &task_id,
        &auth_user.id,
        &auth_user.role,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Report the caller's progress on a task
pub async fn update_progress(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((competition_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateProgressRequest>,
) -> AppResult<Json<ProgressUpdateResponse>> {
    payload.validate()?;

    let result = ProgressService::report_for_user(
        state.db(),
        &competition_id,
        &auth_user.id,
        &task_id,
        payload.current_value,
        payload.notes,
    )
    .await?;

    Ok(Json(result))
}
