//! Competition task service
//!
//! Task changes touch every participant's score, so each one runs in a single
//! transaction that locks the competition, then all participant rows, then
//! the affected progress rows.

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{
        CompetitionRepository, ParticipantRepository, ProgressRepository, TaskRepository,
    },
    engine::evaluate_completion,
    error::{AppError, AppResult},
    handlers::tasks::{
        request::{CreateTaskRequest, UpdateTaskRequest},
        response::TaskResponse,
    },
    models::{Competition, CompetitionTask},
    services::{LeaderboardService, ScoringService},
    utils::sanitize_string,
};

/// Task service for business logic
pub struct TaskService;

impl TaskService {
    /// List the tasks of a competition
    pub async fn list_tasks(pool: &PgPool, competition_id: &Uuid) -> AppResult<Vec<TaskResponse>> {
        CompetitionRepository::find_by_id(pool, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        let tasks = TaskRepository::list_by_competition(pool, competition_id).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// Add a task and give every participant a zeroed progress row for it
    pub async fn create_task(
        pool: &PgPool,
        competition_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: CreateTaskRequest,
    ) -> AppResult<TaskResponse> {
        let mut tx = pool.begin().await?;

        lock_managed(&mut tx, competition_id, requester_id, requester_role).await?;
        let participants =
            ParticipantRepository::lock_all_for_competition(&mut *tx, competition_id).await?;

        let name = sanitize_string(&payload.name);
        let unit = sanitize_string(&payload.unit);
        if name.is_empty() || unit.is_empty() {
            return Err(AppError::Validation(
                "Task name and unit cannot be empty".to_string(),
            ));
        }

        let task = TaskRepository::create(
            &mut *tx,
            competition_id,
            &name,
            payload.description.as_deref(),
            payload.target_value,
            &unit,
            payload.points_value,
            payload.exercise_id,
        )
        .await?;

        let backfilled = ProgressRepository::backfill_task(&mut *tx, &task.id, competition_id).await?;

        // A new task lowers everyone's completion percentage, left rows included
        ScoringService::recompute_all_in(&mut tx, &participants).await?;
        LeaderboardService::rank_in(&mut tx, competition_id).await?;
        tx.commit().await?;

        info!(
            competition_id = %competition_id,
            task_id = %task.id,
            backfilled,
            "Task created"
        );

        Ok(task.into())
    }

    /// Edit a task; completion flags and scores are re-derived against the
    /// new target and points
    pub async fn update_task(
        pool: &PgPool,
        competition_id: &Uuid,
        task_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateTaskRequest,
    ) -> AppResult<TaskResponse> {
        let mut tx = pool.begin().await?;

        lock_managed(&mut tx, competition_id, requester_id, requester_role).await?;
        let participants =
            ParticipantRepository::lock_all_for_competition(&mut *tx, competition_id).await?;

        let mut task = TaskRepository::find_in_competition(&mut *tx, competition_id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        apply_update(&mut task, payload);
        if task.name.is_empty() || task.unit.is_empty() {
            return Err(AppError::Validation(
                "Task name and unit cannot be empty".to_string(),
            ));
        }
        let task = TaskRepository::update(&mut *tx, &task).await?;

        let now = Utc::now();
        let rows = ProgressRepository::lock_for_task(&mut *tx, task_id).await?;
        for row in &rows {
            let (is_completed, completion_date) =
                evaluate_completion(row.current_value, task.target_value, row.completion_date, now);

            if is_completed != row.is_completed || completion_date != row.completion_date {
                ProgressRepository::write_completion(&mut *tx, &row.id, is_completed, completion_date)
                    .await?;
            }
        }

        ScoringService::recompute_all_in(&mut tx, &participants).await?;
        LeaderboardService::rank_in(&mut tx, competition_id).await?;
        tx.commit().await?;

        info!(competition_id = %competition_id, task_id = %task_id, "Task updated");

        Ok(task.into())
    }

    /// Remove a task and its progress rows
    pub async fn delete_task(
        pool: &PgPool,
        competition_id: &Uuid,
        task_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        lock_managed(&mut tx, competition_id, requester_id, requester_role).await?;
        let participants =
            ParticipantRepository::lock_all_for_competition(&mut *tx, competition_id).await?;

        TaskRepository::find_in_competition(&mut *tx, competition_id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        TaskRepository::delete(&mut *tx, task_id).await?;

        ScoringService::recompute_all_in(&mut tx, &participants).await?;
        LeaderboardService::rank_in(&mut tx, competition_id).await?;
        tx.commit().await?;

        info!(competition_id = %competition_id, task_id = %task_id, "Task deleted");
        Ok(())
    }
}

/// Lock the competition and check the caller may manage it
async fn lock_managed(
    conn: &mut PgConnection,
    competition_id: &Uuid,
    requester_id: &Uuid,
    requester_role: &str,
) -> AppResult<Competition> {
    let competition = CompetitionRepository::lock_by_id(&mut *conn, competition_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

    if !competition.is_managed_by(requester_id, requester_role) {
        return Err(AppError::Forbidden(
            "Cannot manage tasks of other users' competitions".to_string(),
        ));
    }

    Ok(competition)
}

fn apply_update(task: &mut CompetitionTask, payload: UpdateTaskRequest) {
    if let Some(name) = payload.name {
        task.name = sanitize_string(&name);
    }
    if let Some(description) = payload.description {
        task.description = Some(description);
    }
    if let Some(target_value) = payload.target_value {
        task.target_value = target_value;
    }
    if let Some(unit) = payload.unit {
        task.unit = sanitize_string(&unit);
    }
    if let Some(points_value) = payload.points_value {
        task.points_value = points_value;
    }
    if payload.exercise_id.is_some() {
        task.exercise_id = payload.exercise_id;
    }
}
