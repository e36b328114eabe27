//! Progress repository

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    engine::ProgressChange,
    error::AppResult,
    models::{Progress, ScoredProgress},
};

/// Repository for progress database operations
pub struct ProgressRepository;

impl ProgressRepository {
    /// Create zeroed progress rows for every task the participant lacks
    pub async fn backfill_participant<'e>(
        executor: impl PgExecutor<'e>,
        participant_id: &Uuid,
        competition_id: &Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO competition_progress (participant_id, task_id)
            SELECT $1, t.id FROM competition_tasks t
            WHERE t.competition_id = $2
            ON CONFLICT (participant_id, task_id) DO NOTHING
            "#,
        )
        .bind(participant_id)
        .bind(competition_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Create zeroed progress rows of a new task for every participant
    pub async fn backfill_task<'e>(
        executor: impl PgExecutor<'e>,
        task_id: &Uuid,
        competition_id: &Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO competition_progress (participant_id, task_id)
            SELECT p.id, $1 FROM competition_participants p
            WHERE p.competition_id = $2
            ON CONFLICT (participant_id, task_id) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(competition_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Find a progress row and lock it
    pub async fn lock<'e>(
        executor: impl PgExecutor<'e>,
        participant_id: &Uuid,
        task_id: &Uuid,
    ) -> AppResult<Option<Progress>> {
        let progress = sqlx::query_as::<_, Progress>(
            r#"
            SELECT * FROM competition_progress
            WHERE participant_id = $1 AND task_id = $2
            FOR UPDATE
            "#,
        )
        .bind(participant_id)
        .bind(task_id)
        .fetch_optional(executor)
        .await?;

        Ok(progress)
    }

    /// Write a reported value
    pub async fn apply<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
        change: &ProgressChange,
        now: DateTime<Utc>,
    ) -> AppResult<Progress> {
        let progress = sqlx::query_as::<_, Progress>(
            r#"
            UPDATE competition_progress
            SET current_value = $2, is_completed = $3, completion_date = $4, notes = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(change.current_value)
        .bind(change.is_completed)
        .bind(change.completion_date)
        .bind(&change.notes)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(progress)
    }

    /// Lock every progress row of a task
    pub async fn lock_for_task<'e>(
        executor: impl PgExecutor<'e>,
        task_id: &Uuid,
    ) -> AppResult<Vec<Progress>> {
        let rows = sqlx::query_as::<_, Progress>(
            r#"
            SELECT * FROM competition_progress
            WHERE task_id = $1
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(task_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Overwrite the derived completion fields of a row
    pub async fn write_completion<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
        is_completed: bool,
        completion_date: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE competition_progress
            SET is_completed = $2, completion_date = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_completed)
        .bind(completion_date)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Progress rows of a participant joined with their task's scoring fields
    pub async fn scored_rows<'e>(
        executor: impl PgExecutor<'e>,
        participant_id: &Uuid,
    ) -> AppResult<Vec<ScoredProgress>> {
        let rows = sqlx::query_as::<_, ScoredProgress>(
            r#"
            SELECT pr.task_id, pr.current_value, pr.is_completed, t.target_value, t.points_value
            FROM competition_progress pr
            JOIN competition_tasks t ON t.id = pr.task_id
            WHERE pr.participant_id = $1
            "#,
        )
        .bind(participant_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// All progress rows of a participant in task order
    pub async fn list_for_participant<'e>(
        executor: impl PgExecutor<'e>,
        participant_id: &Uuid,
    ) -> AppResult<Vec<Progress>> {
        let rows = sqlx::query_as::<_, Progress>(
            r#"
            SELECT pr.* FROM competition_progress pr
            JOIN competition_tasks t ON t.id = pr.task_id
            WHERE pr.participant_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(participant_id)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}
