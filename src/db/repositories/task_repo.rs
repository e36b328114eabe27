//! Competition task repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppResult, models::CompetitionTask};

/// Repository for competition task database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task
    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
        name: &str,
        description: Option<&str>,
        target_value: f64,
        unit: &str,
        points_value: i32,
        exercise_id: Option<Uuid>,
    ) -> AppResult<CompetitionTask> {
        let task = sqlx::query_as::<_, CompetitionTask>(
            r#"
            INSERT INTO competition_tasks (
                competition_id, name, description, target_value, unit, points_value, exercise_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(competition_id)
        .bind(name)
        .bind(description)
        .bind(target_value)
        .bind(unit)
        .bind(points_value)
        .bind(exercise_id)
        .fetch_one(executor)
        .await?;

        Ok(task)
    }

    /// Find a task inside a competition
    pub async fn find_in_competition<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
        task_id: &Uuid,
    ) -> AppResult<Option<CompetitionTask>> {
        let task = sqlx::query_as::<_, CompetitionTask>(
            r#"SELECT * FROM competition_tasks WHERE id = $1 AND competition_id = $2"#,
        )
        .bind(task_id)
        .bind(competition_id)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    /// List the tasks of a competition in creation order
    pub async fn list_by_competition<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<Vec<CompetitionTask>> {
        let tasks = sqlx::query_as::<_, CompetitionTask>(
            r#"
            SELECT * FROM competition_tasks
            WHERE competition_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(competition_id)
        .fetch_all(executor)
        .await?;

        Ok(tasks)
    }

    /// Persist every editable column of `task`
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        task: &CompetitionTask,
    ) -> AppResult<CompetitionTask> {
        let updated = sqlx::query_as::<_, CompetitionTask>(
            r#"
            UPDATE competition_tasks
            SET
                name = $2,
                description = $3,
                target_value = $4,
                unit = $5,
                points_value = $6,
                exercise_id = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(task.id)
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.target_value)
        .bind(&task.unit)
        .bind(task.points_value)
        .bind(task.exercise_id)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    /// Delete a task; its progress rows go with it
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, task_id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM competition_tasks WHERE id = $1"#)
            .bind(task_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Count tasks of a competition
    pub async fn count_by_competition<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM competition_tasks WHERE competition_id = $1"#,
        )
        .bind(competition_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }
}
