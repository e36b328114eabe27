//! Competition repository

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Competition};

/// Filters for the competition list
#[derive(Debug, Default, Clone)]
pub struct CompetitionFilter<'a> {
    pub gym_id: Option<Uuid>,
    pub status: Option<&'a str>,
    pub active_only: bool,
}

/// Repository for competition database operations
pub struct CompetitionRepository;

impl CompetitionRepository {
    /// Create a new competition
    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        gym_id: &Uuid,
        owner_id: &Uuid,
        name: &str,
        description: Option<&str>,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        max_participants: Option<i32>,
    ) -> AppResult<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (
                gym_id, owner_id, name, description, start_date, end_date, max_participants
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(gym_id)
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .bind(max_participants)
        .fetch_one(executor)
        .await?;

        Ok(competition)
    }

    /// Find competition by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
    ) -> AppResult<Option<Competition>> {
        let competition =
            sqlx::query_as::<_, Competition>(r#"SELECT * FROM competitions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(competition)
    }

    /// Find competition by ID and hold its row lock until the transaction ends.
    ///
    /// Every operation that reads and rewrites competition-wide state (joins,
    /// leaves, task changes, ranking) takes this lock first.
    pub async fn lock_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
    ) -> AppResult<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"SELECT * FROM competitions WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(competition)
    }

    /// Persist every editable column of `competition`
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        competition: &Competition,
    ) -> AppResult<Competition> {
        let updated = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET
                name = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                max_participants = $6,
                is_active = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(competition.id)
        .bind(&competition.name)
        .bind(&competition.description)
        .bind(competition.start_date)
        .bind(competition.end_date)
        .bind(competition.max_participants)
        .bind(competition.is_active)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    /// Delete competition
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM competitions WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// List competitions with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        filter: &CompetitionFilter<'_>,
    ) -> AppResult<(Vec<Competition>, i64)> {
        let now = Utc::now();

        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT * FROM competitions
            WHERE
                ($1::uuid IS NULL OR gym_id = $1)
                AND (NOT $2 OR is_active)
                AND (
                    $3::text IS NULL
                    OR ($3 = 'upcoming' AND start_date > $4)
                    OR ($3 = 'ongoing' AND start_date <= $4 AND end_date > $4)
                    OR ($3 = 'ended' AND end_date <= $4)
                )
            ORDER BY start_date DESC, id
            OFFSET $5 LIMIT $6
            "#,
        )
        .bind(filter.gym_id)
        .bind(filter.active_only)
        .bind(filter.status)
        .bind(now)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM competitions
            WHERE
                ($1::uuid IS NULL OR gym_id = $1)
                AND (NOT $2 OR is_active)
                AND (
                    $3::text IS NULL
                    OR ($3 = 'upcoming' AND start_date > $4)
                    OR ($3 = 'ongoing' AND start_date <= $4 AND end_date > $4)
                    OR ($3 = 'ended' AND end_date <= $4)
                )
            "#,
        )
        .bind(filter.gym_id)
        .bind(filter.active_only)
        .bind(filter.status)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok((competitions, count))
    }
}
