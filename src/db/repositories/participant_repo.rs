//! Participant repository

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    engine::{RankCandidate, ScoreSummary},
    error::AppResult,
    models::Participant,
};

/// Repository for participant database operations
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Insert a fresh, active participant with zeroed aggregates
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
        user_id: &Uuid,
        join_date: DateTime<Utc>,
    ) -> AppResult<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO competition_participants (competition_id, user_id, join_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .bind(join_date)
        .fetch_one(executor)
        .await?;

        Ok(participant)
    }

    /// Reactivate the row of a user who left
    pub async fn reactivate<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
        join_date: DateTime<Utc>,
    ) -> AppResult<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE competition_participants
            SET is_active = TRUE, left_at = NULL, join_date = $2, rank = NULL
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(join_date)
        .fetch_one(executor)
        .await?;

        Ok(participant)
    }

    /// Soft-remove a participant; progress history stays
    pub async fn deactivate<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
        left_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE competition_participants
            SET is_active = FALSE, left_at = $2, rank = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(left_at)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Find by ID
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"SELECT * FROM competition_participants WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(participant)
    }

    /// Find by ID and lock the row for the rest of the transaction
    pub async fn lock_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"SELECT * FROM competition_participants WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(participant)
    }

    /// Find a user's row in a competition, active or not
    pub async fn find_by_user<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<Participant>> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM competition_participants
            WHERE competition_id = $1 AND user_id = $2
            "#,
        )
        .bind(competition_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(participant)
    }

    /// Count active participants
    pub async fn count_active<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM competition_participants
            WHERE competition_id = $1 AND is_active
            "#,
        )
        .bind(competition_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    /// Count every participant row, including those who left
    pub async fn count_all<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM competition_participants WHERE competition_id = $1"#,
        )
        .bind(competition_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    /// Lock all participant rows of a competition in id order, including
    /// those who left.
    ///
    /// Rows are always locked participant-first, progress-second; this keeps
    /// task changes from deadlocking against concurrent progress reports.
    pub async fn lock_all_for_competition<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM competition_participants
            WHERE competition_id = $1
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(competition_id)
        .fetch_all(executor)
        .await?;

        Ok(participants)
    }

    /// Lock active participants and read the fields that decide their rank
    pub async fn lock_rank_candidates<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
    ) -> AppResult<Vec<RankCandidate>> {
        let candidates = sqlx::query_as::<_, RankCandidate>(
            r#"
            SELECT id, completion_pct, total_points, join_date
            FROM competition_participants
            WHERE competition_id = $1 AND is_active
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(competition_id)
        .fetch_all(executor)
        .await?;

        Ok(candidates)
    }

    /// Write cached score aggregates
    pub async fn write_score<'e>(
        executor: impl PgExecutor<'e>,
        id: &Uuid,
        score: &ScoreSummary,
    ) -> AppResult<Participant> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE competition_participants
            SET total_points = $2, completion_pct = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(score.total_points)
        .bind(score.completion_pct)
        .fetch_one(executor)
        .await?;

        Ok(participant)
    }

    /// Write ranks for a batch of participants in one statement
    pub async fn write_ranks<'e>(
        executor: impl PgExecutor<'e>,
        ranks: &[(Uuid, i32)],
    ) -> AppResult<u64> {
        let (ids, values): (Vec<Uuid>, Vec<i32>) = ranks.iter().copied().unzip();

        let result = sqlx::query(
            r#"
            UPDATE competition_participants AS p
            SET rank = r.rank
            FROM UNNEST($1::uuid[], $2::int4[]) AS r(id, rank)
            WHERE p.id = r.id
            "#,
        )
        .bind(&ids)
        .bind(&values)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// One page of the stored leaderboard (active participants only)
    pub async fn leaderboard_page<'e>(
        executor: impl PgExecutor<'e>,
        competition_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<Participant>> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT * FROM competition_participants
            WHERE competition_id = $1 AND is_active
            ORDER BY rank NULLS LAST, join_date, id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(competition_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(participants)
    }
}
