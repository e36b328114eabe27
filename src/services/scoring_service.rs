//! Participant score maintenance

use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::{
    db::repositories::{ParticipantRepository, ProgressRepository},
    engine::score_participant,
    error::{AppError, AppResult},
    models::Participant,
};

/// Keeps the cached `total_points` / `completion_pct` of participants in
/// sync with their progress rows
pub struct ScoringService;

impl ScoringService {
    /// Recompute one participant's score in its own transaction
    pub async fn recompute(pool: &PgPool, participant_id: &Uuid) -> AppResult<Participant> {
        let mut tx = pool.begin().await?;

        ParticipantRepository::lock_by_id(&mut *tx, participant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

        let participant = Self::recompute_in(&mut tx, participant_id).await?;
        tx.commit().await?;

        Ok(participant)
    }

    /// Recompute a participant's score on a connection that already holds
    /// the participant row lock
    pub async fn recompute_in(
        conn: &mut PgConnection,
        participant_id: &Uuid,
    ) -> AppResult<Participant> {
        let rows = ProgressRepository::scored_rows(&mut *conn, participant_id).await?;
        let score = score_participant(&rows);

        debug!(
            participant_id = %participant_id,
            total_points = score.total_points,
            completed = score.completed_tasks,
            tasks = score.total_tasks,
            "Participant score recomputed"
        );

        ParticipantRepository::write_score(&mut *conn, participant_id, &score).await
    }

    /// Recompute every given participant, in order. Inactive rows are
    /// rescored too; ranking skips them separately.
    pub async fn recompute_all_in(
        conn: &mut PgConnection,
        participants: &[Participant],
    ) -> AppResult<()> {
        for participant in participants {
            Self::recompute_in(&mut *conn, &participant.id).await?;
        }
        Ok(())
    }
}
