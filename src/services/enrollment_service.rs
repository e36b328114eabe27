//! Enrollment service: joining, leaving and reading one's own standing

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{CompetitionRepository, ParticipantRepository, ProgressRepository},
    engine::{Admission, admit, ensure_can_leave},
    error::{AppError, AppResult},
    handlers::{
        competitions::response::{MembershipResponse, ParticipantResponse},
        tasks::response::ProgressResponse,
    },
    services::{LeaderboardService, ScoringService},
};

/// Enrollment service for business logic
pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a user in a competition.
    ///
    /// The capacity check and the insert happen under the competition row
    /// lock, so concurrent joins can never push the active count past
    /// `max_participants`.
    pub async fn join(
        pool: &PgPool,
        competition_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<ParticipantResponse> {
        let mut tx = pool.begin().await?;
        let now = Utc::now();

        let competition = CompetitionRepository::lock_by_id(&mut *tx, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        let existing = ParticipantRepository::find_by_user(&mut *tx, competition_id, user_id).await?;
        let active = ParticipantRepository::count_active(&mut *tx, competition_id).await?;

        let participant = match admit(&competition, existing.as_ref(), active, now)? {
            Admission::Enroll => {
                ParticipantRepository::insert(&mut *tx, competition_id, user_id, now).await?
            }
            Admission::Rejoin(id) => ParticipantRepository::reactivate(&mut *tx, &id, now).await?,
        };

        ProgressRepository::backfill_participant(&mut *tx, &participant.id, competition_id)
            .await?;
        ScoringService::recompute_in(&mut tx, &participant.id).await?;
        LeaderboardService::rank_in(&mut tx, competition_id).await?;

        let participant = ParticipantRepository::find_by_id(&mut *tx, &participant.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;
        tx.commit().await?;

        info!(
            competition_id = %competition_id,
            user_id = %user_id,
            participant_id = %participant.id,
            rejoined = existing.is_some(),
            "User joined competition"
        );

        Ok(participant.into())
    }

    /// Withdraw a user from a competition. Their row and progress are kept,
    /// they just stop appearing on the leaderboard.
    pub async fn leave(pool: &PgPool, competition_id: &Uuid, user_id: &Uuid) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        CompetitionRepository::lock_by_id(&mut *tx, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        let existing = ParticipantRepository::find_by_user(&mut *tx, competition_id, user_id).await?;
        let participant_id = ensure_can_leave(existing.as_ref())?;

        ParticipantRepository::deactivate(&mut *tx, &participant_id, Utc::now()).await?;
        LeaderboardService::rank_in(&mut tx, competition_id).await?;
        tx.commit().await?;

        info!(
            competition_id = %competition_id,
            user_id = %user_id,
            participant_id = %participant_id,
            "User left competition"
        );

        Ok(())
    }

    /// The caller's participant row and per-task progress
    pub async fn membership(
        pool: &PgPool,
        competition_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<MembershipResponse> {
        let participant = ParticipantRepository::find_by_user(pool, competition_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not enrolled in this competition".to_string()))?;

        let progress = ProgressRepository::list_for_participant(pool, &participant.id)
            .await?
            .into_iter()
            .map(ProgressResponse::from)
            .collect();

        Ok(MembershipResponse {
            participant: participant.into(),
            progress,
        })
    }
}
