//! Leaderboard service

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::repositories::{CompetitionRepository, ParticipantRepository},
    engine::assign_ranks,
    error::{AppError, AppResult},
    handlers::competitions::response::{
        CompetitionSummary, LeaderboardEntry, LeaderboardResponse, RecomputeResponse,
    },
};

/// Leaderboard service for ranking and standings
pub struct LeaderboardService;

impl LeaderboardService {
    /// Recompute and store the ranks of a competition's active participants.
    ///
    /// Takes the competition row lock, so two recomputations of the same
    /// competition never interleave their writes.
    pub async fn recompute_rankings(
        pool: &PgPool,
        competition_id: &Uuid,
    ) -> AppResult<RecomputeResponse> {
        let mut tx = pool.begin().await?;

        CompetitionRepository::lock_by_id(&mut *tx, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        let ranked = Self::rank_in(&mut tx, competition_id).await?;
        tx.commit().await?;

        Ok(RecomputeResponse {
            competition_id: *competition_id,
            ranked_participants: ranked.len(),
            recomputed_at: Utc::now(),
        })
    }

    /// Recompute on behalf of a caller, who must manage the competition
    pub async fn recompute_as_manager(
        pool: &PgPool,
        competition_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<RecomputeResponse> {
        let competition = CompetitionRepository::find_by_id(pool, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        if !competition.is_managed_by(requester_id, requester_role) {
            return Err(AppError::Forbidden(
                "Cannot recompute other users' competitions".to_string(),
            ));
        }

        let result = Self::recompute_rankings(pool, competition_id).await?;

        info!(
            competition_id = %competition_id,
            requester_id = %requester_id,
            ranked = result.ranked_participants,
            "Leaderboard recomputed on request"
        );

        Ok(result)
    }

    /// Rank active participants on a connection that holds the competition
    /// row lock. Participants who left keep a NULL rank.
    pub async fn rank_in(
        conn: &mut PgConnection,
        competition_id: &Uuid,
    ) -> AppResult<Vec<(Uuid, i32)>> {
        let candidates =
            ParticipantRepository::lock_rank_candidates(&mut *conn, competition_id).await?;
        let ranks = assign_ranks(candidates);

        let written = ParticipantRepository::write_ranks(&mut *conn, &ranks).await?;

        debug!(
            competition_id = %competition_id,
            ranked = written,
            "Ranks written"
        );

        Ok(ranks)
    }

    /// Read one page of the stored leaderboard
    pub async fn get_leaderboard(
        pool: &PgPool,
        competition_id: &Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<LeaderboardResponse> {
        let competition = CompetitionRepository::find_by_id(pool, competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        let offset = (page.saturating_sub(1) as i64) * per_page as i64;
        let limit = per_page as i64;

        let total = ParticipantRepository::count_active(pool, competition_id).await?;
        let entries = ParticipantRepository::leaderboard_page(pool, competition_id, offset, limit)
            .await?
            .into_iter()
            .map(LeaderboardEntry::from)
            .collect();

        Ok(LeaderboardResponse {
            competition: CompetitionSummary::new(competition, total),
            entries,
            total,
            page,
            per_page,
        })
    }
}
