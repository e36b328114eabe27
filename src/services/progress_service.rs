//! Progress service

use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    db::repositories::{
        CompetitionRepository, ParticipantRepository, ProgressRepository, TaskRepository,
    },
    engine::{apply_report, validate_value},
    error::{AppError, AppResult},
    handlers::tasks::response::ProgressUpdateResponse,
    models::{CompetitionStatus, Participant},
    services::{LeaderboardService, ScoringService},
};

/// Progress service for business logic
pub struct ProgressService;

impl ProgressService {
    /// Record a new measured value for one task of a participant and refresh
    /// the participant's score.
    ///
    /// Locks only the participant row and its progress row, so reports from
    /// different participants proceed in parallel. Ranks are not touched.
    pub async fn update_progress(
        pool: &PgPool,
        participant_id: &Uuid,
        task_id: &Uuid,
        new_value: f64,
        notes: Option<String>,
    ) -> AppResult<ProgressUpdateResponse> {
        validate_value(new_value)?;

        let mut tx = pool.begin().await?;
        let now = Utc::now();

        let participant = ParticipantRepository::lock_by_id(&mut *tx, participant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".to_string()))?;

        if !participant.is_active {
            return Err(AppError::Conflict(
                "Participant has left this competition".to_string(),
            ));
        }

        let competition = CompetitionRepository::find_by_id(&mut *tx, &participant.competition_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        if !competition.accepts_progress_at(now) {
            let reason = if !competition.is_active {
                "Competition is not active"
            } else if competition.status_at(now) == CompetitionStatus::Upcoming {
                "Competition has not started yet"
            } else {
                "Competition has ended"
            };
            return Err(AppError::InvalidInput(reason.to_string()));
        }

        let task = TaskRepository::find_in_competition(&mut *tx, &competition.id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

        let current = ProgressRepository::lock(&mut *tx, participant_id, task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Progress record not found".to_string()))?;

        let change = apply_report(&current, task.target_value, new_value, notes, now)?;
        let progress = ProgressRepository::apply(&mut *tx, &current.id, &change, now).await?;
        let participant = ScoringService::recompute_in(&mut tx, participant_id).await?;
        tx.commit().await?;

        if change.first_completion {
            info!(
                participant_id = %participant_id,
                task_id = %task_id,
                "Task completed"
            );
        }
        debug!(
            participant_id = %participant_id,
            task_id = %task_id,
            value = new_value,
            total_points = participant.total_points,
            "Progress recorded"
        );

        Ok(ProgressUpdateResponse {
            progress: progress.into(),
            participant: participant.into(),
        })
    }

    /// Report progress for the caller's own enrollment, then refresh the
    /// competition's ranks in a separate transaction.
    ///
    /// Once the progress write has committed the report succeeds even if the
    /// rank refresh fails; ranks catch up on the next recompute.
    pub async fn report_for_user(
        pool: &PgPool,
        competition_id: &Uuid,
        user_id: &Uuid,
        task_id: &Uuid,
        new_value: f64,
        notes: Option<String>,
    ) -> AppResult<ProgressUpdateResponse> {
        let participant = ParticipantRepository::find_by_user(pool, competition_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not enrolled in this competition".to_string()))?;

        let response =
            Self::update_progress(pool, &participant.id, task_id, new_value, notes).await?;

        let ranking = refresh_rank(pool, competition_id, &participant.id).await;
        Ok(with_fresh_rank(response, ranking))
    }
}

async fn refresh_rank(
    pool: &PgPool,
    competition_id: &Uuid,
    participant_id: &Uuid,
) -> AppResult<Option<Participant>> {
    LeaderboardService::recompute_rankings(pool, competition_id).await?;
    ParticipantRepository::find_by_id(pool, participant_id).await
}

/// Surface the fresh rank to the caller, keeping the committed report when
/// the refresh failed
fn with_fresh_rank(
    mut response: ProgressUpdateResponse,
    ranking: AppResult<Option<Participant>>,
) -> ProgressUpdateResponse {
    match ranking {
        Ok(Some(ranked)) => response.participant = ranked.into(),
        Ok(None) => {}
        Err(e) => warn!(
            participant_id = %response.participant.id,
            error = %e,
            "Progress saved but rank refresh failed"
        ),
    }
    response
}
