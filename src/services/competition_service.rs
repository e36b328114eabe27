//! Competition service

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{
        CompetitionFilter, CompetitionRepository, ParticipantRepository, TaskRepository,
    },
    error::{AppError, AppResult},
    handlers::competitions::{
        request::{CreateCompetitionRequest, UpdateCompetitionRequest},
        response::{CompetitionResponse, CompetitionSummary},
    },
    models::Competition,
    utils::sanitize_string,
};

/// Competition service for business logic
pub struct CompetitionService;

impl CompetitionService {
    /// Create a new competition owned by `owner_id`
    pub async fn create_competition(
        pool: &PgPool,
        owner_id: &Uuid,
        owner_role: &str,
        payload: CreateCompetitionRequest,
    ) -> AppResult<CompetitionResponse> {
        if owner_role != roles::ADMIN && owner_role != roles::GYM_OWNER {
            return Err(AppError::Forbidden(
                "Only gym owners can create competitions".to_string(),
            ));
        }

        validate_window(payload.start_date, payload.end_date)?;
        let name = validate_name(&payload.name)?;

        let competition = CompetitionRepository::create(
            pool,
            &payload.gym_id,
            owner_id,
            &name,
            payload.description.as_deref(),
            payload.start_date,
            payload.end_date,
            payload.max_participants,
        )
        .await?;

        info!(
            competition_id = %competition.id,
            gym_id = %competition.gym_id,
            owner_id = %owner_id,
            "Competition created"
        );

        Ok(CompetitionResponse::new(competition, 0, 0))
    }

    /// Get competition by ID
    pub async fn get_competition(pool: &PgPool, id: &Uuid) -> AppResult<CompetitionResponse> {
        let competition = CompetitionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        Self::to_competition_response(pool, competition).await
    }

    /// Update competition settings
    pub async fn update_competition(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        payload: UpdateCompetitionRequest,
    ) -> AppResult<CompetitionResponse> {
        let mut tx = pool.begin().await?;

        let mut competition = CompetitionRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        if !competition.is_managed_by(requester_id, requester_role) {
            return Err(AppError::Forbidden(
                "Cannot update other users' competitions".to_string(),
            ));
        }

        apply_update(&mut competition, payload);
        validate_name(&competition.name)?;
        validate_window(competition.start_date, competition.end_date)?;

        let active = ParticipantRepository::count_active(&mut *tx, id).await?;
        if let Some(max) = competition.max_participants {
            if i64::from(max) < active {
                return Err(AppError::Conflict(format!(
                    "Competition already has {active} active participants"
                )));
            }
        }

        let updated = CompetitionRepository::update(&mut *tx, &competition).await?;
        let task_count = TaskRepository::count_by_competition(&mut *tx, id).await?;
        tx.commit().await?;

        info!(competition_id = %id, is_active = updated.is_active, "Competition updated");

        Ok(CompetitionResponse::new(updated, active, task_count))
    }

    /// Delete a competition that never had participants
    pub async fn delete_competition(
        pool: &PgPool,
        id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        let mut tx = pool.begin().await?;

        let competition = CompetitionRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;

        if !competition.is_managed_by(requester_id, requester_role) {
            return Err(AppError::Forbidden(
                "Cannot delete other users' competitions".to_string(),
            ));
        }

        if ParticipantRepository::count_all(&mut *tx, id).await? > 0 {
            return Err(AppError::Conflict(
                "Competition has participants; deactivate it instead".to_string(),
            ));
        }

        CompetitionRepository::delete(&mut *tx, id).await?;
        tx.commit().await?;

        info!(competition_id = %id, "Competition deleted");
        Ok(())
    }

    /// List competitions with pagination
    pub async fn list_competitions(
        pool: &PgPool,
        page: u32,
        per_page: u32,
        filter: &CompetitionFilter<'_>,
    ) -> AppResult<(Vec<CompetitionSummary>, i64)> {
        let offset = (page.saturating_sub(1) as i64) * per_page as i64;
        let limit = per_page as i64;

        let (competitions, total) =
            CompetitionRepository::list(pool, offset, limit, filter).await?;

        let summaries: Vec<CompetitionSummary> = futures::future::try_join_all(
            competitions
                .into_iter()
                .map(|c| Self::to_competition_summary(pool, c)),
        )
        .await?;

        Ok((summaries, total))
    }

    async fn to_competition_response(
        pool: &PgPool,
        competition: Competition,
    ) -> AppResult<CompetitionResponse> {
        let participant_count = ParticipantRepository::count_active(pool, &competition.id).await?;
        let task_count = TaskRepository::count_by_competition(pool, &competition.id).await?;

        Ok(CompetitionResponse::new(
            competition,
            participant_count,
            task_count,
        ))
    }

    async fn to_competition_summary(
        pool: &PgPool,
        competition: Competition,
    ) -> AppResult<CompetitionSummary> {
        let participant_count = ParticipantRepository::count_active(pool, &competition.id).await?;
        Ok(CompetitionSummary::new(competition, participant_count))
    }
}

fn validate_window(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> AppResult<()> {
    if end_date <= start_date {
        return Err(AppError::Validation(
            "End date must be after start date".to_string(),
        ));
    }
    Ok(())
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = sanitize_string(name);
    if name.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }
    Ok(name)
}

fn apply_update(competition: &mut Competition, payload: UpdateCompetitionRequest) {
    if let Some(name) = payload.name {
        competition.name = sanitize_string(&name);
    }
    if let Some(description) = payload.description {
        competition.description = Some(description);
    }
    if let Some(start_date) = payload.start_date {
        competition.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        competition.end_date = end_date;
    }
    if payload.remove_participant_limit == Some(true) {
        competition.max_participants = None;
    } else if let Some(max) = payload.max_participants {
        competition.max_participants = Some(max);
    }
    if let Some(is_active) = payload.is_active {
        competition.is_active = is_active;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::competition::fixtures::ongoing_competition;

    #[test]
    fn test_window_must_be_positive() {
        let now = Utc::now();
        assert!(validate_window(now, now + Duration::days(1)).is_ok());
        assert!(matches!(
            validate_window(now, now),
            Err(AppError::Validation(_))
        ));
        assert!(validate_window(now, now - Duration::hours(1)).is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(validate_name(" Iron Month ").unwrap(), "Iron Month");
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_apply_update_merges_only_given_fields() {
        let mut competition = ongoing_competition(Utc::now());
        competition.max_participants = Some(10);
        let original_start = competition.start_date;

        apply_update(
            &mut competition,
            UpdateCompetitionRequest {
                name: Some("  Summer Shred  ".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        );

        assert_eq!(competition.name, "Summer Shred");
        assert!(!competition.is_active);
        assert_eq!(competition.start_date, original_start);
        assert_eq!(competition.max_participants, Some(10));
    }

    #[test]
    fn test_apply_update_can_lift_participant_limit() {
        let mut competition = ongoing_competition(Utc::now());
        competition.max_participants = Some(10);

        apply_update(
            &mut competition,
            UpdateCompetitionRequest {
                max_participants: Some(50),
                remove_participant_limit: Some(true),
                ..Default::default()
            },
        );

        assert_eq!(competition.max_participants, None);
    }
}
