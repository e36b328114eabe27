//! Competition handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::DEFAULT_PAGE_SIZE,
    db::repositories::CompetitionFilter,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{CompetitionService, EnrollmentService, LeaderboardService},
    state::AppState,
    utils::{page_params, validate_status_filter},
};

use super::{
    request::{
        CreateCompetitionRequest, LeaderboardQuery, ListCompetitionsQuery,
        UpdateCompetitionRequest,
    },
    response::{
        CompetitionResponse, CompetitionsListResponse, LeaderboardResponse, MembershipResponse,
        ParticipantResponse, RecomputeResponse,
    },
};

/// List competitions (with filtering)
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(query): Query<ListCompetitionsQuery>,
) -> AppResult<Json<CompetitionsListResponse>> {
    let (page, per_page) = page_params(query.page, query.per_page, DEFAULT_PAGE_SIZE);

    if let Some(status) = query.status.as_deref() {
        validate_status_filter(status).map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let filter = CompetitionFilter {
        gym_id: query.gym_id,
        status: query.status.as_deref(),
        active_only: query.active_only.unwrap_or(false),
    };

    let (competitions, total) =
        CompetitionService::list_competitions(state.db(), page, per_page, &filter).await?;

    Ok(Json(CompetitionsListResponse {
        competitions,
        total,
        page,
        per_page,
    }))
}

/// Create a new competition
pub async fn create_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateCompetitionRequest>,
) -> AppResult<(StatusCode, Json<CompetitionResponse>)> {
    payload.validate()?;

    let competition =
        CompetitionService::create_competition(state.db(), &auth_user.id, &auth_user.role, payload)
            .await?;

    Ok((StatusCode::CREATED, Json(competition)))
}

/// Get a specific competition
pub async fn get_competition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CompetitionResponse>> {
    let competition = CompetitionService::get_competition(state.db(), &id).await?;
    Ok(Json(competition))
}

/// Update a competition
pub async fn update_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompetitionRequest>,
) -> AppResult<Json<CompetitionResponse>> {
    payload.validate()?;

    let competition = CompetitionService::update_competition(
        state.db(),
        &id,
        &auth_user.id,
        &auth_user.role,
        payload,
    )
    .await?;

    Ok(Json(competition))
}

/// Delete a competition
pub async fn delete_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    CompetitionService::delete_competition(state.db(), &id, &auth_user.id, &auth_user.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join a competition
pub async fn join_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ParticipantResponse>)> {
    let participant = EnrollmentService::join(state.db(), &id, &auth_user.id).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// Leave a competition
pub async fn leave_competition(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    EnrollmentService::leave(state.db(), &id, &auth_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's enrollment and progress
pub async fn get_membership(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MembershipResponse>> {
    let membership = EnrollmentService::membership(state.db(), &id, &auth_user.id).await?;
    Ok(Json(membership))
}

/// Get competition leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let default_size = state.config().leaderboard.default_page_size;
    let (page, per_page) = page_params(query.page, query.per_page, default_size);

    let leaderboard = LeaderboardService::get_leaderboard(state.db(), &id, page, per_page).await?;
    Ok(Json(leaderboard))
}

/// Force a full ranking recomputation
pub async fn recompute_leaderboard(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecomputeResponse>> {
    let result =
        LeaderboardService::recompute_as_manager(state.db(), &id, &auth_user.id, &auth_user.role)
            .await?;
    Ok(Json(result))
}
