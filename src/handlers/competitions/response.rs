//! Competition response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::tasks::ProgressResponse;
use crate::models::{Competition, Participant};

/// Competition response
#[derive(Debug, Serialize)]
pub struct CompetitionResponse {
    pub id: Uuid,
    pub gym_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub status: String, // upcoming, ongoing, ended
    pub participant_count: i64,
    pub task_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitionResponse {
    pub fn new(competition: Competition, participant_count: i64, task_count: i64) -> Self {
        let status = competition.status().to_string();

        Self {
            id: competition.id,
            gym_id: competition.gym_id,
            owner_id: competition.owner_id,
            name: competition.name,
            description: competition.description,
            start_date: competition.start_date,
            end_date: competition.end_date,
            max_participants: competition.max_participants,
            is_active: competition.is_active,
            status,
            participant_count,
            task_count,
            created_at: competition.created_at,
            updated_at: competition.updated_at,
        }
    }
}

/// Competition list response
#[derive(Debug, Serialize)]
pub struct CompetitionsListResponse {
    pub competitions: Vec<CompetitionSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Competition summary for list views and leaderboard headers
#[derive(Debug, Serialize)]
pub struct CompetitionSummary {
    pub id: Uuid,
    pub gym_id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub status: String,
    pub participant_count: i64,
}

impl CompetitionSummary {
    pub fn new(competition: Competition, participant_count: i64) -> Self {
        let status = competition.status().to_string();

        Self {
            id: competition.id,
            gym_id: competition.gym_id,
            name: competition.name,
            start_date: competition.start_date,
            end_date: competition.end_date,
            max_participants: competition.max_participants,
            is_active: competition.is_active,
            status,
            participant_count,
        }
    }
}

/// Participant response
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub user_id: Uuid,
    pub join_date: DateTime<Utc>,
    pub is_active: bool,
    pub left_at: Option<DateTime<Utc>>,
    pub total_points: i64,
    pub completion_pct: f64,
    pub rank: Option<i32>,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            competition_id: p.competition_id,
            user_id: p.user_id,
            join_date: p.join_date,
            is_active: p.is_active,
            left_at: p.left_at,
            total_points: p.total_points,
            completion_pct: p.completion_pct,
            rank: p.rank,
        }
    }
}

/// The caller's own enrollment with per-task progress
#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub participant: ParticipantResponse,
    pub progress: Vec<ProgressResponse>,
}

/// Leaderboard entry
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: Option<i32>,
    pub participant_id: Uuid,
    pub user_id: Uuid,
    pub total_points: i64,
    pub completion_pct: f64,
    pub join_date: DateTime<Utc>,
}

impl From<Participant> for LeaderboardEntry {
    fn from(p: Participant) -> Self {
        Self {
            rank: p.rank,
            participant_id: p.id,
            user_id: p.user_id,
            total_points: p.total_points,
            completion_pct: p.completion_pct,
            join_date: p.join_date,
        }
    }
}

/// Leaderboard response
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub competition: CompetitionSummary,
    pub entries: Vec<LeaderboardEntry>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Result of a ranking recomputation
#[derive(Debug, Serialize)]
pub struct RecomputeResponse {
    pub competition_id: Uuid,
    pub ranked_participants: usize,
    pub recomputed_at: DateTime<Utc>,
}
