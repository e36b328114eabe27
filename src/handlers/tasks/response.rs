//! Task and progress response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::handlers::competitions::ParticipantResponse;
use crate::models::{CompetitionTask, Progress};

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub unit: String,
    pub points_value: i32,
    pub exercise_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompetitionTask> for TaskResponse {
    fn from(t: CompetitionTask) -> Self {
        Self {
            id: t.id,
            competition_id: t.competition_id,
            name: t.name,
            description: t.description,
            target_value: t.target_value,
            unit: t.unit,
            points_value: t.points_value,
            exercise_id: t.exercise_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TasksListResponse {
    pub tasks: Vec<TaskResponse>,
}

/// Progress response
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub id: Uuid,
    pub task_id: Uuid,
    pub current_value: f64,
    pub is_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<Progress> for ProgressResponse {
    fn from(p: Progress) -> Self {
        Self {
            id: p.id,
            task_id: p.task_id,
            current_value: p.current_value,
            is_completed: p.is_completed,
            completion_date: p.completion_date,
            notes: p.notes,
            updated_at: p.updated_at,
        }
    }
}

/// Result of a progress report: the stored row and refreshed standings
#[derive(Debug, Serialize)]
pub struct ProgressUpdateResponse {
    pub progress: ProgressResponse,
    pub participant: ParticipantResponse,
}
