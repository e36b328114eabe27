//! Progress model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A participant's measured value against one task
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Progress {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub task_id: Uuid,
    pub current_value: f64,
    pub is_completed: bool,
    /// First time the task was completed; never cleared
    pub completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Progress row joined with the scoring fields of its task
#[derive(Debug, Clone, FromRow)]
pub struct ScoredProgress {
    pub task_id: Uuid,
    pub current_value: f64,
    pub is_completed: bool,
    pub target_value: f64,
    pub points_value: i32,
}
