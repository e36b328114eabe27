//! Competition task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A measurable goal inside a competition
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompetitionTask {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Value a participant must reach for full credit (always > 0)
    pub target_value: f64,
    pub unit: String,
    /// Points awarded on completion (always > 0)
    pub points_value: i32,
    /// Exercise taxonomy entry, used for categorisation only
    pub exercise_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
