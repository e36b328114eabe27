//! Participant (enrollment) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's enrollment in one competition.
///
/// `total_points`, `completion_pct` and `rank` are caches written only by the
/// score and ranking recomputation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Participant {
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
