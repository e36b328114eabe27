//! Competition model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Competition database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Competition {
    pub id: Uuid,
    pub gym_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// Lifecycle status at the given instant.
    ///
    /// The competition window is half-open: `start_date` is inside it,
    /// `end_date` is not.
    pub fn status_at(&self, now: DateTime<Utc>) -> CompetitionStatus {
        if now < self.start_date {
            CompetitionStatus::Upcoming
        } else if now < self.end_date {
            CompetitionStatus::Ongoing
        } else {
            CompetitionStatus::Ended
        }
    }

    /// Get current status of the competition
    pub fn status(&self) -> CompetitionStatus {
        self.status_at(Utc::now())
    }

    /// Whether new participants may still enroll
    pub fn is_joinable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.status_at(now) != CompetitionStatus::Ended
    }

    /// Whether progress reports are accepted
    pub fn accepts_progress_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.status_at(now) == CompetitionStatus::Ongoing
    }

    /// Check whether `user_id` may manage tasks and settings
    pub fn is_managed_by(&self, user_id: &Uuid, role: &str) -> bool {
        self.owner_id == *user_id || role == crate::constants::roles::ADMIN
    }
}

/// Competition lifecycle status, derived from the date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    Upcoming,
    Ongoing,
    Ended,
}

impl std::fmt::Display for CompetitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Ended => write!(f, "ended"),
        }
    }
}
