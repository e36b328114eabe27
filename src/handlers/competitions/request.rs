//! Competition request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_COMPETITION_DESCRIPTION_LENGTH, MAX_COMPETITION_NAME_LENGTH};

/// Create competition request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompetitionRequest {
    /// Gym hosting the competition
    pub gym_id: Uuid,

    #[validate(length(min = 1, max = MAX_COMPETITION_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = MAX_COMPETITION_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// First instant of the competition (inclusive)
    pub start_date: DateTime<Utc>,

    /// End of the competition (exclusive)
    pub end_date: DateTime<Utc>,

    /// Maximum number of active participants, unbounded when absent
    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,
}

/// Update competition request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = MAX_COMPETITION_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(length(max = MAX_COMPETITION_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,

    /// Drop the participant limit entirely
    pub remove_participant_limit: Option<bool>,

    /// Administrative on/off switch
    pub is_active: Option<bool>,
}

/// List competitions query parameters
#[derive(Debug, Deserialize)]
pub struct ListCompetitionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub gym_id: Option<Uuid>,
    pub status: Option<String>, // upcoming, ongoing, ended
    pub active_only: Option<bool>,
}

/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn create_request(name: &str, max_participants: Option<i32>) -> CreateCompetitionRequest {
        let start = Utc::now();
        CreateCompetitionRequest {
            gym_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            start_date: start,
            end_date: start + Duration::days(30),
            max_participants,
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request("Deadlift December", Some(20)).validate().is_ok());
        assert!(create_request("Open Plank Month", None).validate().is_ok());
        assert!(create_request("", None).validate().is_err());
        assert!(create_request("Zero Seats", Some(0)).validate().is_err());
    }

    #[test]
    fn test_update_request_deserializes_partially() {
        let payload: UpdateCompetitionRequest =
            serde_json::from_str(r#"{"is_active": false}"#).unwrap();

        assert_eq!(payload.is_active, Some(false));
        assert!(payload.name.is_none());
        assert!(payload.validate().is_ok());
    }
}
