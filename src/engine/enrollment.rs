//! Admission rules for joining and leaving a competition
//!
//! These checks run inside the transaction that holds the competition row
//! lock, so `active_count` cannot change between the check and the insert.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Competition, Participant},
};

/// What a successful join does to the participant table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Insert a fresh participant row
    Enroll,
    /// Reactivate the row of a user who left earlier
    Rejoin(Uuid),
}

/// Decide whether `existing` (the user's row, if any) may join
pub fn admit(
    competition: &Competition,
    existing: Option<&Participant>,
    active_count: i64,
    now: DateTime<Utc>,
) -> AppResult<Admission> {
    if !competition.is_joinable_at(now) {
        let reason = if competition.is_active {
            "Competition has already ended"
        } else {
            "Competition is not active"
        };
        return Err(AppError::InvalidInput(reason.to_string()));
    }

    if existing.is_some_and(|p| p.is_active) {
        return Err(AppError::Conflict(
            "Already enrolled in this competition".to_string(),
        ));
    }

    if let Some(max) = competition.max_participants {
        if active_count >= i64::from(max) {
            return Err(AppError::CapacityExceeded(format!(
                "Competition is full ({max} participants)"
            )));
        }
    }

    Ok(match existing {
        Some(previous) => Admission::Rejoin(previous.id),
        None => Admission::Enroll,
    })
}

/// Resolve the participant row a leave request applies to
pub fn ensure_can_leave(existing: Option<&Participant>) -> AppResult<Uuid> {
    match existing {
        None => Err(AppError::NotFound(
            "Not enrolled in this competition".to_string(),
        )),
        Some(p) if !p.is_active => Err(AppError::Conflict(
            "Already left this competition".to_string(),
        )),
        Some(p) => Ok(p.id),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::models::competition::fixtures::ongoing_competition;

    fn participant(competition: &Competition, is_active: bool) -> Participant {
        Participant {
            id: Uuid::new_v4(),
            competition_id: competition.id,
            user_id: Uuid::new_v4(),
            join_date: Utc::now() - Duration::hours(3),
            is_active,
            left_at: (!is_active).then(Utc::now),
            total_points: 0,
            completion_pct: 0.0,
            rank: None,
        }
    }

    #[test]
    fn test_first_join_enrolls() {
        let now = Utc::now();
        let competition = ongoing_competition(now);

        assert_eq!(admit(&competition, None, 0, now).unwrap(), Admission::Enroll);
    }

    #[test]
    fn test_join_before_start_is_allowed() {
        let now = Utc::now();
        let mut competition = ongoing_competition(now);
        competition.start_date = now + Duration::days(1);
        competition.end_date = now + Duration::days(8);

        assert!(admit(&competition, None, 0, now).is_ok());
    }

    #[test]
    fn test_duplicate_join_conflicts() {
        let now = Utc::now();
        let competition = ongoing_competition(now);
        let active = participant(&competition, true);

        let err = admit(&competition, Some(&active), 1, now).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_capacity_reached() {
        let now = Utc::now();
        let mut competition = ongoing_competition(now);
        competition.max_participants = Some(2);

        let err = admit(&competition, None, 2, now).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(_)));

        // One slot frees up after a leave
        assert!(admit(&competition, None, 1, now).is_ok());
    }

    #[test]
    fn test_unbounded_capacity() {
        let now = Utc::now();
        let competition = ongoing_competition(now);

        assert!(admit(&competition, None, 10_000, now).is_ok());
    }

    #[test]
    fn test_rejoin_reuses_previous_row() {
        let now = Utc::now();
        let competition = ongoing_competition(now);
        let left = participant(&competition, false);

        assert_eq!(
            admit(&competition, Some(&left), 0, now).unwrap(),
            Admission::Rejoin(left.id)
        );
    }

    #[test]
    fn test_rejoin_respects_capacity() {
        let now = Utc::now();
        let mut competition = ongoing_competition(now);
        competition.max_participants = Some(1);
        let left = participant(&competition, false);

        let err = admit(&competition, Some(&left), 1, now).unwrap_err();
        assert!(matches!(err, AppError::CapacityExceeded(_)));
    }

    #[test]
    fn test_ended_or_inactive_competition_rejects_join() {
        let now = Utc::now();
        let mut competition = ongoing_competition(now);

        let err = admit(&competition, None, 0, competition.end_date).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        competition.is_active = false;
        let err = admit(&competition, None, 0, now).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_leave_rules() {
        let competition = ongoing_competition(Utc::now());
        let active = participant(&competition, true);
        let left = participant(&competition, false);

        assert_eq!(ensure_can_leave(Some(&active)).unwrap(), active.id);
        assert!(matches!(
            ensure_can_leave(Some(&left)).unwrap_err(),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            ensure_can_leave(None).unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
