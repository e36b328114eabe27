//! Progress transitions
//!
//! `is_completed` always reflects the latest reported value and may flip back
//! to `false`. `completion_date` records the first completion and is never
//! cleared or moved afterwards.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::Progress,
};

/// New state of a progress row after a report
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressChange {
    pub current_value: f64,
    pub is_completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// True when this report completed the task for the first time
    pub first_completion: bool,
}

/// Reject negative, NaN and infinite values
pub fn validate_value(value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::InvalidInput(
            "Progress value must be a finite number".to_string(),
        ));
    }
    if value < 0.0 {
        return Err(AppError::InvalidInput(
            "Progress value must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Completion flag and first-completion timestamp for a value against a target
pub fn evaluate_completion(
    value: f64,
    target_value: f64,
    previous_completion: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (bool, Option<DateTime<Utc>>) {
    let is_completed = value >= target_value;
    let completion_date = match previous_completion {
        Some(first) => Some(first),
        None if is_completed => Some(now),
        None => None,
    };
    (is_completed, completion_date)
}

/// Apply a reported value to an existing progress row
pub fn apply_report(
    current: &Progress,
    target_value: f64,
    new_value: f64,
    notes: Option<String>,
    now: DateTime<Utc>,
) -> AppResult<ProgressChange> {
    validate_value(new_value)?;

    let (is_completed, completion_date) =
        evaluate_completion(new_value, target_value, current.completion_date, now);

    Ok(ProgressChange {
        current_value: new_value,
        is_completed,
        completion_date,
        notes: notes.or_else(|| current.notes.clone()),
        first_completion: current.completion_date.is_none() && completion_date.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::*;

    fn progress(value: f64, completion_date: Option<DateTime<Utc>>) -> Progress {
        Progress {
            id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            task_id: Uuid::new_v4(),
            current_value: value,
            is_completed: completion_date.is_some(),
            completion_date,
            notes: Some("week one".to_string()),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reaching_target_completes_and_stamps() {
        let now = Utc::now();
        let change = apply_report(&progress(40.0, None), 100.0, 100.0, None, now).unwrap();

        assert!(change.is_completed);
        assert!(change.first_completion);
        assert_eq!(change.completion_date, Some(now));
    }

    #[test]
    fn test_repeated_completion_keeps_first_timestamp() {
        let first = Utc::now() - Duration::days(2);
        let now = Utc::now();
        let change = apply_report(&progress(100.0, Some(first)), 100.0, 140.0, None, now).unwrap();

        assert!(change.is_completed);
        assert!(!change.first_completion);
        assert_eq!(change.completion_date, Some(first));
    }

    #[test]
    fn test_decrease_below_target_reverts_flag_but_keeps_date() {
        let first = Utc::now() - Duration::hours(5);
        let change =
            apply_report(&progress(100.0, Some(first)), 100.0, 60.0, None, Utc::now()).unwrap();

        assert!(!change.is_completed);
        assert_eq!(change.completion_date, Some(first));
        assert_eq!(change.current_value, 60.0);
    }

    #[test]
    fn test_below_target_stays_incomplete() {
        let change = apply_report(&progress(0.0, None), 100.0, 99.9, None, Utc::now()).unwrap();

        assert!(!change.is_completed);
        assert!(change.completion_date.is_none());
        assert!(!change.first_completion);
    }

    #[test]
    fn test_notes_replaced_only_when_supplied() {
        let row = progress(10.0, None);

        let kept = apply_report(&row, 100.0, 20.0, None, Utc::now()).unwrap();
        assert_eq!(kept.notes.as_deref(), Some("week one"));

        let replaced =
            apply_report(&row, 100.0, 20.0, Some("new PR".to_string()), Utc::now()).unwrap();
        assert_eq!(replaced.notes.as_deref(), Some("new PR"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let row = progress(10.0, None);

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = apply_report(&row, 100.0, bad, None, Utc::now()).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_zero_is_a_valid_report() {
        assert!(validate_value(0.0).is_ok());
    }
}
