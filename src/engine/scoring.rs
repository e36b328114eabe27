//! Participant scoring
//!
//! Completed tasks earn their full `points_value`. Unfinished tasks earn
//! `floor(points_value * current / target)` with `current` clamped to
//! `[0, target]`.

use serde::Serialize;

use crate::{constants::FULL_COMPLETION_PCT, models::ScoredProgress};

/// Slack added before flooring so decimal inputs such as 4.6 / 10 that land
/// just below a whole number in binary floating point still round down to it
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Aggregate score of one participant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub total_points: i64,
    pub completion_pct: f64,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

/// Points a single task contributes
pub fn task_contribution(row: &ScoredProgress) -> i64 {
    let points = i64::from(row.points_value);

    if row.is_completed {
        return points;
    }

    if row.target_value <= 0.0 || !row.current_value.is_finite() {
        return 0;
    }

    let current = row.current_value.clamp(0.0, row.target_value);
    // Multiply before dividing so exact fractions (200 * 40 / 100) stay exact.
    let exact = f64::from(row.points_value) * current / row.target_value;
    let partial = (exact + FLOOR_TOLERANCE).floor() as i64;

    partial.clamp(0, points)
}

/// Aggregate all task contributions of a participant
pub fn score_participant(rows: &[ScoredProgress]) -> ScoreSummary {
    let total_points = rows.iter().map(task_contribution).sum();
    let completed_tasks = rows.iter().filter(|row| row.is_completed).count();
    let total_tasks = rows.len();

    ScoreSummary {
        total_points,
        completion_pct: completion_pct(completed_tasks, total_tasks),
        completed_tasks,
        total_tasks,
    }
}

/// Share of completed tasks in percent; 0 when there are no tasks
pub fn completion_pct(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    (completed as f64 / total as f64 * FULL_COMPLETION_PCT).clamp(0.0, FULL_COMPLETION_PCT)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn row(current: f64, target: f64, points: i32) -> ScoredProgress {
        ScoredProgress {
            task_id: Uuid::new_v4(),
            current_value: current,
            is_completed: current >= target,
            target_value: target,
            points_value: points,
        }
    }

    #[test]
    fn test_partial_credit_is_floored() {
        assert_eq!(task_contribution(&row(40.0, 100.0, 200)), 80);
        assert_eq!(task_contribution(&row(1.0, 3.0, 100)), 33);
        assert_eq!(task_contribution(&row(2.0, 3.0, 100)), 66);
    }

    #[test]
    fn test_decimal_progress_keeps_whole_points() {
        // 100 * 4.6 / 10 is 45.99999999999999 in binary floating point
        assert_eq!(task_contribution(&row(4.6, 10.0, 100)), 46);
        assert_eq!(task_contribution(&row(2.3, 5.0, 100)), 46);
        assert_eq!(task_contribution(&row(4.1, 5.0, 100)), 82);
        assert_eq!(task_contribution(&row(0.7, 1.0, 10)), 7);
        // Genuine fractions are still floored
        assert_eq!(task_contribution(&row(4.65, 10.0, 100)), 46);
        assert_eq!(task_contribution(&row(99.9, 100.0, 10)), 9);
    }

    #[test]
    fn test_completed_task_earns_exactly_full_points() {
        assert_eq!(task_contribution(&row(100.0, 100.0, 200)), 200);
        assert_eq!(task_contribution(&row(250.0, 100.0, 200)), 200);
    }

    #[test]
    fn test_zero_progress_earns_nothing() {
        assert_eq!(task_contribution(&row(0.0, 100.0, 200)), 0);
    }

    #[test]
    fn test_unfinished_row_never_exceeds_points_value() {
        // A stale flag must not grant more than full credit
        let mut stale = row(150.0, 100.0, 200);
        stale.is_completed = false;
        assert_eq!(task_contribution(&stale), 200);
    }

    #[test]
    fn test_score_participant_aggregates() {
        let rows = vec![
            row(100.0, 100.0, 200), // 200, completed
            row(40.0, 100.0, 200),  // 80
            row(5.0, 10.0, 50),     // 25
            row(0.0, 20.0, 100),    // 0
        ];

        let summary = score_participant(&rows);
        assert_eq!(summary.total_points, 305);
        assert_eq!(summary.completed_tasks, 1);
        assert_eq!(summary.total_tasks, 4);
        assert!((summary.completion_pct - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_rows_means_zero_completion() {
        let summary = score_participant(&[]);
        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.completion_pct, 0.0);
    }

    #[test]
    fn test_completion_pct_bounds() {
        assert_eq!(completion_pct(0, 3), 0.0);
        assert_eq!(completion_pct(3, 3), 100.0);
        assert!((completion_pct(1, 3) - 33.333_333_333_333_336).abs() < 1e-9);
        assert_eq!(completion_pct(0, 0), 0.0);
    }
}
