//! Leaderboard ordering
//!
//! Active participants are ordered by completion percentage, then total
//! points (both descending). Exact ties fall back to the earlier join date and
//! finally to the participant id so the order never depends on storage order.
//! Every participant receives a distinct rank, `1..=N`.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Fields of a participant that determine its leaderboard position
#[derive(Debug, Clone, FromRow)]
pub struct RankCandidate {
    pub id: Uuid,
    pub completion_pct: f64,
    pub total_points: i64,
    pub join_date: DateTime<Utc>,
}

/// Leaderboard order: better participants compare as `Less`
pub fn leaderboard_order(a: &RankCandidate, b: &RankCandidate) -> Ordering {
    b.completion_pct
        .total_cmp(&a.completion_pct)
        .then_with(|| b.total_points.cmp(&a.total_points))
        .then_with(|| a.join_date.cmp(&b.join_date))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort candidates and assign sequential ranks starting at 1
pub fn assign_ranks(mut candidates: Vec<RankCandidate>) -> Vec<(Uuid, i32)> {
    candidates.sort_by(leaderboard_order);

    candidates
        .into_iter()
        .zip(1..)
        .map(|(candidate, rank)| (candidate.id, rank))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn candidate(pct: f64, points: i64, joined_minutes_ago: i64) -> RankCandidate {
        RankCandidate {
            id: Uuid::new_v4(),
            completion_pct: pct,
            total_points: points,
            join_date: Utc::now() - Duration::minutes(joined_minutes_ago),
        }
    }

    #[test]
    fn test_points_break_completion_ties() {
        let first = candidate(100.0, 300, 30);
        let second = candidate(50.0, 200, 20);
        let third = candidate(50.0, 250, 10);

        let ranks = assign_ranks(vec![first.clone(), second.clone(), third.clone()]);

        assert_eq!(ranks, vec![(first.id, 1), (third.id, 2), (second.id, 3)]);
    }

    #[test]
    fn test_completion_beats_points() {
        let finisher = candidate(100.0, 10, 5);
        let grinder = candidate(66.0, 10_000, 50);

        let ranks = assign_ranks(vec![grinder.clone(), finisher.clone()]);
        assert_eq!(ranks[0], (finisher.id, 1));
        assert_eq!(ranks[1], (grinder.id, 2));
    }

    #[test]
    fn test_exact_ties_go_to_earliest_joiner() {
        let late = candidate(50.0, 100, 1);
        let early = candidate(50.0, 100, 60);

        let ranks = assign_ranks(vec![late.clone(), early.clone()]);
        assert_eq!(ranks, vec![(early.id, 1), (late.id, 2)]);
    }

    #[test]
    fn test_ties_never_share_a_rank() {
        let now = Utc::now();
        let candidates: Vec<RankCandidate> = (0..5)
            .map(|_| RankCandidate {
                id: Uuid::new_v4(),
                completion_pct: 0.0,
                total_points: 0,
                join_date: now,
            })
            .collect();

        let ranks = assign_ranks(candidates);
        let numbers: Vec<i32> = ranks.iter().map(|(_, rank)| *rank).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

        // Same-instant joins are ordered by id
        let ids: Vec<Uuid> = ranks.iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_ranking_is_deterministic_regardless_of_input_order() {
        let a = candidate(75.0, 150, 3);
        let b = candidate(75.0, 150, 3);
        let c = candidate(25.0, 400, 9);

        let forward = assign_ranks(vec![a.clone(), b.clone(), c.clone()]);
        let backward = assign_ranks(vec![c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(assign_ranks(Vec::new()).is_empty());
    }
}
