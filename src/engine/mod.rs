//! Competition engine rules
//!
//! Pure functions behind enrollment, progress, scoring and ranking. The
//! services call them inside database transactions; nothing in here touches
//! storage.

pub mod enrollment;
pub mod progress;
pub mod ranking;
pub mod scoring;

pub use enrollment::{Admission, admit, ensure_can_leave};
pub use progress::{ProgressChange, apply_report, evaluate_completion, validate_value};
pub use ranking::{RankCandidate, assign_ranks, leaderboard_order};
pub use scoring::{ScoreSummary, score_participant, task_contribution};
