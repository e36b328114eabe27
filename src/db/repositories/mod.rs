//! Database repositories
//!
//! Repositories handle all direct database interactions. Every function takes
//! a `PgExecutor`, so the same query runs against the pool or inside a
//! transaction (`&mut *tx`).

pub mod competition_repo;
pub mod participant_repo;
pub mod progress_repo;
pub mod task_repo;

pub use competition_repo::{CompetitionFilter, CompetitionRepository};
pub use participant_repo::ParticipantRepository;
pub use progress_repo::ProgressRepository;
pub use task_repo::TaskRepository;
