//! Business logic services

pub mod auth_service;
pub mod competition_service;
pub mod enrollment_service;
pub mod leaderboard_service;
pub mod progress_service;
pub mod scoring_service;
pub mod task_service;

pub use auth_service::AuthService;
pub use competition_service::CompetitionService;
pub use enrollment_service::EnrollmentService;
pub use leaderboard_service::LeaderboardService;
pub use progress_service::ProgressService;
pub use scoring_service::ScoringService;
pub use task_service::TaskService;
