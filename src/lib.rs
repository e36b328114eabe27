//! GymRank - Gym Competition & Leaderboard Engine
//!
//! Gym owners run time-boxed fitness competitions made of measurable tasks
//! ("squat 100 kg", "run 20 km"). Members join, report progress, earn points
//! and are ranked on a per-competition leaderboard.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Transactions and orchestration
//! - **Engine**: Pure scoring, ranking and admission rules
//! - **Repositories**: Database access
//! - **Models**: Domain models
//!
//! Competition-wide changes (joins, leaves, task edits, ranking) serialize on
//! the competition row lock. Progress reports lock only the reporting
//! participant's rows.

pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
