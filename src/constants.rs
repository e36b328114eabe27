//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body size in bytes (64 KB)
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers (issued by the auth service)
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const GYM_OWNER: &str = "gym_owner";
    pub const MEMBER: &str = "member";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, GYM_OWNER, MEMBER];
}

// =============================================================================
// COMPETITION SETTINGS
// =============================================================================

/// Competition lifecycle filters accepted by the list endpoint
pub mod competition_status {
    pub const UPCOMING: &str = "upcoming";
    pub const ONGOING: &str = "ongoing";
    pub const ENDED: &str = "ended";

    pub const ALL: &[&str] = &[UPCOMING, ONGOING, ENDED];
}

/// Maximum competition name length
pub const MAX_COMPETITION_NAME_LENGTH: u64 = 256;

/// Maximum competition description length
pub const MAX_COMPETITION_DESCRIPTION_LENGTH: u64 = 10_000;

/// Maximum task name length
pub const MAX_TASK_NAME_LENGTH: u64 = 256;

/// Maximum task unit length ("kg", "reps", "km", ...)
pub const MAX_TASK_UNIT_LENGTH: u64 = 32;

/// Maximum length of free-text progress notes
pub const MAX_PROGRESS_NOTES_LENGTH: u64 = 2_000;

/// Completion percentage of a participant that finished every task
pub const FULL_COMPLETION_PCT: f64 = 100.0;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Progress reporting - max requests
    pub const PROGRESS_MAX_REQUESTS: i64 = 30;
    /// Progress reporting - window in seconds
    pub const PROGRESS_WINDOW_SECS: i64 = 60;

    /// Join/leave - max requests
    pub const ENROLLMENT_MAX_REQUESTS: i64 = 10;
    /// Join/leave - window in seconds
    pub const ENROLLMENT_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated lists
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default page size for leaderboard pages
pub const DEFAULT_LEADERBOARD_PAGE_SIZE: u32 = 50;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
