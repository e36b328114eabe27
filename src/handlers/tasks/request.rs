//! Task and progress request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_PROGRESS_NOTES_LENGTH, MAX_TASK_NAME_LENGTH, MAX_TASK_UNIT_LENGTH};

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = MAX_TASK_NAME_LENGTH))]
    pub name: String,

    pub description: Option<String>,

    /// Value that earns full credit
    #[validate(range(exclusive_min = 0.0))]
    pub target_value: f64,

    #[validate(length(min = 1, max = MAX_TASK_UNIT_LENGTH))]
    pub unit: String,

    #[validate(range(min = 1))]
    pub points_value: i32,

    pub exercise_id: Option<Uuid>,
}

/// Update task request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = MAX_TASK_NAME_LENGTH))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0))]
    pub target_value: Option<f64>,

    #[validate(length(min = 1, max = MAX_TASK_UNIT_LENGTH))]
    pub unit: Option<String>,

    #[validate(range(min = 1))]
    pub points_value: Option<i32>,

    pub exercise_id: Option<Uuid>,
}

/// Progress report
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(range(min = 0.0))]
    pub current_value: f64,

    /// Replaces stored notes; omitted keeps them
    #[validate(length(max = MAX_PROGRESS_NOTES_LENGTH))]
    pub notes: Option<String>,
}
