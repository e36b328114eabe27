//! Competition task and progress handlers
//!
//! Nested under `/competitions/{id}`.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Routes readable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/{id}/tasks", get(handler::list_tasks))
}

/// Routes that need an authenticated caller
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/tasks", post(handler::create_task))
        .route(
            "/{id}/tasks/{task_id}",
            put(handler::update_task).delete(handler::delete_task),
        )
        .route(
            "/{id}/tasks/{task_id}/progress",
            put(handler::update_progress),
        )
}
