//! Competition management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Routes readable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_competitions))
        .route("/{id}", get(handler::get_competition))
        .route("/{id}/leaderboard", get(handler::get_leaderboard))
}

/// Routes that need an authenticated caller
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        // Competition CRUD
        .route("/", post(handler::create_competition))
        .route(
            "/{id}",
            axum::routing::put(handler::update_competition).delete(handler::delete_competition),
        )
        // Enrollment
        .route("/{id}/join", post(handler::join_competition))
        .route("/{id}/leave", post(handler::leave_competition))
        .route("/{id}/me", get(handler::get_membership))
        // Leaderboard maintenance
        .route(
            "/{id}/leaderboard/recompute",
            post(handler::recompute_leaderboard),
        )
}
