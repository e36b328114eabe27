//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod competitions;
pub mod health;
pub mod tasks;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(competitions::public_routes())
        .merge(tasks::public_routes());

    let protected = Router::new()
        .merge(competitions::protected_routes())
        .merge(tasks::protected_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .nest("/competitions", public.merge(protected))
}
