//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and endpoint bucket.
//! When Redis is unreachable requests are let through.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use std::net::SocketAddr;
use tracing::warn;

use crate::{
    constants::{API_BASE_PATH, rate_limits},
    error::AppError,
    state::AppState,
};

/// Endpoint groups sharing one counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Progress,
    Enrollment,
    Competitions,
    General,
}

impl Bucket {
    fn name(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Enrollment => "enrollment",
            Self::Competitions => "competitions",
            Self::General => "general",
        }
    }

    /// (max requests, window seconds)
    fn limit(self) -> (i64, i64) {
        match self {
            Self::Progress => (
                rate_limits::PROGRESS_MAX_REQUESTS,
                rate_limits::PROGRESS_WINDOW_SECS,
            ),
            Self::Enrollment => (
                rate_limits::ENROLLMENT_MAX_REQUESTS,
                rate_limits::ENROLLMENT_WINDOW_SECS,
            ),
            Self::Competitions | Self::General => (
                rate_limits::GENERAL_MAX_REQUESTS,
                rate_limits::GENERAL_WINDOW_SECS,
            ),
        }
    }
}

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bucket = path_bucket(request.method(), request.uri().path());
    let (limit, window) = bucket.limit();
    let key = format!("rate_limit:{}:{}", addr.ip(), bucket.name());

    let mut redis = state.redis();
    let count = match redis.incr::<_, _, i64>(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable, allowing request");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        if let Err(e) = redis.expire::<_, ()>(&key, window).await {
            warn!(error = %e, key = %key, "Failed to set rate limit window");
        }
    }

    if count > limit {
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Classify a request into its rate limit bucket
fn path_bucket(method: &Method, path: &str) -> Bucket {
    let Some(rest) = path
        .strip_prefix(API_BASE_PATH)
        .and_then(|p| p.strip_prefix("/competitions"))
    else {
        return Bucket::General;
    };

    if *method == Method::PUT && rest.ends_with("/progress") {
        Bucket::Progress
    } else if *method == Method::POST && (rest.ends_with("/join") || rest.ends_with("/leave")) {
        Bucket::Enrollment
    } else {
        Bucket::Competitions
    }
}
