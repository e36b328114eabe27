//! Shared helpers for database-backed tests
//!
//! Each test gets its own PostgreSQL container, migrated from scratch.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

use gymrank::{
    constants::roles,
    db,
    handlers::{
        competitions::{CompetitionResponse, CreateCompetitionRequest},
        tasks::{CreateTaskRequest, TaskResponse},
    },
    services::{CompetitionService, TaskService},
};

/// A migrated database that lives as long as the container handle
pub struct TestDb {
    pub pool: PgPool,
    _container: ContainerAsync<Postgres>,
}

/// Start PostgreSQL and run migrations
pub async fn setup() -> TestDb {
    let container = Postgres::default()
        .with_user("gymrank")
        .with_password("gymrank_test")
        .with_db_name("gymrank_test")
        .with_tag("16-alpine")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://gymrank:gymrank_test@{host}:{port}/gymrank_test");

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    TestDb {
        pool,
        _container: container,
    }
}

/// Competition owner used by the fixtures
pub fn owner() -> Uuid {
    Uuid::from_u128(0x0a11_ce00)
}

/// Create a competition that started yesterday and runs for a week
pub async fn ongoing_competition(pool: &PgPool, max_participants: Option<i32>) -> CompetitionResponse {
    let now = Utc::now();
    create_competition(pool, now - Duration::days(1), now + Duration::days(7), max_participants).await
}

/// Create a competition that starts tomorrow
pub async fn upcoming_competition(pool: &PgPool) -> CompetitionResponse {
    let now = Utc::now();
    create_competition(pool, now + Duration::days(1), now + Duration::days(8), None).await
}

async fn create_competition(
    pool: &PgPool,
    start_date: chrono::DateTime<Utc>,
    end_date: chrono::DateTime<Utc>,
    max_participants: Option<i32>,
) -> CompetitionResponse {
    CompetitionService::create_competition(
        pool,
        &owner(),
        roles::GYM_OWNER,
        CreateCompetitionRequest {
            gym_id: Uuid::new_v4(),
            name: "Iron Month".to_string(),
            description: Some("Lift more than last month".to_string()),
            start_date,
            end_date,
            max_participants,
        },
    )
    .await
    .expect("create competition")
}

/// Add a task owned by the fixture owner
pub async fn add_task(pool: &PgPool, competition_id: &Uuid, name: &str, target: f64, points: i32) -> TaskResponse {
    TaskService::create_task(
        pool,
        competition_id,
        &owner(),
        roles::GYM_OWNER,
        CreateTaskRequest {
            name: name.to_string(),
            description: None,
            target_value: target,
            unit: "kg".to_string(),
            points_value: points,
            exercise_id: None,
        },
    )
    .await
    .expect("create task")
}
