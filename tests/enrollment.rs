//! Joining and leaving competitions against a real database

mod common;

use futures::future::join_all;
use uuid::Uuid;

use gymrank::{
    AppError,
    db::repositories::ParticipantRepository,
    services::{EnrollmentService, ProgressService},
};

#[tokio::test]
#[ignore = "requires docker"]
async fn capacity_is_enforced_and_freed_by_leaving() {
    let db = common::setup().await;
    let competition = common::ongoing_competition(&db.pool, Some(2)).await;
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    EnrollmentService::join(&db.pool, &competition.id, &a).await.unwrap();
    EnrollmentService::join(&db.pool, &competition.id, &b).await.unwrap();

    let third = EnrollmentService::join(&db.pool, &competition.id, &c).await;
    assert!(matches!(third, Err(AppError::CapacityExceeded(_))));

    EnrollmentService::leave(&db.pool, &competition.id, &a).await.unwrap();
    EnrollmentService::join(&db.pool, &competition.id, &c).await.unwrap();

    // The seat A gave up is taken now
    let rejoin = EnrollmentService::join(&db.pool, &competition.id, &a).await;
    assert!(matches!(rejoin, Err(AppError::CapacityExceeded(_))));

    let active = ParticipantRepository::count_active(&db.pool, &competition.id).await.unwrap();
    assert_eq!(active, 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn joining_twice_conflicts() {
    let db = common::setup().await;
    let competition = common::ongoing_competition(&db.pool, None).await;
    let user = Uuid::new_v4();

    EnrollmentService::join(&db.pool, &competition.id, &user).await.unwrap();
    let again = EnrollmentService::join(&db.pool, &competition.id, &user).await;

    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn leaving_requires_an_active_enrollment() {
    let db = common::setup().await;
    let competition = common::ongoing_competition(&db.pool, None).await;
    let user = Uuid::new_v4();

    let never_joined = EnrollmentService::leave(&db.pool, &competition.id, &user).await;
    assert!(matches!(never_joined, Err(AppError::NotFound(_))));

    EnrollmentService::join(&db.pool, &competition.id, &user).await.unwrap();
    EnrollmentService::leave(&db.pool, &competition.id, &user).await.unwrap();

    let twice = EnrollmentService::leave(&db.pool, &competition.id, &user).await;
    assert!(matches!(twice, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn joining_an_unknown_competition_is_not_found() {
    let db = common::setup().await;

    let result = EnrollmentService::join(&db.pool, &Uuid::new_v4(), &Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn upcoming_competitions_accept_joins_but_not_progress() {
    let db = common::setup().await;
    let competition = common::upcoming_competition(&db.pool).await;
    let task = common::add_task(&db.pool, &competition.id, "Bench", 80.0, 100).await;
    let user = Uuid::new_v4();

    let participant = EnrollmentService::join(&db.pool, &competition.id, &user).await.unwrap();
    assert_eq!(participant.total_points, 0);

    let early = ProgressService::update_progress(&db.pool, &participant.id, &task.id, 50.0, None).await;
    assert!(matches!(early, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn rejoining_restores_previous_progress() {
    let db = common::setup().await;
    let competition = common::ongoing_competition(&db.pool, None).await;
    let task = common::add_task(&db.pool, &competition.id, "Deadlift", 100.0, 200).await;
    let user = Uuid::new_v4();

    EnrollmentService::join(&db.pool, &competition.id, &user).await.unwrap();
    ProgressService::report_for_user(&db.pool, &competition.id, &user, &task.id, 40.0, None)
        .await
        .unwrap();
    EnrollmentService::leave(&db.pool, &competition.id, &user).await.unwrap();

    let back = EnrollmentService::join(&db.pool, &competition.id, &user).await.unwrap();
    assert!(back.is_active);
    assert_eq!(back.total_points, 80);
    assert_eq!(back.rank, Some(1));

    let membership = EnrollmentService::membership(&db.pool, &competition.id, &user).await.unwrap();
    assert_eq!(membership.progress.len(), 1);
    assert_eq!(membership.progress[0].current_value, 40.0);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn concurrent_joins_never_exceed_capacity() {
    let db = common::setup().await;
    let competition = common::ongoing_competition(&db.pool, Some(3)).await;

    let users: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
    let results = join_all(
        users
            .iter()
            .map(|user| EnrollmentService::join(&db.pool, &competition.id, user)),
    )
    .await;

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(AppError::CapacityExceeded(_))))
        .count();

    assert_eq!(admitted, 3);
    assert_eq!(rejected, 7);

    let active = ParticipantRepository::count_active(&db.pool, &competition.id).await.unwrap();
    assert_eq!(active, 3);
}
