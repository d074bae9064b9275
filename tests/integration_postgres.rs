//! PostgreSQL adapter tests. They need `DATABASE_URL` pointing at a server
//! where test databases can be created:
//!
//! ```bash
//! cargo test --test integration_postgres -- --ignored
//! ```

mod common;

use axum::http::StatusCode;
use classroom::router::init_router;
use classroom::state::AppState;
use classroom_db::Repositories;
use classroom_models::StudentStatus;
use common::{JOE, KEN, body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(AppState::new(Repositories::postgres(pool)))
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_register_and_query_common_students(pool: PgPool) {
    let repositories = Repositories::postgres(pool.clone());
    repositories.teachers.create(KEN).await.unwrap();
    repositories.teachers.create(JOE).await.unwrap();

    let app = setup_test_app(pool.clone());
    for teacher in [KEN, JOE] {
        let response = post_json(
            app.clone(),
            "/api/register",
            json!({
                "teacher": teacher,
                "students": ["commonstudent1@gmail.com", "commonstudent1@gmail.com"]
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teacher_students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 2);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher={JOE}"),
    )
    .await;
    assert_eq!(
        body_json(response).await,
        json!({ "students": ["commonstudent1@gmail.com"] })
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_suspend_excludes_from_active_students(pool: PgPool) {
    let repositories = Repositories::postgres(pool.clone());
    let teacher = repositories.teachers.create(KEN).await.unwrap();
    for email in ["studentbob@gmail.com", "studentmary@gmail.com"] {
        let student = repositories
            .students
            .create(email, StudentStatus::Active)
            .await
            .unwrap();
        repositories
            .teacher_students
            .create(teacher.id, student.id)
            .await
            .unwrap();
    }

    let app = setup_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/suspend",
        json!({ "student": "studentmary@gmail.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mary = repositories
        .students
        .find_by_email("studentmary@gmail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mary.status, StudentStatus::Suspended);

    let active: Vec<String> = repositories
        .teacher_students
        .active_students_of(KEN)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.email)
        .collect();
    assert_eq!(active, vec!["studentbob@gmail.com"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_rolled_back_scope_leaves_no_rows(pool: PgPool) {
    let repositories = Repositories::postgres(pool.clone());

    let scope = repositories.transactions.begin().await.unwrap();
    scope
        .students()
        .create("studentjon@gmail.com", StudentStatus::Active)
        .await
        .unwrap();
    assert!(
        scope
            .students()
            .find_by_email("studentjon@gmail.com")
            .await
            .unwrap()
            .is_some()
    );
    scope.rollback().await.unwrap();

    assert!(
        repositories
            .students
            .find_by_email("studentjon@gmail.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_teacher_email_is_a_storage_failure(pool: PgPool) {
    let repositories = Repositories::postgres(pool);
    repositories.teachers.create(KEN).await.unwrap();

    let err = repositories.teachers.create(KEN).await.unwrap_err();
    assert!(format!("{err:#}").starts_with("Failed to create teacher"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_recipients_from_database(pool: PgPool) {
    let repositories = Repositories::postgres(pool.clone());
    let teacher = repositories.teachers.create(KEN).await.unwrap();
    let bob = repositories
        .students
        .create("studentbob@gmail.com", StudentStatus::Graduated)
        .await
        .unwrap();
    repositories
        .teacher_students
        .create(teacher.id, bob.id)
        .await
        .unwrap();

    let response = post_json(
        setup_test_app(pool),
        "/api/retrievefornotifications",
        json!({ "teacher": KEN, "notification": "Hi @studentagnes@gmail.com" }),
    )
    .await;

    assert_eq!(
        body_json(response).await,
        json!({ "recipients": ["studentagnes@gmail.com", "studentbob@gmail.com"] })
    );
}
