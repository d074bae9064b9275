mod common;

use axum::http::StatusCode;
use common::{JOE, KEN, assert_error, post_json, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_register_teachers() {
    let (app, store) = setup_test_app();
    store.seed_teacher(KEN);

    let response = post_json(
        app,
        "/api/registerteachers",
        json!({ "teachers": [KEN, JOE, "not-a-teacher"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let mut emails: Vec<String> = store.teachers().into_iter().map(|t| t.email).collect();
    emails.sort();
    assert_eq!(emails, vec![JOE, KEN]);
}

#[tokio::test]
async fn test_register_teachers_requires_a_list() {
    for body in [json!({}), json!({ "teachers": [] })] {
        let (app, store) = setup_test_app();
        let response = post_json(app, "/api/registerteachers", body).await;

        assert_error(response, "No teachers provided for registration!").await;
        assert!(store.teachers().is_empty());
    }
}

#[tokio::test]
async fn test_register_teachers_storage_failure() {
    let (app, store) = setup_test_app();
    store.fail_teacher_creation_for(KEN);

    let response = post_json(app, "/api/registerteachers", json!({ "teachers": [KEN, JOE] })).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.teachers().is_empty());
}
