mod common;

use axum::http::StatusCode;
use classroom_models::StudentStatus;
use common::{assert_error, post_json, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_suspend_student() {
    let (app, store) = setup_test_app();
    store.seed_student("studentmary@gmail.com", StudentStatus::Active);

    let response = post_json(
        app.clone(),
        "/api/suspend",
        json!({ "student": "studentmary@gmail.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.student("studentmary@gmail.com").unwrap().is_suspended());

    // Suspending again is accepted and changes nothing.
    let response = post_json(app, "/api/suspend", json!({ "student": "studentmary@gmail.com" })).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.student("studentmary@gmail.com").unwrap().is_suspended());
}

#[tokio::test]
async fn test_suspend_unknown_student() {
    let (app, store) = setup_test_app();
    store.seed_student("studentmary@gmail.com", StudentStatus::Active);

    let response = post_json(app, "/api/suspend", json!({ "student": "studentghost@gmail.com" })).await;

    assert_error(response, "Student's email you provided doesn't exists!").await;
    assert_eq!(
        store.student("studentmary@gmail.com").unwrap().status,
        StudentStatus::Active
    );
}

#[tokio::test]
async fn test_suspend_validation() {
    let cases = [
        (json!({}), "A valid student email is required!"),
        (json!({ "student": "" }), "A valid student email is required!"),
        (json!({ "student": "mary" }), "Please enter valid student's email!"),
    ];

    for (body, message) in cases {
        let (app, _store) = setup_test_app();
        let response = post_json(app, "/api/suspend", body).await;
        assert_error(response, message).await;
    }
}
