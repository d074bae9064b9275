mod common;

use axum::http::StatusCode;
use classroom_models::StudentStatus;
use common::{JOE, KEN, assert_error, body_json, get, setup_test_app};
use serde_json::json;

fn seed(store: &classroom_db::memory::MemoryStore) {
    store.seed_registration(KEN, "commonstudent1@gmail.com");
    store.seed_registration(KEN, "commonstudent2@gmail.com");
    store.seed_registration(KEN, "student_only_under_teacher_ken@gmail.com");
    store.seed_registration(JOE, "commonstudent1@gmail.com");
    store.seed_registration(JOE, "commonstudent2@gmail.com");
}

#[tokio::test]
async fn test_common_students_of_two_teachers() {
    let (app, store) = setup_test_app();
    seed(&store);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher={JOE}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "students": ["commonstudent1@gmail.com", "commonstudent2@gmail.com"] })
    );
}

#[tokio::test]
async fn test_common_students_of_one_teacher() {
    let (app, store) = setup_test_app();
    seed(&store);

    let response = get(app, &format!("/api/commonstudents?teacher={KEN}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "students": [
                "commonstudent1@gmail.com",
                "commonstudent2@gmail.com",
                "student_only_under_teacher_ken@gmail.com"
            ]
        })
    );
}

#[tokio::test]
async fn test_common_students_keep_suspended_students() {
    let (app, store) = setup_test_app();
    seed(&store);
    store.seed_student("commonstudent1@gmail.com", StudentStatus::Suspended);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher={JOE}"),
    )
    .await;

    let body = body_json(response).await;
    assert_eq!(body["students"][0], "commonstudent1@gmail.com");
}

#[tokio::test]
async fn test_common_students_empty_result_is_a_list() {
    let (app, store) = setup_test_app();
    store.seed_teacher(KEN);

    let response = get(app, &format!("/api/commonstudents?teacher={KEN}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "students": [] }));
}

// Known quirk: repeating a teacher raises the number of links a student
// needs, so nobody qualifies.
#[tokio::test]
async fn test_common_students_repeated_teacher_matches_nobody() {
    let (app, store) = setup_test_app();
    seed(&store);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher={KEN}"),
    )
    .await;

    assert_eq!(body_json(response).await, json!({ "students": [] }));
}

#[tokio::test]
async fn test_common_students_missing_param() {
    let (app, _store) = setup_test_app();

    let response = get(app, "/api/commonstudents").await;
    assert_error(response, "Teacher parameter is missing in the request!").await;
}

#[tokio::test]
async fn test_common_students_invalid_teacher() {
    let (app, store) = setup_test_app();
    seed(&store);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher=teacherjoe"),
    )
    .await;
    assert_error(response, "Please enter valid teacher's email!").await;
}

#[tokio::test]
async fn test_common_students_unknown_teacher() {
    let (app, store) = setup_test_app();
    seed(&store);

    let response = get(
        app,
        &format!("/api/commonstudents?teacher={KEN}&teacher=teacherghost@gmail.com"),
    )
    .await;
    assert_error(response, "Teacher's email you provided doesn't exists!").await;
}
