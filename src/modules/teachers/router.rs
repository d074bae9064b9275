use crate::modules::teachers::controller::{
    common_students, register_students, register_teachers, retrieve_for_notifications,
    suspend_student, welcome,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/register", post(register_students))
        .route("/suspend", post(suspend_student))
        .route("/commonstudents", get(common_students))
        .route("/retrievefornotifications", post(retrieve_for_notifications))
        .route("/registerteachers", post(register_teachers))
}
