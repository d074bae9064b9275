use crate::modules::teachers::model::{
    CommonStudentsQuery, CommonStudentsResponse, RecipientsResponse, RegisterStudentsRequest,
    RegisterTeachersRequest, RetrieveForNotificationsRequest, SuspendStudentRequest,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::{Query, QueryRejection};
use classroom_core::email::is_valid_email;
use classroom_core::errors::{AppError, ErrorKind, ErrorResponse};
use tracing::{debug, instrument};

#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "Welcome message", body = String, content_type = "text/plain")
    ),
    tag = "Classroom"
)]
pub async fn welcome() -> &'static str {
    "Hello, World!"
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterStudentsRequest,
    responses(
        (status = 204, description = "Students registered to the teacher"),
        (status = 422, description = "Invalid request or unknown teacher", body = ErrorResponse)
    ),
    tag = "Classroom"
)]
#[instrument(skip(state))]
pub async fn register_students(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentsRequest>,
) -> Result<StatusCode, AppError> {
    state
        .teacher_service
        .register_students(&dto.teacher, &dto.students)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/suspend",
    request_body = SuspendStudentRequest,
    responses(
        (status = 204, description = "Student suspended"),
        (status = 422, description = "Invalid request or unknown student", body = ErrorResponse)
    ),
    tag = "Classroom"
)]
#[instrument(skip(state))]
pub async fn suspend_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SuspendStudentRequest>,
) -> Result<StatusCode, AppError> {
    state.teacher_service.suspend_student(&dto.student).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/commonstudents",
    params(CommonStudentsQuery),
    responses(
        (status = 200, description = "Students registered to all given teachers", body = CommonStudentsResponse),
        (status = 422, description = "Missing or invalid teacher, or unknown teacher", body = ErrorResponse)
    ),
    tag = "Classroom"
)]
#[instrument(skip(state, query))]
pub async fn common_students(
    State(state): State<AppState>,
    query: Result<Query<CommonStudentsQuery>, QueryRejection>,
) -> Result<Json<CommonStudentsResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "Rejected query string");
        AppError::new(ErrorKind::DecodingRequest)
    })?;

    if query.teacher.is_empty() {
        return Err(AppError::new(ErrorKind::MissingTeacherParam));
    }
    if !query.teacher.iter().all(|teacher| is_valid_email(teacher)) {
        return Err(AppError::new(ErrorKind::InvalidTeacherEmail));
    }

    let students = state
        .teacher_service
        .common_students(&query.teacher)
        .await?;
    Ok(Json(CommonStudentsResponse { students }))
}

#[utoipa::path(
    post,
    path = "/api/retrievefornotifications",
    request_body = RetrieveForNotificationsRequest,
    responses(
        (status = 200, description = "Students who should receive the notification", body = RecipientsResponse),
        (status = 422, description = "Invalid request or unknown teacher", body = ErrorResponse)
    ),
    tag = "Classroom"
)]
#[instrument(skip(state))]
pub async fn retrieve_for_notifications(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RetrieveForNotificationsRequest>,
) -> Result<Json<RecipientsResponse>, AppError> {
    let recipients = state
        .teacher_service
        .fetch_students_for_notification(&dto.teacher, &dto.notification)
        .await?;
    Ok(Json(RecipientsResponse { recipients }))
}

#[utoipa::path(
    post,
    path = "/api/registerteachers",
    request_body = RegisterTeachersRequest,
    responses(
        (status = 204, description = "Teachers registered"),
        (status = 422, description = "No teachers provided", body = ErrorResponse)
    ),
    tag = "Classroom"
)]
#[instrument(skip(state))]
pub async fn register_teachers(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterTeachersRequest>,
) -> Result<StatusCode, AppError> {
    state.teacher_service.register_teachers(&dto.teachers).await?;
    Ok(StatusCode::NO_CONTENT)
}
