//! Application error types.
//!
//! Every failure the API reports is one of the [`ErrorKind`] variants. All of
//! them are rendered as `422 Unprocessable Entity` with a `{code, message}`
//! JSON body. Storage failures carry the underlying error chain as their
//! message.

use anyhow::Error;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The catalogue of errors surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DecodingRequest,
    TeacherRequired,
    TeachersRequired,
    StudentRequired,
    StudentsRequired,
    TeacherNotFound,
    StudentNotFound,
    MissingTeacherParam,
    NotificationRequired,
    InvalidTeacherEmail,
    InvalidStudentEmail,
    /// Opaque failure from the storage layer.
    Storage,
}

impl ErrorKind {
    const VALIDATION_KINDS: [ErrorKind; 11] = [
        Self::DecodingRequest,
        Self::TeacherRequired,
        Self::TeachersRequired,
        Self::StudentRequired,
        Self::StudentsRequired,
        Self::TeacherNotFound,
        Self::StudentNotFound,
        Self::MissingTeacherParam,
        Self::NotificationRequired,
        Self::InvalidTeacherEmail,
        Self::InvalidStudentEmail,
    ];

    /// Numeric code reported in the response body.
    pub fn code(self) -> u16 {
        StatusCode::UNPROCESSABLE_ENTITY.as_u16()
    }

    /// Fixed client-facing message. Storage failures report their own cause
    /// instead, see [`AppError::message`].
    pub fn message(self) -> &'static str {
        match self {
            Self::DecodingRequest => "Please pass valid parameters!",
            Self::TeacherRequired => "A valid teacher email is required!",
            Self::TeachersRequired => "No teachers provided for registration!",
            Self::StudentRequired => "A valid student email is required!",
            Self::StudentsRequired => "No students provided for registration!",
            Self::TeacherNotFound => "Teacher's email you provided doesn't exists!",
            Self::StudentNotFound => "Student's email you provided doesn't exists!",
            Self::MissingTeacherParam => "Teacher parameter is missing in the request!",
            Self::NotificationRequired => "Please enter notification text!",
            Self::InvalidTeacherEmail => "Please enter valid teacher's email!",
            Self::InvalidStudentEmail => "Please enter valid student's email!",
            Self::Storage => "Storage failure",
        }
    }

    /// Machine name used as the `validator` error code for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecodingRequest => "decoding_request",
            Self::TeacherRequired => "teacher_required",
            Self::TeachersRequired => "teachers_required",
            Self::StudentRequired => "student_required",
            Self::StudentsRequired => "students_required",
            Self::TeacherNotFound => "teacher_not_found",
            Self::StudentNotFound => "student_not_found",
            Self::MissingTeacherParam => "missing_teacher_param",
            Self::NotificationRequired => "notification_required",
            Self::InvalidTeacherEmail => "invalid_teacher_email",
            Self::InvalidStudentEmail => "invalid_student_email",
            Self::Storage => "storage",
        }
    }

    /// Looks a kind up by its machine name. Storage is never produced here.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::VALIDATION_KINDS
            .into_iter()
            .find(|kind| kind.as_str() == code)
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 422)]
    pub code: u16,
    #[schema(example = "Teacher's email you provided doesn't exists!")]
    pub message: String,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            error: anyhow::anyhow!(kind.message()),
        }
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind: ErrorKind::Storage,
            error: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Storage => format!("{:#}", self.error),
            kind => kind.message().to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error_code = {}, error_message = {}",
            self.kind.code(),
            self.message()
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Storage {
            tracing::error!(error = %format!("{:#}", self.error), "Storage failure");
        }

        let body = Json(ErrorResponse {
            code: self.kind.code(),
            message: self.message(),
        });

        let mut response = (self.status(), body).into_response();
        response.headers_mut().insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::storage(err)
    }
}
