//! Teacher domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::FieldOrder;

/// A teacher, identified by a unique, case-sensitive email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    /// A not-yet-persisted teacher with a fresh id and timestamps.
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for registering one or more teachers.
///
/// Individual emails are not checked here; invalid ones are skipped during
/// registration.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterTeachersRequest {
    #[serde(default)]
    #[validate(length(min = 1, code = "teachers_required"))]
    #[schema(example = json!(["teacherken@gmail.com", "teacherjoe@gmail.com"]))]
    pub teachers: Vec<String>,
}

impl FieldOrder for RegisterTeachersRequest {
    const FIELD_ORDER: &'static [&'static str] = &["teachers"];
}

/// Query string of the common-students lookup; `teacher` may repeat.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommonStudentsQuery {
    /// Teacher email, repeated once per teacher.
    #[serde(default)]
    pub teacher: Vec<String>,
}

/// Students registered to every requested teacher.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommonStudentsResponse {
    #[schema(example = json!(["commonstudent1@gmail.com", "commonstudent2@gmail.com"]))]
    pub students: Vec<String>,
}
