//! Student domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, FromRow, Type,
    postgres::{PgTypeInfo, Postgres},
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validation::FieldOrder;

/// Lifecycle status of a student.
///
/// Students start `ACTIVE` and can be suspended. `GRADUATED` is a valid
/// stored value but no operation moves a student into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StudentStatus {
    #[default]
    Active,
    Suspended,
    Graduated,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Graduated => "GRADUATED",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored status is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown student status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for StudentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "SUSPENDED" => Ok(Self::Suspended),
            "GRADUATED" => Ok(Self::Graduated),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// Stored as TEXT.
impl Type<Postgres> for StudentStatus {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for StudentStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for StudentStatus {
    fn decode(
        value: <Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

/// A student, identified by a unique email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub email: String,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// A not-yet-persisted student with a fresh id and timestamps.
    pub fn new(email: impl Into<String>, status: StudentStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.status == StudentStatus::Suspended
    }
}

/// DTO for registering students under a teacher.
///
/// Student emails are checked one by one during registration; invalid ones are
/// skipped rather than rejected here.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterStudentsRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::validation::teacher_email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    #[serde(default)]
    #[validate(length(min = 1, code = "students_required"))]
    #[schema(example = json!(["studentjon@gmail.com", "studenthon@gmail.com"]))]
    pub students: Vec<String>,
}

impl FieldOrder for RegisterStudentsRequest {
    const FIELD_ORDER: &'static [&'static str] = &["teacher", "students"];
}

/// DTO for suspending a student.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct SuspendStudentRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::validation::student_email"))]
    #[schema(example = "studentmary@gmail.com")]
    pub student: String,
}

impl FieldOrder for SuspendStudentRequest {
    const FIELD_ORDER: &'static [&'static str] = &["student"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            StudentStatus::Active,
            StudentStatus::Suspended,
            StudentStatus::Graduated,
        ] {
            assert_eq!(status.as_str().parse::<StudentStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_text() {
        assert_eq!(
            "Active".parse::<StudentStatus>(),
            Err(UnknownStatus("Active".to_string()))
        );
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&StudentStatus::Suspended).unwrap(),
            "\"SUSPENDED\""
        );
        assert_eq!(StudentStatus::default(), StudentStatus::Active);
    }

    #[test]
    fn test_register_students_valid() {
        let dto = RegisterStudentsRequest {
            teacher: "teacherken@gmail.com".to_string(),
            students: vec!["studentjon@gmail.com".to_string()],
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_register_students_missing_fields_default_to_empty() {
        let dto: RegisterStudentsRequest = serde_json::from_str("{}").unwrap();
        assert!(dto.teacher.is_empty());
        assert!(dto.students.is_empty());

        let errors = dto.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors["teacher"][0].code, "teacher_required");
        assert_eq!(field_errors["students"][0].code, "students_required");
    }

    #[test]
    fn test_register_students_invalid_teacher() {
        let dto = RegisterStudentsRequest {
            teacher: "teacherken".to_string(),
            students: vec!["studentjon@gmail.com".to_string()],
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["teacher"][0].code,
            "invalid_teacher_email"
        );
    }

    #[test]
    fn test_register_students_keeps_invalid_student_emails() {
        let dto = RegisterStudentsRequest {
            teacher: "teacherken@gmail.com".to_string(),
            students: vec!["not-an-email".to_string()],
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_suspend_student_rules() {
        let empty = SuspendStudentRequest {
            student: String::new(),
        };
        assert_eq!(
            empty.validate().unwrap_err().field_errors()["student"][0].code,
            "student_required"
        );

        let invalid = SuspendStudentRequest {
            student: "mary".to_string(),
        };
        assert_eq!(
            invalid.validate().unwrap_err().field_errors()["student"][0].code,
            "invalid_student_email"
        );
    }
}
