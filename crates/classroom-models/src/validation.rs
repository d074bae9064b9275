//! Field rules shared by the request DTOs.
//!
//! Each rule reports an [`ErrorKind`] machine name as its `validator` error
//! code so the boundary can turn the first violation into the matching API
//! error.

use classroom_core::email::is_valid_email;
use classroom_core::errors::ErrorKind;
use validator::ValidationError;

/// Declares the order in which a DTO's field errors are reported.
///
/// `validator` collects violations into an unordered map; the first field in
/// this list that has a violation decides the response.
pub trait FieldOrder {
    const FIELD_ORDER: &'static [&'static str];
}

fn email_rule(
    email: &str,
    required: ErrorKind,
    invalid: ErrorKind,
) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new(required.as_str()));
    }
    if !is_valid_email(email) {
        return Err(ValidationError::new(invalid.as_str()));
    }
    Ok(())
}

pub fn teacher_email(email: &str) -> Result<(), ValidationError> {
    email_rule(
        email,
        ErrorKind::TeacherRequired,
        ErrorKind::InvalidTeacherEmail,
    )
}

pub fn student_email(email: &str) -> Result<(), ValidationError> {
    email_rule(
        email,
        ErrorKind::StudentRequired,
        ErrorKind::InvalidStudentEmail,
    )
}
