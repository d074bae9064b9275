use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use classroom_core::errors::{AppError, ErrorKind};
use classroom_models::FieldOrder;
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

/// The error for the first field, in `T::FIELD_ORDER`, that broke a rule.
fn first_violation<T: FieldOrder>(errors: &ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();

    let kind = T::FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errors| errors.iter())
        .find_map(|error| ErrorKind::from_code(&error.code))
        .unwrap_or(ErrorKind::DecodingRequest);

    AppError::new(kind)
}

/// JSON body extractor that also runs the DTO's `validator` rules.
///
/// The body is decoded as JSON whatever the `Content-Type` header says. Any
/// body that cannot be decoded as `T` is rejected with
/// [`ErrorKind::DecodingRequest`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection.body_text(), "Failed to read request body");
            AppError::new(ErrorKind::DecodingRequest)
        })?;

        let value: T = serde_json::from_slice(&body).map_err(|err| {
            debug!(error = %err, "Rejected request body");
            AppError::new(ErrorKind::DecodingRequest)
        })?;

        value.validate().map_err(|errors| first_violation::<T>(&errors))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_models::{RegisterStudentsRequest, RetrieveForNotificationsRequest};

    fn kind_of<T: Validate + FieldOrder>(dto: &T) -> ErrorKind {
        first_violation::<T>(&dto.validate().unwrap_err()).kind
    }

    #[test]
    fn test_teacher_reported_before_students() {
        let dto = RegisterStudentsRequest {
            teacher: String::new(),
            students: Vec::new(),
        };
        assert_eq!(kind_of(&dto), ErrorKind::TeacherRequired);

        let dto = RegisterStudentsRequest {
            teacher: "teacherken".to_string(),
            students: Vec::new(),
        };
        assert_eq!(kind_of(&dto), ErrorKind::InvalidTeacherEmail);

        let dto = RegisterStudentsRequest {
            teacher: "teacherken@gmail.com".to_string(),
            students: Vec::new(),
        };
        assert_eq!(kind_of(&dto), ErrorKind::StudentsRequired);
    }

    #[test]
    fn test_teacher_reported_before_notification() {
        let dto = RetrieveForNotificationsRequest {
            teacher: "nope".to_string(),
            notification: String::new(),
        };
        assert_eq!(kind_of(&dto), ErrorKind::InvalidTeacherEmail);

        let dto = RetrieveForNotificationsRequest {
            teacher: "teacherken@gmail.com".to_string(),
            notification: String::new(),
        };
        assert_eq!(kind_of(&dto), ErrorKind::NotificationRequired);
    }
}
