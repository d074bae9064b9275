//! Notification recipient DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::FieldOrder;

/// DTO for computing who receives a teacher's notification.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RetrieveForNotificationsRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::validation::teacher_email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    /// Free text; students mentioned by email are included as recipients.
    #[serde(default)]
    #[validate(length(min = 1, code = "notification_required"))]
    #[schema(example = "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com")]
    pub notification: String,
}

impl FieldOrder for RetrieveForNotificationsRequest {
    const FIELD_ORDER: &'static [&'static str] = &["teacher", "notification"];
}

/// Emails of every student who should receive the notification.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipientsResponse {
    #[schema(example = json!(["studentbob@gmail.com", "studentagnes@gmail.com"]))]
    pub recipients: Vec<String>,
}
