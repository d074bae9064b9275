//! The registration link between a teacher and a student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Records that a student is registered under a teacher.
///
/// A (teacher, student) pair is stored at most once; registration checks for
/// an existing link before creating one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeacherStudent {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub student_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeacherStudent {
    pub fn new(teacher_id: Uuid, student_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            teacher_id,
            student_id,
            created_at: now,
            updated_at: now,
        }
    }
}
