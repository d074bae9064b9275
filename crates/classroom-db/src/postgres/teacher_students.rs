use anyhow::{Context, Result};
use async_trait::async_trait;
use classroom_models::{Student, StudentStatus, TeacherStudent};
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;
use tracing::instrument;
use uuid::Uuid;

use crate::repositories::TeacherStudentRepo;

pub(crate) async fn create<'e, E>(
    executor: E,
    teacher_id: Uuid,
    student_id: Uuid,
) -> Result<TeacherStudent>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, TeacherStudent>(
        r#"INSERT INTO teacher_students (teacher_id, student_id)
           VALUES ($1, $2)
           RETURNING id, teacher_id, student_id, created_at, updated_at"#,
    )
    .bind(teacher_id)
    .bind(student_id)
    .fetch_one(executor)
    .await
    .context("Failed to register student with teacher")
}

pub(crate) async fn find_link<'e, E>(
    executor: E,
    teacher_id: Uuid,
    student_id: Uuid,
) -> Result<Option<TeacherStudent>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, TeacherStudent>(
        r#"SELECT id, teacher_id, student_id, created_at, updated_at
           FROM teacher_students
           WHERE teacher_id = $1 AND student_id = $2
           LIMIT 1"#,
    )
    .bind(teacher_id)
    .bind(student_id)
    .fetch_optional(executor)
    .await
    .context("Failed to check student registration")
}

pub(crate) async fn common_students<'e, E>(
    executor: E,
    teacher_emails: &[String],
) -> Result<Vec<String>>
where
    E: PgExecutor<'e>,
{
    // The HAVING count uses the raw input length, duplicates included.
    sqlx::query_scalar::<_, String>(
        r#"SELECT s.email
           FROM students AS s
           JOIN teacher_students AS ts ON s.id = ts.student_id
           JOIN teachers AS t ON t.id = ts.teacher_id
           WHERE t.email = ANY($1)
           GROUP BY s.email
           HAVING COUNT(s.email) = $2
           ORDER BY s.email"#,
    )
    .bind(teacher_emails)
    .bind(teacher_emails.len() as i64)
    .fetch_all(executor)
    .await
    .context("Failed to fetch common students")
}

pub(crate) async fn active_students_of<'e, E>(
    executor: E,
    teacher_email: &str,
) -> Result<Vec<Student>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Student>(
        r#"SELECT s.id, s.email, s.status, s.created_at, s.updated_at
           FROM teacher_students AS ts
           JOIN students AS s ON s.id = ts.student_id
           JOIN teachers AS t ON t.id = ts.teacher_id
           WHERE t.email = $1 AND s.status <> $2
           ORDER BY s.email"#,
    )
    .bind(teacher_email)
    .bind(StudentStatus::Suspended)
    .fetch_all(executor)
    .await
    .context("Failed to fetch students registered to teacher")
}

#[derive(Clone, Debug)]
pub struct PgTeacherStudentRepo {
    pool: PgPool,
}

impl PgTeacherStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherStudentRepo for PgTeacherStudentRepo {
    #[instrument(skip(self))]
    async fn create(&self, teacher_id: Uuid, student_id: Uuid) -> Result<TeacherStudent> {
        create(&self.pool, teacher_id, student_id).await
    }

    #[instrument(skip(self))]
    async fn find_link(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<TeacherStudent>> {
        find_link(&self.pool, teacher_id, student_id).await
    }

    #[instrument(skip(self))]
    async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        common_students(&self.pool, teacher_emails).await
    }

    #[instrument(skip(self))]
    async fn active_students_of(&self, teacher_email: &str) -> Result<Vec<Student>> {
        active_students_of(&self.pool, teacher_email).await
    }
}
