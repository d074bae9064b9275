use anyhow::{Context, Result};
use async_trait::async_trait;
use classroom_models::{Student, StudentStatus};
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;
use tracing::instrument;

use crate::repositories::StudentRepo;

pub(crate) async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Student>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Student>(
        r#"SELECT id, email, status, created_at, updated_at
           FROM students
           WHERE email = $1"#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
    .context("Failed to fetch student by email")
}

pub(crate) async fn create<'e, E>(executor: E, email: &str, status: StudentStatus) -> Result<Student>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Student>(
        r#"INSERT INTO students (email, status)
           VALUES ($1, $2)
           RETURNING id, email, status, created_at, updated_at"#,
    )
    .bind(email)
    .bind(status)
    .fetch_one(executor)
    .await
    .context("Failed to create student")
}

pub(crate) async fn update_status<'e, E>(executor: E, student: &Student) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"UPDATE students
           SET status = $1, updated_at = NOW()
           WHERE id = $2"#,
    )
    .bind(student.status)
    .bind(student.id)
    .execute(executor)
    .await
    .context("Failed to update student status")?;

    Ok(())
}

#[derive(Clone, Debug)]
pub struct PgStudentRepo {
    pool: PgPool,
}

impl PgStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepo for PgStudentRepo {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        find_by_email(&self.pool, email).await
    }

    #[instrument(skip(self))]
    async fn create(&self, email: &str, status: StudentStatus) -> Result<Student> {
        create(&self.pool, email, status).await
    }

    #[instrument(skip(self, student), fields(student = %student.email, status = %student.status))]
    async fn update_status(&self, student: &Student) -> Result<()> {
        update_status(&self.pool, student).await
    }
}
