use anyhow::{Context, Result};
use async_trait::async_trait;
use classroom_models::Teacher;
use sqlx::PgPool;
use tracing::instrument;

use crate::repositories::TeacherRepo;

#[derive(Clone, Debug)]
pub struct PgTeacherRepo {
    pool: PgPool,
}

impl PgTeacherRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRepo for PgTeacherRepo {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        sqlx::query_as::<_, Teacher>(
            r#"SELECT id, email, created_at, updated_at
               FROM teachers
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch teacher by email")
    }

    #[instrument(skip(self))]
    async fn create(&self, email: &str) -> Result<Teacher> {
        sqlx::query_as::<_, Teacher>(
            r#"INSERT INTO teachers (email)
               VALUES ($1)
               RETURNING id, email, created_at, updated_at"#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create teacher")
    }
}
