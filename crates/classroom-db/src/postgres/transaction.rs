use anyhow::{Context, Result};
use async_trait::async_trait;
use classroom_models::{Student, StudentStatus, TeacherStudent};
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{students, teacher_students};
use crate::repositories::{
    RegistrationScope, StudentRepo, TeacherStudentRepo, TransactionManager,
};

#[derive(Clone, Debug)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    async fn begin(&self) -> Result<Box<dyn RegistrationScope>> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        Ok(Box::new(PgRegistrationScope {
            tx: Mutex::new(tx),
        }))
    }
}

/// Runs every query on one database transaction.
pub struct PgRegistrationScope {
    tx: Mutex<Transaction<'static, Postgres>>,
}

#[async_trait]
impl RegistrationScope for PgRegistrationScope {
    fn students(&self) -> &dyn StudentRepo {
        self
    }

    fn teacher_students(&self) -> &dyn TeacherStudentRepo {
        self
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .commit()
            .await
            .context("Failed to commit transaction")?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx
            .into_inner()
            .rollback()
            .await
            .context("Failed to roll back transaction")?;
        debug!("Transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl StudentRepo for PgRegistrationScope {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        let mut tx = self.tx.lock().await;
        students::find_by_email(&mut **tx, email).await
    }

    #[instrument(skip(self))]
    async fn create(&self, email: &str, status: StudentStatus) -> Result<Student> {
        let mut tx = self.tx.lock().await;
        students::create(&mut **tx, email, status).await
    }

    #[instrument(skip(self, student), fields(student = %student.email))]
    async fn update_status(&self, student: &Student) -> Result<()> {
        let mut tx = self.tx.lock().await;
        students::update_status(&mut **tx, student).await
    }
}

#[async_trait]
impl TeacherStudentRepo for PgRegistrationScope {
    #[instrument(skip(self))]
    async fn create(&self, teacher_id: Uuid, student_id: Uuid) -> Result<TeacherStudent> {
        let mut tx = self.tx.lock().await;
        teacher_students::create(&mut **tx, teacher_id, student_id).await
    }

    #[instrument(skip(self))]
    async fn find_link(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<TeacherStudent>> {
        let mut tx = self.tx.lock().await;
        teacher_students::find_link(&mut **tx, teacher_id, student_id).await
    }

    #[instrument(skip(self))]
    async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        let mut tx = self.tx.lock().await;
        teacher_students::common_students(&mut **tx, teacher_emails).await
    }

    #[instrument(skip(self))]
    async fn active_students_of(&self, teacher_email: &str) -> Result<Vec<Student>> {
        let mut tx = self.tx.lock().await;
        teacher_students::active_students_of(&mut **tx, teacher_email).await
    }
}
