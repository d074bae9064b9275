//! Repository contracts.
//!
//! Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
//! storage failures (connectivity, constraint violations and the like).

use anyhow::Result;
use async_trait::async_trait;
use classroom_models::{Student, StudentStatus, Teacher, TeacherStudent};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::postgres::{
    PgStudentRepo, PgTeacherRepo, PgTeacherStudentRepo, PgTransactionManager,
};

#[async_trait]
pub trait TeacherRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>>;

    async fn create(&self, email: &str) -> Result<Teacher>;
}

#[async_trait]
pub trait StudentRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>>;

    async fn create(&self, email: &str, status: StudentStatus) -> Result<Student>;

    /// Persists `student.status`.
    async fn update_status(&self, student: &Student) -> Result<()>;
}

#[async_trait]
pub trait TeacherStudentRepo: Send + Sync {
    async fn create(&self, teacher_id: Uuid, student_id: Uuid) -> Result<TeacherStudent>;

    async fn find_link(&self, teacher_id: Uuid, student_id: Uuid)
    -> Result<Option<TeacherStudent>>;

    /// Emails of students linked to every one of `teacher_emails`.
    ///
    /// A student qualifies when its number of matching links equals
    /// `teacher_emails.len()`, so repeated emails in the input raise the bar.
    async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>>;

    /// Students registered to the teacher, excluding suspended ones.
    async fn active_students_of(&self, teacher_email: &str) -> Result<Vec<Student>>;
}

/// Opens units of work for student registration.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn RegistrationScope>>;
}

/// A unit of work covering one student's registration.
///
/// Writes made through [`students`](Self::students) and
/// [`teacher_students`](Self::teacher_students) become visible to other
/// callers only after [`commit`](Self::commit). Dropping the scope without
/// committing discards them.
#[async_trait]
pub trait RegistrationScope: Send + Sync {
    fn students(&self) -> &dyn StudentRepo;

    fn teacher_students(&self) -> &dyn TeacherStudentRepo;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// The storage handles the service layer is built from.
#[derive(Clone)]
pub struct Repositories {
    pub teachers: Arc<dyn TeacherRepo>,
    pub students: Arc<dyn StudentRepo>,
    pub teacher_students: Arc<dyn TeacherStudentRepo>,
    pub transactions: Arc<dyn TransactionManager>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teachers: Arc::new(PgTeacherRepo::new(pool.clone())),
            students: Arc::new(PgStudentRepo::new(pool.clone())),
            teacher_students: Arc::new(PgTeacherStudentRepo::new(pool.clone())),
            transactions: Arc::new(PgTransactionManager::new(pool)),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
