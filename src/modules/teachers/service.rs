use std::collections::BTreeSet;

use classroom_core::email::{extract_emails, is_valid_email};
use classroom_core::errors::{AppError, ErrorKind};
use classroom_db::{RegistrationScope, Repositories};
use tracing::{error, info, instrument, warn};

use crate::modules::teachers::model::{StudentStatus, Teacher};

/// Business rules for teachers and their students.
#[derive(Clone, Debug)]
pub struct TeacherService {
    repositories: Repositories,
}

impl TeacherService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    async fn find_teacher(&self, email: &str) -> Result<Teacher, AppError> {
        self.repositories
            .teachers
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::new(ErrorKind::TeacherNotFound))
    }

    /// Registers each student under the teacher, creating unknown students.
    ///
    /// Invalid emails are skipped. Every student is committed on its own, so
    /// a storage failure for one student keeps the students before it.
    #[instrument(skip(self, student_emails), fields(students = student_emails.len()))]
    pub async fn register_students(
        &self,
        teacher_email: &str,
        student_emails: &[String],
    ) -> Result<(), AppError> {
        let teacher = self.find_teacher(teacher_email).await?;

        for student_email in student_emails {
            if !is_valid_email(student_email) {
                warn!(student = %student_email, "Skipping invalid student email");
                continue;
            }
            self.register_student(&teacher, student_email).await?;
        }

        Ok(())
    }

    async fn register_student(&self, teacher: &Teacher, student_email: &str) -> Result<(), AppError> {
        let scope = self.repositories.transactions.begin().await?;

        match link_student(scope.as_ref(), teacher, student_email).await {
            Ok(()) => {
                scope.commit().await?;
                Ok(())
            }
            Err(err) => {
                error!(
                    student = %student_email,
                    error = %format!("{err:#}"),
                    "Failed to register student"
                );
                if let Err(rollback_err) = scope.rollback().await {
                    error!(error = %format!("{rollback_err:#}"), "Rollback failed");
                }
                Err(err.into())
            }
        }
    }

    /// Marks the student as suspended, whatever their current status.
    #[instrument(skip(self))]
    pub async fn suspend_student(&self, student_email: &str) -> Result<(), AppError> {
        let mut student = self
            .repositories
            .students
            .find_by_email(student_email)
            .await?
            .ok_or_else(|| AppError::new(ErrorKind::StudentNotFound))?;

        student.status = StudentStatus::Suspended;
        self.repositories.students.update_status(&student).await?;

        info!(student = %student.email, "Student suspended");
        Ok(())
    }

    /// Emails of students registered to every one of `teacher_emails`.
    #[instrument(skip(self))]
    pub async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>, AppError> {
        for teacher_email in teacher_emails {
            self.find_teacher(teacher_email).await?;
        }

        Ok(self
            .repositories
            .teacher_students
            .common_students(teacher_emails)
            .await?)
    }

    /// Students who should receive a notification from the teacher: the
    /// non-suspended students registered to them plus every email mentioned
    /// in the text. The result is sorted and free of duplicates.
    #[instrument(skip(self, notification))]
    pub async fn fetch_students_for_notification(
        &self,
        teacher_email: &str,
        notification: &str,
    ) -> Result<Vec<String>, AppError> {
        let teacher = self.find_teacher(teacher_email).await?;

        let mut recipients: BTreeSet<String> = extract_emails(notification)
            .into_iter()
            .map(str::to_owned)
            .collect();

        let registered = self
            .repositories
            .teacher_students
            .active_students_of(&teacher.email)
            .await?;
        recipients.extend(registered.into_iter().map(|student| student.email));

        Ok(recipients.into_iter().collect())
    }

    /// Creates the teachers that do not exist yet. Invalid emails are skipped;
    /// the first storage failure aborts the rest.
    #[instrument(skip(self, teacher_emails), fields(teachers = teacher_emails.len()))]
    pub async fn register_teachers(&self, teacher_emails: &[String]) -> Result<(), AppError> {
        for teacher_email in teacher_emails {
            if !is_valid_email(teacher_email) {
                warn!(teacher = %teacher_email, "Skipping invalid teacher email");
                continue;
            }

            let teachers = &self.repositories.teachers;
            if teachers.find_by_email(teacher_email).await?.is_none() {
                teachers.create(teacher_email).await?;
                info!(teacher = %teacher_email, "Teacher registered");
            }
        }

        Ok(())
    }
}

async fn link_student(
    scope: &dyn RegistrationScope,
    teacher: &Teacher,
    student_email: &str,
) -> anyhow::Result<()> {
    let students = scope.students();
    let student = match students.find_by_email(student_email).await? {
        Some(student) => student,
        None => students.create(student_email, StudentStatus::Active).await?,
    };

    let links = scope.teacher_students();
    if links.find_link(teacher.id, student.id).await?.is_none() {
        links.create(teacher.id, student.id).await?;
    }

    Ok(())
}
