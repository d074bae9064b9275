//! In-memory storage for tests.
//!
//! [`MemoryStore`] implements every repository trait over plain vectors.
//! A registration scope reads from a copy of the tables taken at `begin` and
//! records its own writes. `commit` replays those writes onto the shared
//! tables, so writes made elsewhere in the meantime are kept. A student
//! inserted by the scope whose email was taken in the meantime fails the
//! commit and leaves the shared tables untouched, as the unique constraint
//! would. A rolled back or dropped scope changes nothing.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Utc;
use classroom_models::{Student, StudentStatus, Teacher, TeacherStudent};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::repositories::{
    RegistrationScope, Repositories, StudentRepo, TeacherRepo, TeacherStudentRepo,
    TransactionManager,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    teachers: Vec<Teacher>,
    students: Vec<Student>,
    links: Vec<TeacherStudent>,
}

impl Tables {
    fn teacher_by_email(&self, email: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.email == email)
    }

    fn student_by_email(&self, email: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.email == email)
    }

    fn insert_teacher(&mut self, email: &str) -> Result<Teacher> {
        if self.teacher_by_email(email).is_some() {
            bail!("duplicate key value violates unique constraint \"teachers_email_key\"");
        }
        let teacher = Teacher::new(email);
        self.teachers.push(teacher.clone());
        Ok(teacher)
    }

    fn insert_student(&mut self, email: &str, status: StudentStatus) -> Result<Student> {
        if self.student_by_email(email).is_some() {
            bail!("duplicate key value violates unique constraint \"students_email_key\"");
        }
        let student = Student::new(email, status);
        self.students.push(student.clone());
        Ok(student)
    }

    fn update_status(&mut self, student: &Student) -> Result<()> {
        // UPDATE ... WHERE id = $1 touching no row is not an error.
        if let Some(stored) = self.students.iter_mut().find(|s| s.id == student.id) {
            stored.status = student.status;
            stored.updated_at = Utc::now();
        }
        Ok(())
    }

    fn insert_link(&mut self, teacher_id: Uuid, student_id: Uuid) -> TeacherStudent {
        let link = TeacherStudent::new(teacher_id, student_id);
        self.links.push(link.clone());
        link
    }

    fn find_link(&self, teacher_id: Uuid, student_id: Uuid) -> Option<TeacherStudent> {
        self.links
            .iter()
            .find(|l| l.teacher_id == teacher_id && l.student_id == student_id)
            .cloned()
    }

    fn common_students(&self, teacher_emails: &[String]) -> Vec<String> {
        let teacher_ids: HashSet<Uuid> = self
            .teachers
            .iter()
            .filter(|t| teacher_emails.contains(&t.email))
            .map(|t| t.id)
            .collect();

        let mut emails: Vec<String> = self
            .students
            .iter()
            .filter(|student| {
                let matching_links = self
                    .links
                    .iter()
                    .filter(|l| l.student_id == student.id && teacher_ids.contains(&l.teacher_id))
                    .count();
                matching_links == teacher_emails.len()
            })
            .map(|s| s.email.clone())
            .collect();
        emails.sort();
        emails
    }

    fn active_students_of(&self, teacher_email: &str) -> Vec<Student> {
        let Some(teacher) = self.teacher_by_email(teacher_email) else {
            return Vec::new();
        };

        let mut students: Vec<Student> = self
            .links
            .iter()
            .filter(|l| l.teacher_id == teacher.id)
            .filter_map(|l| self.students.iter().find(|s| s.id == l.student_id))
            .filter(|s| !s.is_suspended())
            .cloned()
            .collect();
        students.sort_by(|a, b| a.email.cmp(&b.email));
        students
    }
}

#[derive(Debug, Default)]
struct State {
    tables: Tables,
    failing_links: HashSet<String>,
    failing_teachers: HashSet<String>,
    commits: usize,
    rollbacks: usize,
}

/// Shared in-memory store. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every repository handle backed by this store.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            teachers: Arc::new(self.clone()),
            students: Arc::new(self.clone()),
            teacher_students: Arc::new(self.clone()),
            transactions: Arc::new(self.clone()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes creating a link for the student with `email` fail.
    pub fn fail_link_creation_for(&self, email: impl Into<String>) {
        self.state().failing_links.insert(email.into());
    }

    /// Makes creating a teacher with `email` fail.
    pub fn fail_teacher_creation_for(&self, email: impl Into<String>) {
        self.state().failing_teachers.insert(email.into());
    }

    pub fn seed_teacher(&self, email: &str) -> Teacher {
        let mut state = self.state();
        match state.tables.teacher_by_email(email) {
            Some(teacher) => teacher.clone(),
            None => {
                let teacher = Teacher::new(email);
                state.tables.teachers.push(teacher.clone());
                teacher
            }
        }
    }

    /// Inserts the student, or sets the status of an existing one.
    pub fn seed_student(&self, email: &str, status: StudentStatus) -> Student {
        let mut state = self.state();
        if let Some(existing) = state.tables.students.iter_mut().find(|s| s.email == email) {
            existing.status = status;
            return existing.clone();
        }
        let student = Student::new(email, status);
        state.tables.students.push(student.clone());
        student
    }

    /// Seeds the teacher, the student (ACTIVE unless already present) and
    /// the link between them.
    pub fn seed_registration(&self, teacher_email: &str, student_email: &str) {
        let teacher = self.seed_teacher(teacher_email);
        let mut state = self.state();
        let student = match state.tables.student_by_email(student_email) {
            Some(student) => student.clone(),
            None => {
                let student = Student::new(student_email, StudentStatus::Active);
                state.tables.students.push(student.clone());
                student
            }
        };
        if state.tables.find_link(teacher.id, student.id).is_none() {
            state.tables.insert_link(teacher.id, student.id);
        }
    }

    pub fn teachers(&self) -> Vec<Teacher> {
        self.state().tables.teachers.clone()
    }

    pub fn students(&self) -> Vec<Student> {
        self.state().tables.students.clone()
    }

    pub fn student(&self, email: &str) -> Option<Student> {
        self.state().tables.student_by_email(email).cloned()
    }

    pub fn links(&self) -> Vec<TeacherStudent> {
        self.state().tables.links.clone()
    }

    /// Number of links from `teacher_email` to `student_email`.
    pub fn link_count(&self, teacher_email: &str, student_email: &str) -> usize {
        let state = self.state();
        let tables = &state.tables;
        let (Some(teacher), Some(student)) = (
            tables.teacher_by_email(teacher_email),
            tables.student_by_email(student_email),
        ) else {
            return 0;
        };
        tables
            .links
            .iter()
            .filter(|l| l.teacher_id == teacher.id && l.student_id == student.id)
            .count()
    }

    pub fn commits(&self) -> usize {
        self.state().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.state().rollbacks
    }
}

#[async_trait]
impl TeacherRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        Ok(self.state().tables.teacher_by_email(email).cloned())
    }

    async fn create(&self, email: &str) -> Result<Teacher> {
        let mut state = self.state();
        if state.failing_teachers.contains(email) {
            bail!("Failed to create teacher: injected failure for {email}");
        }
        state.tables.insert_teacher(email)
    }
}

#[async_trait]
impl StudentRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        Ok(self.state().tables.student_by_email(email).cloned())
    }

    async fn create(&self, email: &str, status: StudentStatus) -> Result<Student> {
        self.state().tables.insert_student(email, status)
    }

    async fn update_status(&self, student: &Student) -> Result<()> {
        self.state().tables.update_status(student)
    }
}

#[async_trait]
impl TeacherStudentRepo for MemoryStore {
    async fn create(&self, teacher_id: Uuid, student_id: Uuid) -> Result<TeacherStudent> {
        Ok(self.state().tables.insert_link(teacher_id, student_id))
    }

    async fn find_link(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<TeacherStudent>> {
        Ok(self.state().tables.find_link(teacher_id, student_id))
    }

    async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        Ok(self.state().tables.common_students(teacher_emails))
    }

    async fn active_students_of(&self, teacher_email: &str) -> Result<Vec<Student>> {
        Ok(self.state().tables.active_students_of(teacher_email))
    }
}

#[async_trait]
impl TransactionManager for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn RegistrationScope>> {
        let tables = self.state().tables.clone();
        Ok(Box::new(MemoryScope {
            store: self.clone(),
            pending: Mutex::new(Pending {
                tables,
                writes: Vec::new(),
            }),
        }))
    }
}

/// A write made inside a scope, replayed on commit.
#[derive(Debug, Clone)]
enum Write {
    InsertStudent(Student),
    UpdateStatus(Student),
    InsertLink(TeacherStudent),
}

impl Write {
    fn apply(self, tables: &mut Tables) -> Result<()> {
        match self {
            Self::InsertStudent(student) => {
                if tables.student_by_email(&student.email).is_some() {
                    bail!(
                        "duplicate key value violates unique constraint \"students_email_key\""
                    );
                }
                tables.students.push(student);
            }
            Self::UpdateStatus(student) => tables.update_status(&student)?,
            Self::InsertLink(link) => tables.links.push(link),
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Pending {
    tables: Tables,
    writes: Vec<Write>,
}

/// A registration scope over a snapshot of the tables plus its own writes.
pub struct MemoryScope {
    store: MemoryStore,
    pending: Mutex<Pending>,
}

impl MemoryScope {
    fn pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RegistrationScope for MemoryScope {
    fn students(&self) -> &dyn StudentRepo {
        self
    }

    fn teacher_students(&self) -> &dyn TeacherStudentRepo {
        self
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryScope { store, pending } = *self;
        let writes = pending
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writes;

        let mut state = store.state();
        let mut tables = state.tables.clone();
        for write in writes {
            write.apply(&mut tables).context("Failed to commit transaction")?;
        }
        state.tables = tables;
        state.commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.store.state().rollbacks += 1;
        Ok(())
    }
}

#[async_trait]
impl StudentRepo for MemoryScope {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>> {
        Ok(self.pending().tables.student_by_email(email).cloned())
    }

    async fn create(&self, email: &str, status: StudentStatus) -> Result<Student> {
        let mut pending = self.pending();
        let student = pending.tables.insert_student(email, status)?;
        pending.writes.push(Write::InsertStudent(student.clone()));
        Ok(student)
    }

    async fn update_status(&self, student: &Student) -> Result<()> {
        let mut pending = self.pending();
        pending.tables.update_status(student)?;
        pending.writes.push(Write::UpdateStatus(student.clone()));
        Ok(())
    }
}

#[async_trait]
impl TeacherStudentRepo for MemoryScope {
    async fn create(&self, teacher_id: Uuid, student_id: Uuid) -> Result<TeacherStudent> {
        let mut pending = self.pending();
        let failing = {
            let email = pending
                .tables
                .students
                .iter()
                .find(|s| s.id == student_id)
                .map(|s| s.email.clone())
                .ok_or_else(|| anyhow!("student {student_id} does not exist"))?;
            self.store.state().failing_links.contains(&email).then_some(email)
        };
        if let Some(email) = failing {
            bail!("Failed to register student with teacher: injected failure for {email}");
        }
        let link = pending.tables.insert_link(teacher_id, student_id);
        pending.writes.push(Write::InsertLink(link.clone()));
        Ok(link)
    }

    async fn find_link(
        &self,
        teacher_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<TeacherStudent>> {
        Ok(self.pending().tables.find_link(teacher_id, student_id))
    }

    async fn common_students(&self, teacher_emails: &[String]) -> Result<Vec<String>> {
        Ok(self.pending().tables.common_students(teacher_emails))
    }

    async fn active_students_of(&self, teacher_email: &str) -> Result<Vec<Student>> {
        Ok(self.pending().tables.active_students_of(teacher_email))
    }
}
