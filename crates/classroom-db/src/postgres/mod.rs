//! PostgreSQL adapters.
//!
//! Each table module exposes its queries as free functions generic over
//! [`sqlx::postgres::PgExecutor`], so the same SQL runs against the pool or
//! inside a [`PgRegistrationScope`] transaction.

mod students;
mod teacher_students;
mod teachers;
mod transaction;

pub use students::PgStudentRepo;
pub use teacher_students::PgTeacherStudentRepo;
pub use teachers::PgTeacherRepo;
pub use transaction::{PgRegistrationScope, PgTransactionManager};
