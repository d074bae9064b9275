//! # Classroom Models
//!
//! Domain entities and request/response DTOs for the Classroom API.
//!
//! - [`teachers`]: Teacher entity, teacher registration and common-students DTOs
//! - [`students`]: Student entity, its status, student registration and suspension DTOs
//! - [`teacher_students`]: The teacher ↔ student registration link
//! - [`notifications`]: Notification recipient DTOs
//! - [`validation`]: Field rules shared by the request DTOs

pub mod notifications;
pub mod students;
pub mod teacher_students;
pub mod teachers;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use notifications::{RecipientsResponse, RetrieveForNotificationsRequest};
pub use students::{RegisterStudentsRequest, Student, StudentStatus, SuspendStudentRequest};
pub use teacher_students::TeacherStudent;
pub use teachers::{
    CommonStudentsQuery, CommonStudentsResponse, RegisterTeachersRequest, Teacher,
};
pub use validation::FieldOrder;
