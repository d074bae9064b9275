//! Teacher and student data models and DTOs.
//!
//! This module re-exports the models from the `classroom-models` crate.

pub use classroom_models::notifications::*;
pub use classroom_models::students::*;
pub use classroom_models::teacher_students::*;
pub use classroom_models::teachers::*;
