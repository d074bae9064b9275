//! # Classroom Core
//!
//! Core types and utilities shared across the Classroom API.
//!
//! - [`errors`]: The application error catalogue with HTTP response conversion
//! - [`email`]: Email syntax validation and extraction of emails from free text
//!
//! # Example
//!
//! ```ignore
//! use classroom_core::errors::{AppError, ErrorKind};
//! use classroom_core::email::{extract_emails, is_valid_email};
//!
//! assert!(is_valid_email("teacher@school.com"));
//! let mentioned = extract_emails("Hey @student@school.com, see you");
//! let error = AppError::new(ErrorKind::TeacherNotFound);
//! ```

pub mod email;
pub mod errors;

// Re-export commonly used types at crate root
pub use email::{extract_emails, is_valid_email};
pub use errors::{AppError, ErrorKind, ErrorResponse};
