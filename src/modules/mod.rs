pub mod teachers;

pub use self::teachers::TeacherService;
