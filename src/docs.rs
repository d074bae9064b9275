use utoipa::OpenApi;

use crate::modules::teachers::model::{
    CommonStudentsResponse, RecipientsResponse, RegisterStudentsRequest, RegisterTeachersRequest,
    RetrieveForNotificationsRequest, Student, StudentStatus, SuspendStudentRequest, Teacher,
};
use classroom_core::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::welcome,
        crate::modules::teachers::controller::register_students,
        crate::modules::teachers::controller::suspend_student,
        crate::modules::teachers::controller::common_students,
        crate::modules::teachers::controller::retrieve_for_notifications,
        crate::modules::teachers::controller::register_teachers,
    ),
    components(
        schemas(
            Teacher,
            Student,
            StudentStatus,
            RegisterStudentsRequest,
            SuspendStudentRequest,
            RetrieveForNotificationsRequest,
            RegisterTeachersRequest,
            CommonStudentsResponse,
            RecipientsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Classroom", description = "Teacher and student administration")
    ),
    info(
        title = "Classroom API",
        version = "0.1.0",
        description = "Teachers register and suspend students, look up students they share and compute notification recipients.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
