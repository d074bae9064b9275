use classroom_db::Repositories;

use crate::modules::teachers::TeacherService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub teacher_service: TeacherService,
}

impl AppState {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            teacher_service: TeacherService::new(repositories),
        }
    }
}
