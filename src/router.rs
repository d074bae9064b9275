use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::teachers::controller::welcome;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", init_teachers_router())
        // A nested "/" route only matches "/api".
        .route("/api/", get(welcome))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
}
