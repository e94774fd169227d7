use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::report::{LinkPublisher, ReportCatalog};

use super::handlers::{definition_summary, generate_link, health_check, AppState};

pub fn create_api_router(catalog: Arc<ReportCatalog>, publisher: LinkPublisher) -> Router {
    let state = Arc::new(AppState { catalog, publisher });

    Router::new()
        .route("/health", get(health_check))
        .route("/reports/generate-link", post(generate_link))
        .route("/reports/definitions/{id}/summary", get(definition_summary))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
